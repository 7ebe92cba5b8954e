//! Main TUI runner - entry point and event loop

use stepdeck_app::config::Settings;
use stepdeck_app::Engine;
use stepdeck_core::prelude::*;
use stepdeck_device::{DeviceEndpoint, DeviceTransport, HttpDeviceClient};

use super::{event, render, terminal};

/// Run the TUI against the device named in `settings`
pub async fn run(settings: Settings) -> Result<()> {
    let endpoint =
        DeviceEndpoint::parse(&settings.device.base_url).context("Invalid device address")?;
    let client = HttpDeviceClient::new(endpoint.clone(), settings.request_timeout())
        .context("Failed to create device client")?;
    info!("Controlling device at {}", endpoint);

    let mut engine = Engine::new(settings, client);
    engine.state.device_label = endpoint.to_string();
    run_with_engine(engine).await
}

/// Run the TUI on a prepared engine
pub async fn run_with_engine<T>(mut engine: Engine<T>) -> Result<()>
where
    T: DeviceTransport + Send + Sync + 'static,
{
    terminal::install_panic_hook();
    let mut term = terminal::init().context("Failed to take over the terminal")?;

    engine.start();
    let result = run_loop(&mut term, &mut engine);

    terminal::restore();
    engine.shutdown().await;

    result
}

/// Main event loop
fn run_loop<T>(terminal: &mut ratatui::DefaultTerminal, engine: &mut Engine<T>) -> Result<()>
where
    T: DeviceTransport + Send + Sync + 'static,
{
    while !engine.should_quit() {
        // Results from background tasks, poll ticks, signals
        engine.drain_pending_messages();

        terminal.draw(|frame| render::view(frame, &mut engine.state))?;

        if let Some(message) = event::poll()? {
            engine.process_message(message);
        }
    }

    Ok(())
}
