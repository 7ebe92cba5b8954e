//! Headless mode runner - main event loop without TUI
//!
//! Drives the engine from stdin lines and prints every engine event as a
//! [`HeadlessEvent`].

use std::io::BufRead;

use tokio::sync::broadcast::error::TryRecvError;
use tokio::sync::{broadcast, mpsc};

use stepdeck_app::config::Settings;
use stepdeck_app::message::Message;
use stepdeck_app::state::UiMode;
use stepdeck_app::{Engine, EngineEvent};
use stepdeck_core::prelude::*;
use stepdeck_core::DeviceCommand;
use stepdeck_device::{DeviceEndpoint, DeviceTransport, HttpDeviceClient};

use super::HeadlessEvent;

/// Run in headless mode - output JSON events instead of TUI
pub async fn run_headless(settings: Settings) -> Result<()> {
    let endpoint =
        DeviceEndpoint::parse(&settings.device.base_url).context("Invalid device address")?;
    let client = HttpDeviceClient::new(endpoint.clone(), settings.request_timeout())
        .context("Failed to create device client")?;

    info!("═══════════════════════════════════════════════════════");
    info!("stepdeck starting in HEADLESS mode");
    info!("Device: {}", endpoint);
    info!("═══════════════════════════════════════════════════════");

    let mut engine = Engine::new(settings, client);
    engine.state.device_label = endpoint.to_string();

    let stdin_tx = engine.msg_sender();
    std::thread::spawn(move || {
        spawn_stdin_reader_blocking(stdin_tx);
    });

    let result = run_headless_with_engine(&mut engine).await;

    info!("stepdeck headless mode exiting");
    result
}

/// Run the headless event loop on a prepared engine until quit
pub async fn run_headless_with_engine<T>(engine: &mut Engine<T>) -> Result<()>
where
    T: DeviceTransport + Send + Sync + 'static,
{
    let mut events = engine.subscribe();

    HeadlessEvent::started(
        &engine.state.device_label,
        engine.state.settings.poll_interval().as_millis() as u64,
    )
    .emit();

    engine.start();
    let result = headless_event_loop(engine, &mut events, |event| {
        HeadlessEvent::from_engine_event(event).emit()
    })
    .await;

    engine.shutdown().await;
    flush_events(&mut events, |event| {
        HeadlessEvent::from_engine_event(event).emit()
    });

    result
}

/// Process messages until quit, handing each engine event to `sink`
async fn headless_event_loop<T, F>(
    engine: &mut Engine<T>,
    events: &mut broadcast::Receiver<EngineEvent>,
    mut sink: F,
) -> Result<()>
where
    T: DeviceTransport + Send + Sync + 'static,
    F: FnMut(&EngineEvent),
{
    loop {
        if engine.should_quit() {
            info!("Quit requested");
            break;
        }

        if !engine.process_next().await {
            info!("Message channel closed");
            break;
        }

        flush_events(events, &mut sink);

        // Nobody is there to dismiss an alert; the rejection was already emitted
        if engine.state.ui_mode == UiMode::Alert {
            engine.process_message(Message::DismissAlert);
        }
    }

    Ok(())
}

fn flush_events<F>(events: &mut broadcast::Receiver<EngineEvent>, mut sink: F)
where
    F: FnMut(&EngineEvent),
{
    loop {
        match events.try_recv() {
            Ok(event) => sink(&event),
            Err(TryRecvError::Lagged(skipped)) => {
                warn!("Headless output lagged, {} events dropped", skipped);
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
        }
    }
}

/// Map one stdin line to a message.
///
/// Returns `None` for blank lines.
pub fn parse_stdin_line(line: &str) -> Option<Message> {
    match line.trim() {
        "" => None,
        "q" | "quit" | "exit" => Some(Message::Quit),
        "r" | "refresh" | "status" => Some(Message::PollTick),
        other => Some(match DeviceCommand::parse(other) {
            Ok(command) => Message::Command(command),
            Err(e) => Message::InvalidInput {
                message: e.to_string(),
            },
        }),
    }
}

/// Blocking stdin reader for a dedicated thread
fn spawn_stdin_reader_blocking(msg_tx: mpsc::Sender<Message>) {
    let stdin = std::io::stdin();
    let reader = stdin.lock();

    for line in reader.lines() {
        match line {
            Ok(line) => {
                let Some(message) = parse_stdin_line(&line) else {
                    continue;
                };
                let quit = matches!(message, Message::Quit);
                debug!("Stdin: {:?}", message);
                if msg_tx.blocking_send(message).is_err() || quit {
                    break;
                }
            }
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        }
    }

    info!("Stdin reader exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepdeck_core::{ConnectionStatus, Direction, DirectionCommand, MotorState};
    use stepdeck_device::test_utils::ScriptedTransport;

    #[test]
    fn test_parse_stdin_line_commands() {
        assert!(matches!(
            parse_stdin_line("speed 40"),
            Some(Message::Command(DeviceCommand::Speed(40)))
        ));
        assert!(matches!(
            parse_stdin_line("  direction left "),
            Some(Message::Command(DeviceCommand::Direction(
                DirectionCommand::Left
            )))
        ));
        assert!(matches!(
            parse_stdin_line("rotate_angle 90"),
            Some(Message::Command(DeviceCommand::RotateAngle(90)))
        ));
    }

    #[test]
    fn test_parse_stdin_line_control_words() {
        assert!(parse_stdin_line("").is_none());
        assert!(parse_stdin_line("   ").is_none());
        assert!(matches!(parse_stdin_line("quit"), Some(Message::Quit)));
        assert!(matches!(parse_stdin_line("q"), Some(Message::Quit)));
        assert!(matches!(parse_stdin_line("status"), Some(Message::PollTick)));
    }

    #[test]
    fn test_parse_stdin_line_rejects_with_tui_messages() {
        match parse_stdin_line("rotate_angle 400") {
            Some(Message::InvalidInput { message }) => {
                assert_eq!(message, "Enter an angle between 0 and 360 degrees.");
            }
            other => panic!("expected InvalidInput, got {:?}", other),
        }
        assert!(matches!(
            parse_stdin_line("spin"),
            Some(Message::InvalidInput { .. })
        ));
    }

    #[tokio::test]
    async fn test_event_loop_emits_command_and_status_events() {
        let status = MotorState {
            motor_enabled: true,
            direction: Direction::Right,
            speed_percentage: 30,
            ..Default::default()
        };
        let mut engine = Engine::new(
            Settings::default(),
            ScriptedTransport::with_fallback_status(status),
        );
        let mut events = engine.subscribe();
        let tx = engine.msg_sender();

        tx.send(Message::Command(DeviceCommand::Enable)).await.unwrap();

        let mut seen = Vec::new();
        let mut received_status = false;
        while !received_status {
            assert!(engine.process_next().await);
            flush_events(&mut events, |event| seen.push(event.clone()));
            received_status = seen
                .iter()
                .any(|e| matches!(e, EngineEvent::StatusUpdated { .. }));
        }

        tx.send(Message::Quit).await.unwrap();
        headless_event_loop(&mut engine, &mut events, |event| seen.push(event.clone()))
            .await
            .unwrap();

        assert_eq!(seen[0], EngineEvent::CommandSent { command: DeviceCommand::Enable });
        assert!(seen.contains(&EngineEvent::StatusUpdated { state: status }));
        assert!(seen.contains(&EngineEvent::ConnectionChanged {
            old: ConnectionStatus::Disconnected,
            new: ConnectionStatus::Connected,
        }));
        assert!(engine.should_quit());
    }

    #[tokio::test]
    async fn test_event_loop_clears_alert_after_rejected_input() {
        let mut engine = Engine::new(Settings::default(), ScriptedTransport::new());
        let mut events = engine.subscribe();
        let tx = engine.msg_sender();

        for line in ["speed 500", "speed 500", "quit"] {
            tx.send(parse_stdin_line(line).unwrap()).await.unwrap();
        }

        let mut rejected = 0;
        headless_event_loop(&mut engine, &mut events, |event| {
            if matches!(event, EngineEvent::InputRejected { .. }) {
                rejected += 1;
            }
        })
        .await
        .unwrap();

        assert_eq!(rejected, 2);
        assert_eq!(engine.state.ui_mode, UiMode::Normal);
        assert!(engine.transport().sent_commands().is_empty());
    }
}
