//! stepdeck - terminal control panel for a stepper-motor controller
//!
//! This is the binary entry point. All logic lives in the workspace crates.

use std::path::PathBuf;

use clap::Parser;
use stepdeck_app::config::{init_config_file, load_settings};
use stepdeck_core::prelude::*;

/// stepdeck - drive a stepper motor over the controller's HTTP API
#[derive(Parser, Debug)]
#[command(name = "stepdeck")]
#[command(about = "A terminal control panel for network-attached stepper-motor drivers", long_about = None)]
struct Args {
    /// Controller base URL, e.g. http://192.168.1.100
    #[arg(long, value_name = "URL")]
    device: Option<String>,

    /// Settings file (defaults to <config dir>/stepdeck/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write a default settings file and exit
    #[arg(long)]
    init_config: bool,

    /// Run in headless mode (JSON output, no TUI)
    #[arg(long)]
    headless: bool,

    /// Status poll interval in milliseconds
    #[arg(long, value_name = "MS")]
    interval_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;
    stepdeck_core::logging::init().context("Failed to set up logging")?;

    if args.init_config {
        let path =
            init_config_file(args.config.as_deref()).context("Failed to write config file")?;
        println!("Config file: {}", path.display());
        return Ok(());
    }

    let mut settings = load_settings(args.config.as_deref());
    if let Some(device) = args.device {
        settings.device.base_url = device;
    }
    if let Some(interval_ms) = args.interval_ms {
        settings.polling.interval_ms = interval_ms;
    }

    if args.headless {
        stepdeck::run_headless(settings).await
    } else {
        stepdeck_tui::run(settings).await
    }
}
