//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/share/stepdeck/logs/`, never to the
/// terminal the panel is drawn on.
/// Log level is controlled by `STEPDECK_LOG` environment variable.
///
/// # Examples
/// ```bash
/// STEPDECK_LOG=debug cargo run
/// STEPDECK_LOG=stepdeck_device=trace cargo run
/// ```
pub fn init() -> Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "stepdeck.log");

    // Default to info for our crates, allow override via STEPDECK_LOG
    let env_filter = EnvFilter::try_from_env("STEPDECK_LOG").unwrap_or_else(|_| {
        EnvFilter::new(
            "stepdeck=info,stepdeck_core=info,stepdeck_device=info,stepdeck_app=info,stepdeck_tui=info,warn",
        )
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("═══════════════════════════════════════════════════════");
    tracing::info!("stepdeck starting");
    tracing::info!("Log directory: {}", log_dir.display());
    tracing::info!("═══════════════════════════════════════════════════════");

    Ok(())
}

/// Get the log directory path
fn get_log_directory() -> Result<PathBuf> {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    Ok(base.join("stepdeck").join("logs"))
}
