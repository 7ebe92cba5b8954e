//! Settings loader for config.toml

use super::types::Settings;
use stepdeck_core::prelude::*;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.toml";
const CONFIG_DIR: &str = "stepdeck";

const DEFAULT_CONFIG: &str = r#"# stepdeck configuration

[device]
# Controller address (http://host[:port])
base_url = "http://192.168.1.100"
# Request timeout in milliseconds (0 = wait indefinitely)
request_timeout_ms = 0

[polling]
# Status poll interval in milliseconds (minimum 500)
interval_ms = 2000
# Ignore status responses older than the one on screen
discard_stale = false

[knob]
# Degrees per arrow-key press
step_degrees = 5.0

[ui]
show_help = true
"#;

/// Default settings location: `<config_dir>/stepdeck/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join(CONFIG_FILENAME)
}

/// Load settings from `path`, or from [`default_config_path`] when `None`.
///
/// A missing or unreadable file yields defaults.
pub fn load_settings(path: Option<&Path>) -> Settings {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(default_config_path);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Write the default config file if none exists. Returns the path.
pub fn init_config_file(path: Option<&Path>) -> Result<PathBuf> {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(default_config_path);

    if config_path.exists() {
        info!("Config already exists at {:?}", config_path);
        return Ok(config_path);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| Error::config(format!("Failed to create {:?}: {}", parent, e)))?;
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .map_err(|e| Error::config(format!("Failed to write {:?}: {}", config_path, e)))?;
    info!("Created default config at {:?}", config_path);

    Ok(config_path)
}
