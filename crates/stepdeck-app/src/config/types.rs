//! Configuration types for stepdeck

use std::time::Duration;

use serde::{Deserialize, Serialize};
use stepdeck_device::DEFAULT_BASE_URL;

/// Minimum status polling interval (500ms) to avoid flooding the controller.
pub const POLL_INTERVAL_MIN_MS: u64 = 500;

/// Application settings (config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub device: DeviceSettings,

    #[serde(default)]
    pub polling: PollingSettings,

    #[serde(default)]
    pub knob: KnobSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

impl Settings {
    /// Poll interval, clamped to [`POLL_INTERVAL_MIN_MS`]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.polling.interval_ms.max(POLL_INTERVAL_MIN_MS))
    }

    /// Per-request timeout; `None` when disabled (0)
    pub fn request_timeout(&self) -> Option<Duration> {
        match self.device.request_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }
}

/// Controller connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeviceSettings {
    /// Base URL of the controller (`http://host[:port]`)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in milliseconds (0 = wait indefinitely)
    #[serde(default)]
    pub request_timeout_ms: u64,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: 0,
        }
    }
}

/// Status polling settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PollingSettings {
    /// Poll interval in milliseconds
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Drop status responses older than the one already shown.
    ///
    /// Off by default: whichever response resolves last is displayed.
    #[serde(default)]
    pub discard_stale: bool,
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            discard_stale: false,
        }
    }
}

/// Knob input settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KnobSettings {
    /// Degrees turned per arrow-key press
    #[serde(default = "default_step_degrees")]
    pub step_degrees: f64,
}

impl Default for KnobSettings {
    fn default() -> Self {
        Self {
            step_degrees: default_step_degrees(),
        }
    }
}

/// UI settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiSettings {
    /// Show the key help panel on startup
    #[serde(default = "default_true")]
    pub show_help: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self { show_help: true }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_interval_ms() -> u64 {
    2000
}

fn default_step_degrees() -> f64 {
    5.0
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.device.base_url, "http://192.168.1.100");
        assert_eq!(settings.poll_interval(), Duration::from_millis(2000));
        assert_eq!(settings.request_timeout(), None);
        assert!(!settings.polling.discard_stale);
        assert_eq!(settings.knob.step_degrees, 5.0);
        assert!(settings.ui.show_help);
    }

    #[test]
    fn test_poll_interval_is_clamped() {
        let mut settings = Settings::default();
        settings.polling.interval_ms = 50;
        assert_eq!(settings.poll_interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_request_timeout_enabled() {
        let mut settings = Settings::default();
        settings.device.request_timeout_ms = 1500;
        assert_eq!(
            settings.request_timeout(),
            Some(Duration::from_millis(1500))
        );
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let settings: Settings = toml::from_str(
            r#"
[polling]
discard_stale = true
"#,
        )
        .unwrap();
        assert!(settings.polling.discard_stale);
        assert_eq!(settings.polling.interval_ms, 2000);
        assert_eq!(settings.device.base_url, "http://192.168.1.100");
    }
}
