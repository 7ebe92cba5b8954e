//! Wire protocol for the controller's HTTP API
//!
//! - `GET {base}/control?cmd={name}&val={value}` returns a plain-text
//!   acknowledgement.
//! - `GET {base}/status` returns a JSON object with every motor field.

use serde::Deserialize;
use url::Url;

use stepdeck_core::prelude::*;
use stepdeck_core::{DeviceCommand, Direction, MotorState, StepMode};

/// Address the firmware ships with
pub const DEFAULT_BASE_URL: &str = "http://192.168.1.100";

/// Base URL of a controller, normalised so endpoint paths join under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceEndpoint {
    base: Url,
}

impl DeviceEndpoint {
    /// Parse a base URL. A bare `host[:port]` is treated as `http://`.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_url(raw));
        }

        let with_scheme = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("http://{}", trimmed)
        };

        let mut base = Url::parse(&with_scheme).map_err(|_| Error::invalid_url(raw))?;
        if !matches!(base.scheme(), "http" | "https") || base.host_str().is_none() {
            return Err(Error::invalid_url(raw));
        }

        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.set_query(None);
        base.set_fragment(None);

        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// `{base}/control?cmd={name}&val={value}`.
    ///
    /// Commands without a value still carry an empty `val`.
    pub fn control_url(&self, command: &DeviceCommand) -> Url {
        let mut url = self.join("control");
        let value = command.value().unwrap_or_default();
        url.query_pairs_mut()
            .append_pair("cmd", command.name())
            .append_pair("val", &value);
        url
    }

    /// `{base}/status`
    pub fn status_url(&self) -> Url {
        self.join("status")
    }

    fn join(&self, path: &str) -> Url {
        let mut url = self.base.clone();
        let joined = format!("{}{}", self.base.path(), path);
        url.set_path(&joined);
        url
    }
}

impl std::fmt::Display for DeviceEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.base.as_str().trim_end_matches('/'))
    }
}

/// Raw `/status` body. Every field is required.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusPayload {
    pub current_step: i64,
    pub direction: String,
    pub step_mode: String,
    pub motor_enabled: bool,
    pub torque_enabled: bool,
    pub speed: i64,
}

impl TryFrom<StatusPayload> for MotorState {
    type Error = Error;

    fn try_from(payload: StatusPayload) -> Result<Self> {
        let direction = Direction::parse(&payload.direction).ok_or_else(|| {
            Error::malformed(format!("unknown direction `{}`", payload.direction))
        })?;
        let step_mode = StepMode::parse(&payload.step_mode).ok_or_else(|| {
            Error::malformed(format!("unknown step mode `{}`", payload.step_mode))
        })?;

        if payload.speed < 0 {
            return Err(Error::malformed(format!(
                "negative speed {}",
                payload.speed
            )));
        }
        if payload.speed > 100 {
            warn!("Device reported speed {}%, clamping to 100%", payload.speed);
        }

        Ok(MotorState {
            motor_enabled: payload.motor_enabled,
            torque_enabled: payload.torque_enabled,
            direction,
            speed_percentage: payload.speed.min(100) as u8,
            step_mode,
            current_step: payload.current_step,
        })
    }
}

/// Parse a `/status` response body
pub fn parse_status(body: &str) -> Result<MotorState> {
    let payload: StatusPayload =
        serde_json::from_str(body).map_err(|e| Error::malformed(e.to_string()))?;
    MotorState::try_from(payload)
}
