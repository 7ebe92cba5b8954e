//! Headless mode - JSON event output instead of the control panel
//!
//! Runs the same engine as the TUI and prints what happens to stdout, one
//! JSON object per line (NDJSON). Each object has an `"event"` field naming
//! its type. Commands are read from stdin.
//!
//! # Example Output
//!
//! ```json
//! {"event":"started","device":"http://192.168.1.100","poll_interval_ms":2000,"timestamp":1704700001000}
//! {"event":"command_sent","command":"speed","value":"40","timestamp":1704700002000}
//! {"event":"connection_changed","old":"disconnected","new":"connected","timestamp":1704700002100}
//! ```

pub mod runner;

use chrono::Utc;
use serde::Serialize;
use std::io::{self, Write};
use tracing::error;

use stepdeck_app::EngineEvent;
use stepdeck_core::{ConnectionStatus, DeviceCommand, MotorState};

/// Events emitted in headless mode
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// Engine is running against a device
    Started {
        device: String,
        poll_interval_ms: u64,
        timestamp: i64,
    },

    /// Fresh status snapshot from the device
    Status { state: MotorState, timestamp: i64 },

    ConnectionChanged {
        old: ConnectionStatus,
        new: ConnectionStatus,
        timestamp: i64,
    },

    CommandSent {
        command: String,
        value: Option<String>,
        timestamp: i64,
    },

    CommandAcknowledged {
        command: String,
        value: Option<String>,
        response: String,
        timestamp: i64,
    },

    CommandFailed {
        command: String,
        value: Option<String>,
        error: String,
        timestamp: i64,
    },

    /// A stdin line was not a valid command
    InputRejected { message: String, timestamp: i64 },

    Shutdown { timestamp: i64 },
}

impl HeadlessEvent {
    /// Emit this event to stdout as JSON
    pub fn emit(&self) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                return;
            }
        };

        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", json) {
            error!("Failed to write headless event to stdout: {}", e);
            return;
        }

        if let Err(e) = stdout.flush() {
            error!("Failed to flush headless stdout: {}", e);
        }
    }

    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    pub fn started(device: &str, poll_interval_ms: u64) -> Self {
        Self::Started {
            device: device.to_string(),
            poll_interval_ms,
            timestamp: Self::now(),
        }
    }

    /// Translate an engine event into its wire form
    pub fn from_engine_event(event: &EngineEvent) -> Self {
        let timestamp = Self::now();
        match event {
            EngineEvent::StatusUpdated { state } => Self::Status {
                state: *state,
                timestamp,
            },
            EngineEvent::ConnectionChanged { old, new } => Self::ConnectionChanged {
                old: *old,
                new: *new,
                timestamp,
            },
            EngineEvent::CommandSent { command } => Self::CommandSent {
                command: command.name().to_string(),
                value: command.value(),
                timestamp,
            },
            EngineEvent::CommandAcknowledged { command, body } => Self::CommandAcknowledged {
                command: command.name().to_string(),
                value: command.value(),
                response: body.clone(),
                timestamp,
            },
            EngineEvent::CommandFailed { command, error } => {
                Self::command_failed(command, error.clone(), timestamp)
            }
            EngineEvent::InputRejected { message } => Self::InputRejected {
                message: message.clone(),
                timestamp,
            },
            EngineEvent::Shutdown => Self::Shutdown { timestamp },
        }
    }

    fn command_failed(command: &DeviceCommand, error: String, timestamp: i64) -> Self {
        Self::CommandFailed {
            command: command.name().to_string(),
            value: command.value(),
            error,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use stepdeck_core::{Direction, DirectionCommand, StepMode};

    fn to_json(event: &HeadlessEvent) -> Value {
        serde_json::to_value(event).unwrap()
    }

    #[test]
    fn test_started_serialization() {
        let json = to_json(&HeadlessEvent::started("http://10.0.0.5/", 2000));

        assert_eq!(json["event"], "started");
        assert_eq!(json["device"], "http://10.0.0.5/");
        assert_eq!(json["poll_interval_ms"], 2000);
        assert!(json["timestamp"].as_i64().unwrap() > 0);
    }

    #[test]
    fn test_started_device_is_endpoint_display() {
        let endpoint = stepdeck_device::DeviceEndpoint::parse("http://192.168.1.100").unwrap();
        let json = to_json(&HeadlessEvent::started(&endpoint.to_string(), 2000));

        assert_eq!(json["device"], "http://192.168.1.100");
    }

    #[test]
    fn test_status_serialization() {
        let state = MotorState {
            motor_enabled: true,
            torque_enabled: false,
            direction: Direction::Left,
            speed_percentage: 40,
            step_mode: StepMode::Half,
            current_step: -12,
        };
        let json = to_json(&HeadlessEvent::from_engine_event(
            &EngineEvent::StatusUpdated { state },
        ));

        assert_eq!(json["event"], "status");
        assert_eq!(json["state"]["motorEnabled"], true);
        assert_eq!(json["state"]["speedPercentage"], 40);
        assert_eq!(json["state"]["currentStep"], -12);
    }

    #[test]
    fn test_connection_changed_serialization() {
        let json = to_json(&HeadlessEvent::from_engine_event(
            &EngineEvent::ConnectionChanged {
                old: ConnectionStatus::Disconnected,
                new: ConnectionStatus::Connected,
            },
        ));

        assert_eq!(json["event"], "connection_changed");
        assert_eq!(json["old"], "disconnected");
        assert_eq!(json["new"], "connected");
    }

    #[test]
    fn test_command_events_carry_wire_name_and_value() {
        let sent = to_json(&HeadlessEvent::from_engine_event(&EngineEvent::CommandSent {
            command: DeviceCommand::Direction(DirectionCommand::Right),
        }));
        assert_eq!(sent["event"], "command_sent");
        assert_eq!(sent["command"], "direction");
        assert_eq!(sent["value"], "right");

        let failed = to_json(&HeadlessEvent::from_engine_event(
            &EngineEvent::CommandFailed {
                command: DeviceCommand::Enable,
                error: "connection refused".to_string(),
            },
        ));
        assert_eq!(failed["event"], "command_failed");
        assert_eq!(failed["command"], "enable");
        assert!(failed["value"].is_null());
        assert_eq!(failed["error"], "connection refused");
    }

    #[test]
    fn test_input_rejected_and_shutdown_serialization() {
        let rejected = to_json(&HeadlessEvent::from_engine_event(
            &EngineEvent::InputRejected {
                message: "Speed must be between 0 and 100.".to_string(),
            },
        ));
        assert_eq!(rejected["event"], "input_rejected");
        assert_eq!(rejected["message"], "Speed must be between 0 and 100.");

        let shutdown = to_json(&HeadlessEvent::from_engine_event(&EngineEvent::Shutdown));
        assert_eq!(shutdown["event"], "shutdown");
    }
}
