//! Domain events emitted by the Engine for external consumers
//!
//! Headless mode subscribes to these via `Engine::subscribe()` and prints
//! one JSON line per event.

use stepdeck_core::{ConnectionStatus, DeviceCommand, MotorState};

/// Domain events emitted by the Engine.
///
/// Events are broadcast after each message processing cycle, so subscribers
/// see a consistent view of state changes.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// A status snapshot replaced the mirror
    StatusUpdated { state: MotorState },

    /// Connection indicator changed
    ConnectionChanged {
        old: ConnectionStatus,
        new: ConnectionStatus,
    },

    /// A command was handed to the transport
    CommandSent { command: DeviceCommand },

    /// The device acknowledged a command
    CommandAcknowledged { command: DeviceCommand, body: String },

    /// A command failed in transport
    CommandFailed {
        command: DeviceCommand,
        error: String,
    },

    /// Operator input was rejected
    InputRejected { message: String },

    /// Engine is shutting down
    Shutdown,
}

impl EngineEvent {
    /// Event type name for logging and serialization
    pub fn event_type(&self) -> &'static str {
        match self {
            EngineEvent::StatusUpdated { .. } => "status",
            EngineEvent::ConnectionChanged { .. } => "connection_changed",
            EngineEvent::CommandSent { .. } => "command_sent",
            EngineEvent::CommandAcknowledged { .. } => "command_acknowledged",
            EngineEvent::CommandFailed { .. } => "command_failed",
            EngineEvent::InputRejected { .. } => "input_rejected",
            EngineEvent::Shutdown => "shutdown",
        }
    }
}
