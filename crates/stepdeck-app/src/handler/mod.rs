//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers for UI modes
//! - `pointer`: Knob drag handling
//! - `device`: Command and status result reconciliation

pub(crate) mod device;
pub(crate) mod keys;
pub(crate) mod pointer;
pub(crate) mod update;


use crate::message::Message;
use stepdeck_core::DeviceCommand;

// Re-export main entry point
pub use update::update;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateAction {
    /// Send one command to the device
    SendCommand { command: DeviceCommand },

    /// Send several commands in order, one request after another
    SendSequence { commands: Vec<DeviceCommand> },

    /// Issue a status fetch tagged with its sequence number
    FetchStatus { seq: u64 },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
