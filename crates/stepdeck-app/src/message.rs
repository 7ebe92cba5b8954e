//! Message types for the application (TEA pattern)

use crate::input_key::{InputKey, PointerEvent};
use stepdeck_core::{ConnectionStatus, DeviceCommand, MotorState};

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Mouse event from terminal
    Pointer(PointerEvent),

    /// Frame tick for animations
    Tick,

    /// Force quit (q, Ctrl+C, signal handler)
    Quit,

    // ─────────────────────────────────────────────────────────
    // Knob Messages
    // ─────────────────────────────────────────────────────────
    /// Turn the knob by a number of degrees (negative = counter-clockwise)
    NudgeKnob(f64),
    /// Return the knob to 0°
    ResetKnob,
    /// Transmit the knob's speed and direction
    SendKnob,

    // ─────────────────────────────────────────────────────────
    // Control Messages
    // ─────────────────────────────────────────────────────────
    /// Issue a command to the device
    Command(DeviceCommand),
    /// Enable or disable the motor based on the last known state
    TogglePower,
    /// Enable or disable holding torque based on the last known state
    ToggleTorque,
    /// Switch between full- and half-stepping
    ToggleStepMode,
    /// Validate operator angle input and rotate to it
    RotateToAngle { input: String },
    /// Operator input rejected before reaching the device
    InvalidInput { message: String },

    // ─────────────────────────────────────────────────────────
    // Angle Prompt / Alert Messages
    // ─────────────────────────────────────────────────────────
    OpenAnglePrompt,
    CancelAnglePrompt,
    DismissAlert,
    ToggleHelp,

    // ─────────────────────────────────────────────────────────
    // Device Results
    // ─────────────────────────────────────────────────────────
    /// Command reached the device
    CommandAcknowledged {
        command: DeviceCommand,
        body: String,
    },
    /// Command failed in transport
    CommandFailed {
        command: DeviceCommand,
        error: String,
        status: ConnectionStatus,
    },
    /// Poll timer fired
    PollTick,
    /// Status fetch succeeded
    StatusReceived { seq: u64, state: MotorState },
    /// Status fetch failed
    StatusFetchFailed {
        seq: u64,
        error: String,
        status: ConnectionStatus,
    },
}
