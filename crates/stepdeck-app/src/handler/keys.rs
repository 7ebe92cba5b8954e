//! Key event handlers for different UI modes

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AppState, UiMode};
use stepdeck_core::DeviceCommand;

/// Full turn angle sent by `f`
const FULL_TURN_DEGREES: u16 = 360;

/// Convert key events to messages based on current UI mode
pub fn handle_key(state: &mut AppState, key: InputKey) -> Option<Message> {
    match state.ui_mode {
        UiMode::Normal => handle_key_normal(state, key),
        UiMode::AngleInput => handle_key_angle_input(state, key),
        UiMode::Alert => handle_key_alert(key),
    }
}

/// Handle key events while the alert is open.
///
/// Any key dismisses it; Ctrl+C still quits.
fn handle_key_alert(key: InputKey) -> Option<Message> {
    match key {
        InputKey::CharCtrl('c') => Some(Message::Quit),
        _ => Some(Message::DismissAlert),
    }
}

/// Handle key events in the angle prompt
fn handle_key_angle_input(state: &mut AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc => Some(Message::CancelAnglePrompt),
        InputKey::CharCtrl('c') => Some(Message::Quit),
        InputKey::Enter => Some(Message::RotateToAngle {
            input: state.angle_input.clone(),
        }),
        InputKey::Backspace => {
            state.angle_input.pop();
            None
        }
        InputKey::Char(c) if c.is_ascii_digit() || c == '.' || c == '-' => {
            if state.angle_input.len() < 8 {
                state.angle_input.push(c);
            }
            None
        }
        _ => None,
    }
}

/// Handle key events on the control panel
fn handle_key_normal(state: &AppState, key: InputKey) -> Option<Message> {
    let step = state.settings.knob.step_degrees;
    match key {
        // Quit
        InputKey::Char('q') | InputKey::Esc | InputKey::CharCtrl('c') => Some(Message::Quit),

        // Toggles
        InputKey::Char('p') => Some(Message::TogglePower),
        InputKey::Char('t') => Some(Message::ToggleTorque),
        InputKey::Char('m') => Some(Message::ToggleStepMode),

        // One-shot commands
        InputKey::Char('o') => Some(Message::Command(DeviceCommand::Oscillate)),
        InputKey::Char('z') => Some(Message::Command(DeviceCommand::ReturnToZero)),
        InputKey::Char('f') => Some(Message::Command(DeviceCommand::RotateAngle(
            FULL_TURN_DEGREES,
        ))),
        InputKey::Char('a') => Some(Message::OpenAnglePrompt),

        // Knob
        InputKey::Enter | InputKey::Char('s') => Some(Message::SendKnob),
        InputKey::Left | InputKey::Char('h') => Some(Message::NudgeKnob(-step)),
        InputKey::Right | InputKey::Char('l') => Some(Message::NudgeKnob(step)),
        InputKey::Char('0') => Some(Message::ResetKnob),

        InputKey::Char('r') => Some(Message::PollTick),
        InputKey::Char('?') => Some(Message::ToggleHelp),

        _ => None,
    }
}
