//! Main update function - handles state transitions (TEA pattern)

use std::time::Instant;

use crate::message::Message;
use crate::state::{ActivityLevel, AppState, UiMode};
use stepdeck_core::prelude::*;
use stepdeck_core::{validate_rotation_angle, DeviceCommand, DirectionCommand};

use super::{device, keys::handle_key, pointer::handle_pointer, UpdateAction, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.request_quit();
            UpdateResult::none()
        }

        Message::Key(key) => {
            if let Some(msg) = handle_key(state, key) {
                UpdateResult::message(msg)
            } else {
                UpdateResult::none()
            }
        }

        Message::Pointer(event) => {
            handle_pointer(state, event);
            UpdateResult::none()
        }

        Message::Tick => {
            let now = Instant::now();
            if let Some(last) = state.last_tick {
                state.animation.advance(now.duration_since(last));
            }
            state.last_tick = Some(now);
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Knob Messages
        // ─────────────────────────────────────────────────────────
        Message::NudgeKnob(delta) => {
            state.knob.rotate_by(delta);
            UpdateResult::none()
        }

        Message::ResetKnob => {
            state.knob.reset();
            UpdateResult::none()
        }

        Message::SendKnob => {
            let speed = state.knob.speed_percentage();
            let direction = DirectionCommand::from_knob(speed, state.knob.direction());
            let commands = vec![
                DeviceCommand::Speed(speed),
                DeviceCommand::Direction(direction),
            ];
            for command in &commands {
                mark_sent(state, command);
            }
            UpdateResult::action(UpdateAction::SendSequence { commands })
        }

        // ─────────────────────────────────────────────────────────
        // Control Messages
        // ─────────────────────────────────────────────────────────
        Message::Command(command) => send(state, command),

        Message::TogglePower => {
            if state.motor.motor_enabled {
                // Powering off parks the knob too
                state.knob.reset();
                send(state, DeviceCommand::Disable)
            } else {
                send(state, DeviceCommand::Enable)
            }
        }

        Message::ToggleTorque => {
            let command = if state.motor.torque_enabled {
                DeviceCommand::DisableTorque
            } else {
                DeviceCommand::EnableTorque
            };
            send(state, command)
        }

        Message::ToggleStepMode => {
            let mode = state.motor.step_mode.toggled();
            send(state, DeviceCommand::StepMode(mode))
        }

        Message::RotateToAngle { input } => match validate_rotation_angle(&input) {
            Ok(angle) => {
                state.close_angle_prompt();
                send(state, DeviceCommand::RotateAngle(angle))
            }
            Err(e) => {
                state.close_angle_prompt();
                UpdateResult::message(Message::InvalidInput {
                    message: e.to_string(),
                })
            }
        },

        Message::InvalidInput { message } => {
            debug!("Rejected operator input: {}", message);
            state.record_activity(ActivityLevel::Warning, message.clone());
            state.show_alert(message);
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Angle Prompt / Alert Messages
        // ─────────────────────────────────────────────────────────
        Message::OpenAnglePrompt => {
            state.open_angle_prompt();
            UpdateResult::none()
        }

        Message::CancelAnglePrompt => {
            state.close_angle_prompt();
            UpdateResult::none()
        }

        Message::DismissAlert => {
            if state.ui_mode == UiMode::Alert {
                state.dismiss_alert();
            }
            UpdateResult::none()
        }

        Message::ToggleHelp => {
            state.show_help = !state.show_help;
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Device Results
        // ─────────────────────────────────────────────────────────
        Message::CommandAcknowledged { command, body } => {
            device::handle_command_acknowledged(state, command, body)
        }

        Message::CommandFailed {
            command,
            error,
            status,
        } => device::handle_command_failed(state, command, error, status),

        Message::PollTick => {
            let seq = state.next_fetch_seq();
            UpdateResult::action(UpdateAction::FetchStatus { seq })
        }

        Message::StatusReceived { seq, state: motor } => {
            device::handle_status_received(state, seq, motor)
        }

        Message::StatusFetchFailed { seq, error, status } => {
            device::handle_status_failed(state, seq, error, status)
        }
    }
}

fn send(state: &mut AppState, command: DeviceCommand) -> UpdateResult {
    mark_sent(state, &command);
    UpdateResult::action(UpdateAction::SendCommand { command })
}

fn mark_sent(state: &mut AppState, command: &DeviceCommand) {
    state.commands_in_flight += 1;
    let text = match command.value() {
        Some(value) => format!("→ {} {}", command.name(), value),
        None => format!("→ {}", command.name()),
    };
    info!("Sending {:?}", command);
    state.record_activity(ActivityLevel::Info, text);
}
