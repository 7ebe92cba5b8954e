//! Command and status result handlers
//!
//! The status mirror is only ever written here, and only as a whole.

use crate::state::{ActivityLevel, AppState};
use stepdeck_core::prelude::*;
use stepdeck_core::{ConnectionStatus, DeviceCommand, MotorState};

use super::{UpdateAction, UpdateResult};

/// A command reached the device: refresh the mirror once.
pub fn handle_command_acknowledged(
    state: &mut AppState,
    command: DeviceCommand,
    body: String,
) -> UpdateResult {
    state.commands_in_flight = state.commands_in_flight.saturating_sub(1);
    debug!("{} acknowledged: {}", command.name(), body.trim());

    let seq = state.next_fetch_seq();
    UpdateResult::action(UpdateAction::FetchStatus { seq })
}

/// A command failed in transport. No follow-up fetch.
pub fn handle_command_failed(
    state: &mut AppState,
    command: DeviceCommand,
    error: String,
    status: ConnectionStatus,
) -> UpdateResult {
    state.commands_in_flight = state.commands_in_flight.saturating_sub(1);
    warn!("Command {} failed: {}", command.name(), error);

    state.record_activity(
        ActivityLevel::Error,
        format!("{} failed: {}", command.name(), error),
    );
    mark_unreachable(state, status);
    UpdateResult::none()
}

pub fn handle_status_received(state: &mut AppState, seq: u64, motor: MotorState) -> UpdateResult {
    if is_stale(state, seq) {
        debug!(
            "Discarding status #{} (showing #{})",
            seq, state.applied_fetch_seq
        );
        return UpdateResult::none();
    }

    debug!("Status #{}: {:?}", seq, motor);
    if state.connection != ConnectionStatus::Connected {
        state.record_activity(ActivityLevel::Info, "Connected");
    }

    state.motor = motor;
    state.connection = ConnectionStatus::Connected;
    state.applied_fetch_seq = state.applied_fetch_seq.max(seq);
    state.status_revision += 1;
    state.last_update = Some(chrono::Local::now());

    if motor.is_moving() {
        state.animation.start(motor.direction, motor.speed_percentage);
    } else {
        state.animation.stop();
    }

    UpdateResult::none()
}

pub fn handle_status_failed(
    state: &mut AppState,
    seq: u64,
    error: String,
    status: ConnectionStatus,
) -> UpdateResult {
    if is_stale(state, seq) {
        debug!("Ignoring failure of superseded status #{}", seq);
        return UpdateResult::none();
    }

    warn!("Status fetch #{} failed: {}", seq, error);
    if state.connection != status {
        state.record_activity(ActivityLevel::Error, format!("Status failed: {}", error));
    }
    mark_unreachable(state, status);
    UpdateResult::none()
}

/// Older than the snapshot on screen, and the operator asked to drop those
fn is_stale(state: &AppState, seq: u64) -> bool {
    state.settings.polling.discard_stale && seq < state.applied_fetch_seq
}

fn mark_unreachable(state: &mut AppState, status: ConnectionStatus) {
    state.connection = status;
    state.animation.stop();
}
