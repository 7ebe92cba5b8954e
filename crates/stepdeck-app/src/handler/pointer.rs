//! Knob drag handling
//!
//! A press inside the knob starts a drag. While dragging, every move sets
//! the knob angle from the pointer position, wherever the pointer is. A
//! release anywhere ends the drag. Nothing is sent to the device here.

use crate::input_key::{PointerEvent, PointerKind};
use crate::state::{AppState, Interaction, UiMode};
use stepdeck_core::pointer_to_angle;

pub fn handle_pointer(state: &mut AppState, event: PointerEvent) {
    // A release ends the drag in every mode
    if event.kind == PointerKind::Up {
        state.interaction = Interaction::Idle;
        return;
    }
    if state.ui_mode != UiMode::Normal {
        return;
    }

    match event.kind {
        PointerKind::Down => {
            let Some(geometry) = state.knob_geometry else {
                return;
            };
            if geometry.contains(event.column, event.row) {
                state.interaction = Interaction::Dragging;
                track(state, event);
            }
        }
        PointerKind::Drag => {
            if state.is_dragging() {
                track(state, event);
            }
        }
        PointerKind::Up => {}
    }
}

fn track(state: &mut AppState, event: PointerEvent) {
    let Some(geometry) = state.knob_geometry else {
        return;
    };
    let (dx, dy) = geometry.offset(event.column, event.row);
    if dx == 0.0 && dy == 0.0 {
        return;
    }
    state.knob.set_angle(pointer_to_angle(dx, dy));
}
