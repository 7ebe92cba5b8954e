//! Main render/view function (View in TEA pattern)


use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use stepdeck_app::state::{AppState, KnobGeometry, UiMode};

use super::{layout, widgets};
use crate::theme::palette;

/// Render the complete UI (View function in TEA)
///
/// Apart from drawing, this records where the knob ended up so pointer
/// events can be hit-tested against it.
pub fn view(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();

    let bg_block = Block::default().style(Style::default().bg(palette::DEEPEST_BG));
    frame.render_widget(bg_block, area);

    let areas = layout::create(area, state.show_help);

    frame.render_widget(
        widgets::MainHeader::new(&state.device_label, state.connection),
        areas.header,
    );

    let dial = widgets::Knob::dial_area(areas.knob);
    state.knob_geometry = (dial.width > 0 && dial.height > 0).then(|| KnobGeometry {
        center_column: dial.x as f64 + dial.width as f64 / 2.0,
        center_row: dial.y as f64 + dial.height as f64 / 2.0,
        radius_columns: dial.width as f64 / 2.0,
        radius_rows: dial.height as f64 / 2.0,
    });
    frame.render_widget(
        widgets::Knob::new(state.knob).dragging(state.is_dragging()),
        areas.knob,
    );

    frame.render_widget(
        widgets::MotorPanel::new(&state.motor, state.connection, &state.animation)
            .last_update(state.last_update)
            .commands_in_flight(state.commands_in_flight),
        areas.motor,
    );
    frame.render_widget(widgets::ActivityLog::new(&state.activity), areas.activity);

    if state.show_help {
        frame.render_widget(widgets::KeyHints, areas.help);
    }
    frame.render_widget(widgets::StatusBar::new(state), areas.status_bar);

    match state.ui_mode {
        UiMode::Normal => {}
        UiMode::AngleInput => {
            frame.render_widget(widgets::AnglePrompt::new(&state.angle_input), area);
        }
        UiMode::Alert => {
            if let Some(message) = &state.alert {
                frame.render_widget(widgets::AlertDialog::new(message), area);
            }
        }
    }
}
