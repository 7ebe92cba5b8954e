//! Screen layout definitions for the TUI

use ratatui::layout::{Constraint, Layout, Rect};

/// Rows needed by the motor status card (borders included)
const MOTOR_PANEL_HEIGHT: u16 = 11;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Title, device address and connection dot
    pub header: Rect,
    /// Knob card (left)
    pub knob: Rect,
    /// Motor status card (right, top)
    pub motor: Rect,
    /// Activity log (right, bottom)
    pub activity: Rect,
    /// Key hints, empty when hidden
    pub help: Rect,
    /// Bottom status line
    pub status_bar: Rect,
}

/// Create the main screen layout
pub fn create(area: Rect, show_help: bool) -> ScreenAreas {
    let help_height = if show_help { 2 } else { 0 };

    let [header, body, help, status_bar] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(6),
        Constraint::Length(help_height),
        Constraint::Length(1),
    ])
    .areas(area);

    let [knob, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(body);

    let [motor, activity] =
        Layout::vertical([Constraint::Length(MOTOR_PANEL_HEIGHT), Constraint::Min(0)])
            .areas(right);

    ScreenAreas {
        header,
        knob,
        motor,
        activity,
        help,
        status_bar,
    }
}

/// Largest rect inside `area` that draws as a circle, centered.
///
/// Terminal cells are about twice as tall as wide, so the rect is twice as
/// many columns as rows.
pub fn square_knob_area(area: Rect) -> Rect {
    let height = area.height.min(area.width / 2);
    let width = height * 2;
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}
