//! Bottom status line

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use stepdeck_app::state::{AppState, Interaction};

use crate::theme::styles;

pub struct StatusBar<'a> {
    state: &'a AppState,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn activity_label(&self) -> &'static str {
        match (self.state.interaction, self.state.is_commanding()) {
            (Interaction::Dragging, _) => "dragging",
            (Interaction::Idle, true) => "commanding",
            (Interaction::Idle, false) => "idle",
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        let poll = self.state.settings.poll_interval();
        let line = Line::from(vec![
            Span::styled(format!(" {}", self.activity_label()), styles::accent_bold()),
            Span::styled(
                format!("  │  poll {}ms", poll.as_millis()),
                styles::text_muted(),
            ),
            Span::styled(
                format!("  │  {} snapshots", self.state.status_revision),
                styles::text_muted(),
            ),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);

        if !self.state.show_help {
            let hint = Line::from(Span::styled("[?] help ", styles::keybinding()));
            let width = hint.width() as u16;
            if area.width > width {
                buf.set_line(area.x + area.width - width, area.y, &hint, width);
            }
        }
    }
}
