//! Activity log card: commands sent, failures, connection changes

use std::collections::VecDeque;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use stepdeck_app::state::ActivityEntry;

use crate::theme::styles;

pub struct ActivityLog<'a> {
    entries: &'a VecDeque<ActivityEntry>,
}

impl<'a> ActivityLog<'a> {
    pub fn new(entries: &'a VecDeque<ActivityEntry>) -> Self {
        Self { entries }
    }
}

impl Widget for ActivityLog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::titled_block("Activity", false);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        // Newest at the bottom
        let visible = inner.height as usize;
        let skip = self.entries.len().saturating_sub(visible);
        let lines: Vec<Line> = self
            .entries
            .iter()
            .skip(skip)
            .map(|entry| {
                Line::from(vec![
                    Span::styled(
                        entry.timestamp.format("%H:%M:%S ").to_string(),
                        styles::text_muted(),
                    ),
                    Span::styled(entry.message.as_str(), styles::activity(entry.level)),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use stepdeck_app::state::{ActivityLevel, AppState};

    #[test]
    fn test_shows_latest_entries() {
        let mut state = AppState::new();
        for i in 0..10 {
            state.record_activity(ActivityLevel::Info, format!("entry-{i}"));
        }

        let mut term = TestTerminal::new();
        // 3 visible rows
        term.render_widget(ActivityLog::new(&state.activity), Rect::new(0, 0, 40, 5));

        assert!(term.buffer_contains("entry-9"));
        assert!(term.buffer_contains("entry-7"));
        assert!(!term.buffer_contains("entry-6"));
    }
}
