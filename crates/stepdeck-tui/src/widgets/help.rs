//! Key hints strip

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::theme::styles;

const BINDINGS: &[(&str, &str)] = &[
    ("p", "power"),
    ("t", "torque"),
    ("m", "mode"),
    ("←/→", "knob"),
    ("s", "send"),
    ("0", "reset"),
    ("a", "angle"),
    ("f", "360°"),
    ("o", "oscillate"),
    ("z", "zero"),
    ("r", "refresh"),
    ("?", "help"),
    ("q", "quit"),
];

pub struct KeyHints;

impl Widget for KeyHints {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        let mut spans = Vec::with_capacity(BINDINGS.len() * 2);
        for (key, action) in BINDINGS {
            spans.push(Span::styled(format!("[{}]", key), styles::keybinding()));
            spans.push(Span::styled(format!(" {}  ", action), styles::text_muted()));
        }

        Paragraph::new(Line::from(spans))
            .wrap(Wrap { trim: true })
            .render(
                Rect {
                    x: area.x + 1,
                    width: area.width.saturating_sub(2),
                    ..area
                },
                buf,
            );
    }
}
