//! Alert dialog and angle prompt
//!
//! Both are centered overlays drawn after the panel.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Widget, Wrap},
};

use crate::theme::{palette, styles};

/// Center a fixed-size rect within an area, clamped to the area.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

/// Blocking alert with a single message
pub struct AlertDialog<'a> {
    message: &'a str,
}

impl<'a> AlertDialog<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }
}

impl Widget for AlertDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rect = centered_rect(48, 7, area);
        Clear.render(rect, buf);

        let block = styles::modal_block("Alert");
        let inner = block.inner(rect);
        block.render(rect, buf);

        let lines = vec![
            Line::from(Span::styled(
                self.message,
                Style::default().fg(palette::STATUS_YELLOW),
            )),
            Line::default(),
            Line::from(Span::styled("Press any key", styles::text_muted())),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

/// Prompt for rotate-by-angle
pub struct AnglePrompt<'a> {
    input: &'a str,
}

impl<'a> AnglePrompt<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input }
    }
}

impl Widget for AnglePrompt<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rect = centered_rect(40, 6, area);
        Clear.render(rect, buf);

        let block = styles::modal_block("Rotate to angle");
        let inner = block.inner(rect);
        block.render(rect, buf);

        let lines = vec![
            Line::from(vec![
                Span::styled("Degrees (0-360): ", styles::text_secondary()),
                Span::styled(self.input, styles::text_primary()),
                Span::styled("▏", styles::accent_bold()),
            ]),
            Line::default(),
            Line::from(vec![
                Span::styled("[Enter]", styles::keybinding()),
                Span::styled(" rotate  ", styles::text_muted()),
                Span::styled("[Esc]", styles::keybinding()),
                Span::styled(" cancel", styles::text_muted()),
            ]),
        ];
        Paragraph::new(lines).render(
            Rect {
                x: inner.x + 1,
                width: inner.width.saturating_sub(1),
                ..inner
            },
            buf,
        );
    }
}
