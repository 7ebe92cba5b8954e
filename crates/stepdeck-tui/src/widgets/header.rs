//! Header bar widget
//!
//! App title, device address and the connection indicator.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use stepdeck_core::ConnectionStatus;

use crate::theme::{palette, styles};

pub struct MainHeader<'a> {
    device_label: &'a str,
    connection: ConnectionStatus,
}

impl<'a> MainHeader<'a> {
    pub fn new(device_label: &'a str, connection: ConnectionStatus) -> Self {
        Self {
            device_label,
            connection,
        }
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let (icon, style) = styles::connection_indicator(self.connection);
        let title = Line::from(vec![
            Span::styled(format!("{} ", icon), style),
            Span::styled("stepdeck", styles::accent_bold()),
            Span::styled("  │  ", styles::text_muted()),
            Span::styled(self.device_label, styles::text_secondary()),
        ]);
        buf.set_line(inner.x + 1, inner.y, &title, inner.width.saturating_sub(1));

        let status = Line::from(Span::styled(self.connection.label(), style));
        let width = status.width() as u16;
        if inner.width > width + 2 {
            buf.set_line(inner.x + inner.width - width - 1, inner.y, &status, width);
        }
    }
}
