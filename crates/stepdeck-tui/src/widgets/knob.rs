//! Rotary knob widget
//!
//! A braille ring with a pointer from the center. 0° is up and angles grow
//! clockwise. The right half of the dial is clockwise speed, the left half
//! counter-clockwise.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine},
        Paragraph, Widget,
    },
};

use stepdeck_core::KnobState;

use crate::layout::square_knob_area;
use crate::theme::{palette, styles};

/// Rows reserved under the dial for labels
const LABEL_ROWS: u16 = 2;

pub struct Knob {
    knob: KnobState,
    dragging: bool,
}

impl Knob {
    pub fn new(knob: KnobState) -> Self {
        Self {
            knob,
            dragging: false,
        }
    }

    pub fn dragging(mut self, dragging: bool) -> Self {
        self.dragging = dragging;
        self
    }

    /// Area the dial occupies when rendered into a card at `area`
    pub fn dial_area(area: Rect) -> Rect {
        let inner = styles::glass_block(false).inner(area);
        let dial = Rect {
            height: inner.height.saturating_sub(LABEL_ROWS),
            ..inner
        };
        square_knob_area(dial)
    }
}

impl Widget for Knob {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::titled_block("Speed / Direction", self.dragging);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height <= LABEL_ROWS || inner.width < 4 {
            return;
        }

        let dial = Self::dial_area(area);
        let angle = self.knob.angle();
        let direction = self.knob.direction();
        let speed = self.knob.speed_percentage();
        let pointer_color = styles::direction_color(direction);

        let radians = angle.to_radians();
        let (tip_x, tip_y) = (0.8 * radians.sin(), 0.8 * radians.cos());

        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([-1.0, 1.0])
            .y_bounds([-1.0, 1.0])
            .paint(move |ctx| {
                ctx.draw(&Circle {
                    x: 0.0,
                    y: 0.0,
                    radius: 0.95,
                    color: palette::KNOB_RING,
                });
                ctx.draw(&CanvasLine {
                    x1: 0.0,
                    y1: 0.0,
                    x2: tip_x,
                    y2: tip_y,
                    color: pointer_color,
                });
            })
            .render(dial, buf);

        let labels = vec![
            Line::from(vec![
                Span::styled("Speed ", styles::text_muted()),
                Span::styled(
                    format!("{}%", speed),
                    Style::default()
                        .fg(palette::TEXT_PRIMARY)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("   Direction ", styles::text_muted()),
                Span::styled(
                    self.knob.direction_label(),
                    Style::default().fg(pointer_color),
                ),
            ]),
            Line::from(Span::styled(
                format!("{:.0}°  [s] send", angle),
                styles::text_muted(),
            )),
        ];
        let label_area = Rect {
            y: inner.y + inner.height - LABEL_ROWS,
            height: LABEL_ROWS,
            ..inner
        };
        Paragraph::new(labels)
            .alignment(Alignment::Center)
            .render(label_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_knob_labels_follow_angle() {
        let mut term = TestTerminal::new();
        let area = Rect::new(0, 0, 40, 18);
        term.render_widget(Knob::new(KnobState::with_angle(270.0)), area);

        assert!(term.buffer_contains("Speed 50%"));
        assert!(term.buffer_contains("Direction Left"));
        assert!(term.buffer_contains("270°"));
    }

    #[test]
    fn test_knob_at_rest_shows_stopped() {
        let mut term = TestTerminal::new();
        term.render_widget(Knob::new(KnobState::new()), Rect::new(0, 0, 40, 18));

        assert!(term.buffer_contains("Speed 0%"));
        assert!(term.buffer_contains("Stopped"));
    }

    #[test]
    fn test_dial_area_is_inside_card() {
        let area = Rect::new(0, 3, 40, 18);
        let dial = Knob::dial_area(area);
        // inner is 38x16, minus 2 label rows = 38x14 -> 28x14
        assert_eq!(dial, Rect::new(6, 4, 28, 14));
    }

    #[test]
    fn test_tiny_area_does_not_panic() {
        let mut term = TestTerminal::with_size(6, 4);
        term.render_widget(Knob::new(KnobState::with_angle(90.0)), Rect::new(0, 0, 6, 4));
    }
}
