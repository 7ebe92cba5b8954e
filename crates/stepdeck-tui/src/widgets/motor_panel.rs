//! Motor status card
//!
//! Everything here comes from the status mirror; nothing is derived from the
//! knob.

use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use stepdeck_app::SpinAnimation;
use stepdeck_core::{ConnectionStatus, MotorState};

use crate::theme::{palette, styles};

/// Rotating frames shown while the motor is enabled
const MOVING_FRAMES: [&str; 8] = ["↑", "↗", "→", "↘", "↓", "↙", "←", "↖"];
/// Shown when the motor is off or the device is unreachable
const STATIC_GLYPH: &str = "■";

pub struct MotorPanel<'a> {
    motor: &'a MotorState,
    connection: ConnectionStatus,
    animation: &'a SpinAnimation,
    last_update: Option<DateTime<Local>>,
    commands_in_flight: usize,
}

impl<'a> MotorPanel<'a> {
    pub fn new(
        motor: &'a MotorState,
        connection: ConnectionStatus,
        animation: &'a SpinAnimation,
    ) -> Self {
        Self {
            motor,
            connection,
            animation,
            last_update: None,
            commands_in_flight: 0,
        }
    }

    pub fn last_update(mut self, last_update: Option<DateTime<Local>>) -> Self {
        self.last_update = last_update;
        self
    }

    pub fn commands_in_flight(mut self, count: usize) -> Self {
        self.commands_in_flight = count;
        self
    }

    /// Motor indicator: `(glyph, label)`
    pub fn indicator(&self) -> (&'static str, &'static str) {
        if self.motor.motor_enabled && self.connection == ConnectionStatus::Connected {
            (MOVING_FRAMES[self.animation.frame() % MOVING_FRAMES.len()], "moving")
        } else {
            (STATIC_GLYPH, "static")
        }
    }

    fn row(label: &'static str, value: Span<'a>) -> Line<'a> {
        Line::from(vec![
            Span::styled(format!("{:<11}", label), styles::text_muted()),
            value,
        ])
    }
}

impl Widget for MotorPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::titled_block("Motor", false);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let (power, power_style) = styles::toggle(self.motor.motor_enabled);
        let (torque, torque_style) = styles::toggle(self.motor.torque_enabled);
        let (glyph, state) = self.indicator();
        let glyph_style = if state == "moving" {
            Style::default()
                .fg(palette::STATUS_GREEN)
                .add_modifier(Modifier::BOLD)
        } else {
            styles::text_muted()
        };
        let (_, connection_style) = styles::connection_indicator(self.connection);
        let updated = self
            .last_update
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "never".to_string());

        let lines = vec![
            Self::row("Power", Span::styled(power, power_style)),
            Self::row("Torque", Span::styled(torque, torque_style)),
            Line::from(vec![
                Span::styled(format!("{:<11}", "Motor"), styles::text_muted()),
                Span::styled(glyph, glyph_style),
                Span::styled(format!(" {}", state), styles::text_secondary()),
            ]),
            Self::row(
                "Direction",
                Span::styled(self.motor.direction.label(), styles::text_primary()),
            ),
            Self::row(
                "Speed",
                Span::styled(
                    format!("{}%", self.motor.speed_percentage),
                    styles::text_primary(),
                ),
            ),
            Self::row(
                "Step mode",
                Span::styled(self.motor.step_mode.label(), styles::text_primary()),
            ),
            Self::row(
                "Steps",
                Span::styled(self.motor.current_step.to_string(), styles::text_primary()),
            ),
            Self::row(
                "Link",
                Span::styled(self.connection.label(), connection_style),
            ),
            Self::row(
                "Updated",
                Span::styled(
                    format!("{}  ({} in flight)", updated, self.commands_in_flight),
                    styles::text_secondary(),
                ),
            ),
        ];

        Paragraph::new(lines).render(inner, buf);
    }
}
