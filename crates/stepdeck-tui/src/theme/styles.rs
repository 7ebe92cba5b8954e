//! Semantic style builders

use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use stepdeck_app::state::ActivityLevel;
use stepdeck_core::{ConnectionStatus, Direction};

use super::palette;

// --- Text styles ---
pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

// --- Accent styles ---
pub fn accent_bold() -> Style {
    Style::default()
        .fg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

// --- Keybinding hint style ---
pub fn keybinding() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

// --- Block builders ---
pub fn glass_block(focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if focused {
            palette::BORDER_ACTIVE
        } else {
            palette::BORDER_DIM
        }))
}

pub fn titled_block(title: &str, focused: bool) -> Block<'_> {
    glass_block(focused).title(format!(" {} ", title))
}

pub fn modal_block(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette::BORDER_ACTIVE))
        .style(Style::default().bg(palette::POPUP_BG))
}

// --- Indicators ---

/// On/off indicator for power and torque: `(label, style)`
pub fn toggle(on: bool) -> (&'static str, Style) {
    if on {
        (
            "ON",
            Style::default()
                .fg(palette::STATUS_GREEN)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        ("OFF", text_muted())
    }
}

/// Connection indicator: `(icon, style)`
pub fn connection_indicator(status: ConnectionStatus) -> (&'static str, Style) {
    match status {
        ConnectionStatus::Connected => ("●", Style::default().fg(palette::STATUS_GREEN)),
        ConnectionStatus::Disconnected => ("○", Style::default().fg(palette::STATUS_RED)),
        ConnectionStatus::Error => ("✗", Style::default().fg(palette::STATUS_YELLOW)),
    }
}

pub fn direction_color(direction: Direction) -> ratatui::style::Color {
    match direction {
        Direction::Left => palette::KNOB_COUNTER_CLOCKWISE,
        _ => palette::KNOB_CLOCKWISE,
    }
}

pub fn activity(level: ActivityLevel) -> Style {
    match level {
        ActivityLevel::Info => text_secondary(),
        ActivityLevel::Warning => Style::default().fg(palette::STATUS_YELLOW),
        ActivityLevel::Error => Style::default().fg(palette::STATUS_RED),
    }
}
