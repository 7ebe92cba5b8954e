//! stepdeck-tui - Terminal UI for stepdeck
//!
//! This crate provides the ratatui-based control panel. It drives an Engine
//! from stepdeck-app and adds terminal rendering, key and mouse polling, and
//! widget display.

pub mod event;
pub mod layout;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

// Re-export main entry points
pub use runner::{run, run_with_engine};
