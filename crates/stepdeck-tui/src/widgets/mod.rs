//! Custom widgets for the control panel

mod activity;
mod header;
mod help;
mod knob;
mod modal;
mod motor_panel;
mod status_bar;

pub use activity::ActivityLog;
pub use header::MainHeader;
pub use help::KeyHints;
pub use knob::Knob;
pub use modal::{centered_rect, AlertDialog, AnglePrompt};
pub use motor_panel::MotorPanel;
pub use status_bar::StatusBar;
