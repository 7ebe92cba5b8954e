//! stepdeck - terminal control panel for network-attached stepper-motor drivers
//!
//! The binary picks between the ratatui panel in `stepdeck-tui` and the
//! headless NDJSON runner defined here.

pub mod headless;

pub use headless::runner::run_headless;
