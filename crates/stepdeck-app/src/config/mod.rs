//! Configuration file parsing for stepdeck
//!
//! Settings live in `<config_dir>/stepdeck/config.toml` unless a path is
//! given on the command line.

pub mod settings;
pub mod types;

pub use settings::{default_config_path, init_config_file, load_settings};
pub use types::*;
