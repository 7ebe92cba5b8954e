//! stepdeck-app - Application state and orchestration for stepdeck
//!
//! This crate implements the TEA (The Elm Architecture) pattern for state
//! management, the Engine abstraction for shared orchestration, status
//! polling and configuration loading.

pub mod actions;
pub mod animation;
pub mod config;
pub mod engine;
pub mod engine_event;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod poller;
pub mod process;
pub mod signals;
pub mod state;

// Re-export primary types
pub use animation::SpinAnimation;
pub use engine::Engine;
pub use engine_event::EngineEvent;
pub use handler::{UpdateAction, UpdateResult};
pub use message::Message;
pub use state::AppState;
