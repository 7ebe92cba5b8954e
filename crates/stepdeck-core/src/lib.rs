//! # stepdeck-core - Core Domain Types
//!
//! Foundation crate for stepdeck. Provides the motor domain types, the
//! knob angle/speed mapper, error handling, and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`MotorState`] - Mirror of the device's authoritative motor state
//! - [`KnobState`] - Client-local knob angle (speed and direction are derived)
//! - [`Direction`], [`StepMode`], [`ConnectionStatus`]
//! - [`DeviceCommand`] - Control commands understood by the device
//!
//! ### Mapper (`mapper`)
//! - [`angle_to_speed_direction()`] - Knob angle to (speed, direction)
//! - [`speed_to_animation_duration()`] - Speed to spin period
//! - [`pointer_to_angle()`] - Pointer offset from the knob center to an angle
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with connection vs validation classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use stepdeck_core::prelude::*;
//! ```

pub mod error;
pub mod logging;
pub mod mapper;
pub mod types;

/// Prelude for common imports used throughout all stepdeck crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result, ResultExt};
pub use mapper::{
    angle_to_speed_direction, pointer_to_angle, speed_direction_to_angle,
    speed_to_animation_duration, MAX_SPIN_PERIOD, MIN_SPIN_PERIOD,
};
pub use types::{
    validate_rotation_angle, ConnectionStatus, DeviceCommand, Direction, DirectionCommand,
    KnobState, MotorState, StepMode,
};
