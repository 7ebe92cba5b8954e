//! # stepdeck-device - Motor Controller Client
//!
//! Talks to the microcontroller's HTTP API. Every call is a single GET with
//! no retry, queueing or cancellation.
//!
//! Depends on [`stepdeck_core`] for domain types and error handling.
//!
//! ## Public API
//!
//! ### Transport
//! - [`DeviceTransport`] - Send-able async seam used by the app layer
//! - [`HttpDeviceClient`] - `reqwest` implementation of the transport
//!
//! ### Protocol
//! - [`DeviceEndpoint`] - Normalised base URL and request URL builders
//! - [`parse_status()`] - Parse a `/status` body into a [`MotorState`](stepdeck_core::MotorState)

pub mod client;
pub mod protocol;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use client::{DeviceTransport, HttpDeviceClient, LocalDeviceTransport};
pub use protocol::{parse_status, DeviceEndpoint, StatusPayload, DEFAULT_BASE_URL};
