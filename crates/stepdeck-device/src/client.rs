//! Controller client
//!
//! [`DeviceTransport`] is the seam the app layer spawns requests through;
//! [`HttpDeviceClient`] is the real implementation on top of `reqwest`.
//! Implement the `Send` variant; the local one follows from it.

use std::time::Duration;

use stepdeck_core::prelude::*;
use stepdeck_core::{DeviceCommand, MotorState};

use crate::protocol::{parse_status, DeviceEndpoint};

/// Motor controller operations.
///
/// One request per call. Failures are reported as
/// [`Error::Transport`] or [`Error::MalformedResponse`] and never retried.
#[trait_variant::make(DeviceTransport: Send)]
pub trait LocalDeviceTransport {
    /// Send a control command, returning the device's acknowledgement text
    async fn send_command(&self, command: &DeviceCommand) -> Result<String>;

    /// Fetch the full motor status
    async fn fetch_status(&self) -> Result<MotorState>;
}

/// HTTP client for a single controller
#[derive(Debug, Clone)]
pub struct HttpDeviceClient {
    http: reqwest::Client,
    endpoint: DeviceEndpoint,
}

impl HttpDeviceClient {
    /// Build a client. `timeout` of `None` lets a hung request wait forever.
    pub fn new(endpoint: DeviceEndpoint, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| Error::transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &DeviceEndpoint {
        &self.endpoint
    }

    async fn get_text(&self, url: url::Url) -> Result<String> {
        trace!("GET {}", url);

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::transport(describe_request_error(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::transport(format!("HTTP error! status: {}", status)));
        }

        response
            .text()
            .await
            .map_err(|e| Error::transport(format!("Failed to read response body: {}", e)))
    }
}

impl DeviceTransport for HttpDeviceClient {
    async fn send_command(&self, command: &DeviceCommand) -> Result<String> {
        let url = self.endpoint.control_url(command);
        info!("Sending {}", url);

        let body = self.get_text(url).await?;
        debug!("Device acknowledged {}: {}", command.name(), body.trim());
        Ok(body)
    }

    async fn fetch_status(&self) -> Result<MotorState> {
        let body = self.get_text(self.endpoint.status_url()).await?;
        let state = parse_status(&body)?;
        trace!("Status snapshot: {:?}", state);
        Ok(state)
    }
}

fn describe_request_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_connect() {
        format!("could not connect: {}", error)
    } else {
        error.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{DeviceTransport, HttpDeviceClient};
    use crate::protocol::DeviceEndpoint;
    use crate::test_utils::{FakeDevice, FakeResponse};
    use std::time::Duration;
    use stepdeck_core::prelude::*;
    use stepdeck_core::{DeviceCommand, MotorState};
    use stepdeck_core::{Direction, StepMode};
    use tokio_test::{assert_err, assert_ok};

    fn client_for(device: &FakeDevice) -> HttpDeviceClient {
        HttpDeviceClient::new(device.endpoint(), Some(Duration::from_secs(2))).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_status_parses_payload() {
        let device = FakeDevice::start().await;
        device.set_status(MotorState {
            motor_enabled: true,
            torque_enabled: true,
            direction: Direction::Right,
            speed_percentage: 60,
            step_mode: StepMode::Half,
            current_step: 42,
        });

        let state = assert_ok!(client_for(&device).fetch_status().await);
        assert!(state.motor_enabled);
        assert_eq!(state.speed_percentage, 60);
        assert_eq!(state.step_mode, StepMode::Half);
        assert_eq!(state.current_step, 42);
    }

    #[tokio::test]
    async fn test_send_command_hits_control_endpoint() {
        let device = FakeDevice::start().await;
        let client = client_for(&device);

        let ack = assert_ok!(client.send_command(&DeviceCommand::Speed(25)).await);
        assert!(ack.contains("speed"));

        assert_eq!(device.requests(), vec!["/control?cmd=speed&val=25".to_string()]);
        assert_eq!(device.status().speed_percentage, 25);
    }

    #[tokio::test]
    async fn test_non_success_status_is_transport_error() {
        let device = FakeDevice::start().await;
        device.push_response(FakeResponse::Status(500));

        let err = assert_err!(client_for(&device).fetch_status().await);
        assert!(matches!(err, Error::Transport { .. }));
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_partial_payload_is_malformed() {
        let device = FakeDevice::start().await;
        device.push_response(FakeResponse::Body(
            r#"{"currentStep":1,"direction":"left"}"#.to_string(),
        ));

        let err = assert_err!(client_for(&device).fetch_status().await);
        assert!(matches!(err, Error::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_device_is_transport_error() {
        let endpoint = DeviceEndpoint::parse("http://127.0.0.1:1").unwrap();
        let client = HttpDeviceClient::new(endpoint, Some(Duration::from_secs(2))).unwrap();

        let err = assert_err!(client.fetch_status().await);
        assert!(matches!(err, Error::Transport { .. }));
    }

    #[tokio::test]
    async fn test_timeout_is_transport_error() {
        let device = FakeDevice::start().await;
        device.push_response(FakeResponse::Hang);
        let client =
            HttpDeviceClient::new(device.endpoint(), Some(Duration::from_millis(100))).unwrap();

        let err = assert_err!(client.fetch_status().await);
        assert!(err.to_string().contains("timed out"));
    }
}
