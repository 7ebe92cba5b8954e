//! Test doubles for the controller
//!
//! - [`FakeDevice`] is an in-process HTTP server that speaks the controller's
//!   API on `127.0.0.1`, for exercising [`HttpDeviceClient`](crate::HttpDeviceClient).
//! - [`ScriptedTransport`] implements [`DeviceTransport`] directly with queued
//!   results and optional per-request delays, for app-level tests.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use stepdeck_core::prelude::*;
use stepdeck_core::{DeviceCommand, Direction, MotorState, StepMode};

use crate::client::DeviceTransport;
use crate::protocol::DeviceEndpoint;

// ─────────────────────────────────────────────────────────────────────────────
// FakeDevice
// ─────────────────────────────────────────────────────────────────────────────

/// Canned reply that overrides routing for the next request
#[derive(Debug, Clone)]
pub enum FakeResponse {
    /// Empty body with the given HTTP status
    Status(u16),
    /// 200 with the given body
    Body(String),
    /// Accept the request and never answer
    Hang,
}

#[derive(Debug, Default)]
struct FakeState {
    status: MotorState,
    requests: Vec<String>,
    overrides: VecDeque<FakeResponse>,
}

/// Minimal HTTP/1.1 controller emulator
#[derive(Debug, Clone)]
pub struct FakeDevice {
    addr: SocketAddr,
    state: Arc<Mutex<FakeState>>,
}

impl FakeDevice {
    /// Bind to an ephemeral port and start serving
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake device");
        let addr = listener.local_addr().expect("fake device address");
        let state = Arc::new(Mutex::new(FakeState::default()));

        let server_state = state.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let state = server_state.clone();
                tokio::spawn(async move {
                    let _ = serve_connection(stream, state).await;
                });
            }
        });

        Self { addr, state }
    }

    pub fn endpoint(&self) -> DeviceEndpoint {
        DeviceEndpoint::parse(&format!("http://{}", self.addr)).expect("fake device endpoint")
    }

    pub fn set_status(&self, status: MotorState) {
        self.state.lock().unwrap().status = status;
    }

    pub fn status(&self) -> MotorState {
        self.state.lock().unwrap().status
    }

    /// Request targets (path + query) in arrival order
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn push_response(&self, response: FakeResponse) {
        self.state.lock().unwrap().overrides.push_back(response);
    }
}

async fn serve_connection(mut stream: TcpStream, state: Arc<Mutex<FakeState>>) -> Result<()> {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            return Ok(());
        }
        head.extend_from_slice(&buf[..n]);
    }

    let head = String::from_utf8_lossy(&head);
    let target = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();

    let reply = {
        let mut state = state.lock().unwrap();
        state.requests.push(target.clone());
        match state.overrides.pop_front() {
            Some(reply) => reply,
            None => route(&mut state.status, &target),
        }
    };

    let (code, body) = match reply {
        FakeResponse::Hang => {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            return Ok(());
        }
        FakeResponse::Status(code) => (code, String::new()),
        FakeResponse::Body(body) => (200, body),
    };

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        code,
        if code == 200 { "OK" } else { "Error" },
        body.len(),
        body
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await?;
    Ok(())
}

fn route(status: &mut MotorState, target: &str) -> FakeResponse {
    let Ok(url) = url::Url::parse(&format!("http://fake{}", target)) else {
        return FakeResponse::Status(400);
    };

    match url.path() {
        "/status" => FakeResponse::Body(status_json(status)),
        "/control" => {
            let mut cmd = String::new();
            let mut val = String::new();
            for (key, value) in url.query_pairs() {
                match key.as_ref() {
                    "cmd" => cmd = value.into_owned(),
                    "val" => val = value.into_owned(),
                    _ => {}
                }
            }
            apply_command(status, &cmd, &val);
            FakeResponse::Body(format!("OK {} {}", cmd, val))
        }
        _ => FakeResponse::Status(404),
    }
}

fn apply_command(status: &mut MotorState, cmd: &str, val: &str) {
    match cmd {
        "enable" => status.motor_enabled = true,
        "disable" => {
            status.motor_enabled = false;
            status.speed_percentage = 0;
            status.direction = Direction::None;
        }
        "speed" => status.speed_percentage = val.parse().unwrap_or(0),
        "direction" => status.direction = Direction::parse(val).unwrap_or_default(),
        "step_mode" => status.step_mode = StepMode::parse(val).unwrap_or_default(),
        "enable_torque" => status.torque_enabled = true,
        "disable_torque" => status.torque_enabled = false,
        "rotate_angle" => {
            let degrees: i64 = val.parse().unwrap_or(0);
            let steps_per_rev = match status.step_mode {
                StepMode::Full => 2048,
                StepMode::Half => 4096,
            };
            status.current_step += degrees * steps_per_rev / 360;
        }
        "return_to_zero" => status.current_step = 0,
        _ => {}
    }
}

/// Serialise a state the way the firmware does
pub fn status_json(status: &MotorState) -> String {
    serde_json::json!({
        "currentStep": status.current_step,
        "direction": match status.direction {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::None => "stop",
        },
        "stepMode": status.step_mode.as_str(),
        "motorEnabled": status.motor_enabled,
        "torqueEnabled": status.torque_enabled,
        "speed": status.speed_percentage,
    })
    .to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// ScriptedTransport
// ─────────────────────────────────────────────────────────────────────────────

/// Queued outcome for a scripted request
#[derive(Debug, Clone)]
pub enum Scripted<T> {
    Ok(T),
    Transport(String),
    Malformed(String),
}

impl<T> Scripted<T> {
    fn into_result(self) -> Result<T> {
        match self {
            Scripted::Ok(value) => Ok(value),
            Scripted::Transport(message) => Err(Error::transport(message)),
            Scripted::Malformed(message) => Err(Error::malformed(message)),
        }
    }
}

#[derive(Debug, Default)]
struct Script {
    statuses: VecDeque<(Duration, Scripted<MotorState>)>,
    commands: VecDeque<Scripted<String>>,
    sent: Vec<DeviceCommand>,
    fallback_status: MotorState,
}

/// Transport that replays queued results.
///
/// When a queue is empty, commands succeed with `"OK"` and status fetches
/// return the fallback state.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    script: Mutex<Script>,
    fetches: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fallback_status(status: MotorState) -> Self {
        let transport = Self::new();
        transport.script.lock().unwrap().fallback_status = status;
        transport
    }

    pub fn push_status(&self, result: Scripted<MotorState>) {
        self.push_status_after(Duration::ZERO, result);
    }

    /// Queue a status result that resolves only after `delay`
    pub fn push_status_after(&self, delay: Duration, result: Scripted<MotorState>) {
        self.script
            .lock()
            .unwrap()
            .statuses
            .push_back((delay, result));
    }

    pub fn push_command_result(&self, result: Scripted<String>) {
        self.script.lock().unwrap().commands.push_back(result);
    }

    /// Commands received so far, in order
    pub fn sent_commands(&self) -> Vec<DeviceCommand> {
        self.script.lock().unwrap().sent.clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl DeviceTransport for ScriptedTransport {
    async fn send_command(&self, command: &DeviceCommand) -> Result<String> {
        let next = {
            let mut script = self.script.lock().unwrap();
            script.sent.push(*command);
            script.commands.pop_front()
        };
        next.unwrap_or_else(|| Scripted::Ok("OK".to_string()))
            .into_result()
    }

    async fn fetch_status(&self) -> Result<MotorState> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let (delay, next) = {
            let mut script = self.script.lock().unwrap();
            let fallback = script.fallback_status;
            script
                .statuses
                .pop_front()
                .unwrap_or((Duration::ZERO, Scripted::Ok(fallback)))
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        next.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_json_round_trips_through_parser() {
        let status = MotorState {
            motor_enabled: true,
            torque_enabled: false,
            direction: Direction::Left,
            speed_percentage: 12,
            step_mode: StepMode::Half,
            current_step: -30,
        };
        assert_eq!(crate::parse_status(&status_json(&status)).unwrap(), status);
    }

    #[test]
    fn test_fake_disable_clears_motion() {
        let mut status = MotorState {
            motor_enabled: true,
            speed_percentage: 50,
            direction: Direction::Right,
            ..Default::default()
        };
        apply_command(&mut status, "disable", "");
        assert!(!status.motor_enabled);
        assert_eq!(status.speed_percentage, 0);
        assert_eq!(status.direction, Direction::None);
    }

    #[tokio::test]
    async fn test_scripted_transport_replays_in_order() {
        let transport = ScriptedTransport::new();
        transport.push_status(Scripted::Transport("down".into()));
        transport.push_command_result(Scripted::Malformed("bad".into()));

        assert!(transport.fetch_status().await.is_err());
        assert!(transport.fetch_status().await.is_ok());
        assert!(transport
            .send_command(&DeviceCommand::Enable)
            .await
            .is_err());
        assert!(transport.send_command(&DeviceCommand::Enable).await.is_ok());

        assert_eq!(transport.fetch_count(), 2);
        assert_eq!(
            transport.sent_commands(),
            vec![DeviceCommand::Enable, DeviceCommand::Enable]
        );
    }
}
