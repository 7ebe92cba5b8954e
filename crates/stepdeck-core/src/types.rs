//! Motor domain types shared by the device client, app and TUI layers

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::mapper;

/// Rotational direction as reported by the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Counter-clockwise
    Left,
    /// Clockwise
    Right,
    /// Stopped
    #[default]
    None,
}

impl Direction {
    /// Parse the device's direction string.
    ///
    /// The firmware reports `stop`/`stopped` for a halted motor, and some
    /// builds send `none`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            "none" | "stop" | "stopped" => Some(Direction::None),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Direction::Left => "Left",
            Direction::Right => "Right",
            Direction::None => "Stopped",
        }
    }
}

/// Stepping resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepMode {
    #[default]
    Full,
    Half,
}

impl StepMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "full" => Some(StepMode::Full),
            "half" => Some(StepMode::Half),
            _ => None,
        }
    }

    /// Wire value used in `step_mode` commands
    pub fn as_str(&self) -> &'static str {
        match self {
            StepMode::Full => "full",
            StepMode::Half => "half",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StepMode::Full => "Full step",
            StepMode::Half => "Half step",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            StepMode::Full => StepMode::Half,
            StepMode::Half => StepMode::Full,
        }
    }
}

/// Local mirror of the device's motor state.
///
/// Replaced wholesale by every successful status fetch; fields are never
/// merged from partial data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MotorState {
    pub motor_enabled: bool,
    pub torque_enabled: bool,
    pub direction: Direction,
    /// 0..=100
    pub speed_percentage: u8,
    pub step_mode: StepMode,
    /// Position counter owned by the device
    pub current_step: i64,
}

impl MotorState {
    /// Speed is the authority for motion; a stale nonzero direction on a
    /// stopped motor does not count.
    pub fn is_moving(&self) -> bool {
        self.motor_enabled && self.speed_percentage > 0
    }
}

/// Client-local knob position. Speed and direction are always derived from
/// the angle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KnobState {
    angle_degrees: f64,
}

impl KnobState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_angle(angle: f64) -> Self {
        let mut knob = Self::new();
        knob.set_angle(angle);
        knob
    }

    pub fn angle(&self) -> f64 {
        self.angle_degrees
    }

    /// Set the angle, keeping it within `[0, 360]`
    pub fn set_angle(&mut self, angle: f64) {
        self.angle_degrees = mapper::normalize_angle(angle);
    }

    /// Rotate by `delta` degrees, wrapping around the dial
    pub fn rotate_by(&mut self, delta: f64) {
        self.angle_degrees = (self.angle_degrees + delta).rem_euclid(360.0);
    }

    pub fn reset(&mut self) {
        self.angle_degrees = 0.0;
    }

    pub fn speed_percentage(&self) -> u8 {
        mapper::angle_to_speed_direction(self.angle_degrees).0
    }

    pub fn direction(&self) -> Direction {
        mapper::angle_to_speed_direction(self.angle_degrees).1
    }

    /// Direction label, showing "Stopped" at zero speed
    pub fn direction_label(&self) -> &'static str {
        if self.speed_percentage() == 0 {
            Direction::None.label()
        } else {
            self.direction().label()
        }
    }
}

/// Connection health for the current poll/command cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Connected,
    #[default]
    Disconnected,
    /// The device answered but the payload was unusable
    Error,
}

impl ConnectionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionStatus::Connected => "Connected",
            ConnectionStatus::Disconnected => "Disconnected",
            ConnectionStatus::Error => "Error",
        }
    }

    /// Status produced by a failed request
    pub fn from_error(error: &Error) -> Self {
        match error {
            Error::MalformedResponse { .. } => ConnectionStatus::Error,
            _ => ConnectionStatus::Disconnected,
        }
    }
}

/// Direction argument of the `direction` command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionCommand {
    Left,
    Right,
    Stop,
}

impl DirectionCommand {
    /// Command for a knob reading: zero speed always means stop
    pub fn from_knob(speed: u8, direction: Direction) -> Self {
        match direction {
            _ if speed == 0 => DirectionCommand::Stop,
            Direction::Left => DirectionCommand::Left,
            Direction::Right => DirectionCommand::Right,
            Direction::None => DirectionCommand::Stop,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DirectionCommand::Left => "left",
            DirectionCommand::Right => "right",
            DirectionCommand::Stop => "stop",
        }
    }
}

/// Control commands accepted by `GET /control?cmd=..&val=..`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceCommand {
    Enable,
    Disable,
    /// 0..=100
    Speed(u8),
    Direction(DirectionCommand),
    StepMode(StepMode),
    /// Absolute angle in degrees, 0..=360
    RotateAngle(u16),
    Oscillate,
    EnableTorque,
    DisableTorque,
    ReturnToZero,
}

impl DeviceCommand {
    /// Wire name for the `cmd` query parameter
    pub fn name(&self) -> &'static str {
        match self {
            DeviceCommand::Enable => "enable",
            DeviceCommand::Disable => "disable",
            DeviceCommand::Speed(_) => "speed",
            DeviceCommand::Direction(_) => "direction",
            DeviceCommand::StepMode(_) => "step_mode",
            DeviceCommand::RotateAngle(_) => "rotate_angle",
            DeviceCommand::Oscillate => "oscillate",
            DeviceCommand::EnableTorque => "enable_torque",
            DeviceCommand::DisableTorque => "disable_torque",
            DeviceCommand::ReturnToZero => "return_to_zero",
        }
    }

    /// Wire value for the `val` query parameter, if the command takes one
    pub fn value(&self) -> Option<String> {
        match self {
            DeviceCommand::Speed(speed) => Some(speed.to_string()),
            DeviceCommand::Direction(direction) => Some(direction.as_str().to_string()),
            DeviceCommand::StepMode(mode) => Some(mode.as_str().to_string()),
            DeviceCommand::RotateAngle(angle) => Some(angle.to_string()),
            _ => None,
        }
    }

    /// Parse a `name [value]` line, as typed in headless mode.
    ///
    /// Values go through the same validation as the TUI inputs.
    pub fn parse(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let name = parts
            .next()
            .ok_or_else(|| Error::validation("Empty command"))?;
        let value = parts.next();

        let require = |what: &str| {
            value.ok_or_else(|| Error::validation(format!("`{}` needs a {}", name, what)))
        };

        match name {
            "enable" => Ok(DeviceCommand::Enable),
            "disable" => Ok(DeviceCommand::Disable),
            "oscillate" => Ok(DeviceCommand::Oscillate),
            "enable_torque" => Ok(DeviceCommand::EnableTorque),
            "disable_torque" => Ok(DeviceCommand::DisableTorque),
            "return_to_zero" => Ok(DeviceCommand::ReturnToZero),
            "speed" => {
                let raw = require("speed between 0 and 100")?;
                match raw.parse::<u8>() {
                    Ok(speed) if speed <= 100 => Ok(DeviceCommand::Speed(speed)),
                    _ => Err(Error::validation("Speed must be between 0 and 100.")),
                }
            }
            "direction" => match require("direction")? {
                "left" => Ok(DeviceCommand::Direction(DirectionCommand::Left)),
                "right" => Ok(DeviceCommand::Direction(DirectionCommand::Right)),
                "stop" => Ok(DeviceCommand::Direction(DirectionCommand::Stop)),
                other => Err(Error::validation(format!(
                    "Unknown direction `{}` (expected left, right or stop).",
                    other
                ))),
            },
            "step_mode" => {
                let raw = require("step mode")?;
                StepMode::parse(raw)
                    .map(DeviceCommand::StepMode)
                    .ok_or_else(|| Error::validation("Step mode must be `full` or `half`."))
            }
            "rotate_angle" => {
                let raw = require("angle")?;
                validate_rotation_angle(raw).map(DeviceCommand::RotateAngle)
            }
            other => Err(Error::validation(format!("Unknown command `{}`", other))),
        }
    }
}

/// Validate operator input for rotate-by-angle.
///
/// Accepts whole or fractional degrees in `0..=360`; fractions are rounded
/// to the nearest degree.
pub fn validate_rotation_angle(input: &str) -> Result<u16> {
    let message = "Enter an angle between 0 and 360 degrees.";
    let angle: f64 = input
        .trim()
        .parse()
        .map_err(|_| Error::validation(message))?;

    if !angle.is_finite() || !(0.0..=360.0).contains(&angle) {
        return Err(Error::validation(message));
    }

    Ok(angle.round() as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parse_accepts_device_spellings() {
        assert_eq!(Direction::parse("left"), Some(Direction::Left));
        assert_eq!(Direction::parse("RIGHT"), Some(Direction::Right));
        assert_eq!(Direction::parse("stop"), Some(Direction::None));
        assert_eq!(Direction::parse("stopped"), Some(Direction::None));
        assert_eq!(Direction::parse("none"), Some(Direction::None));
        assert_eq!(Direction::parse("sideways"), None);
        assert_eq!(Direction::parse(""), None);
    }

    #[test]
    fn test_step_mode_parse_and_toggle() {
        assert_eq!(StepMode::parse("half"), Some(StepMode::Half));
        assert_eq!(StepMode::parse("Full"), Some(StepMode::Full));
        assert_eq!(StepMode::parse("quarter"), None);
        assert_eq!(StepMode::Full.toggled(), StepMode::Half);
        assert_eq!(StepMode::Half.toggled(), StepMode::Full);
    }

    #[test]
    fn test_is_moving_uses_speed_as_authority() {
        let stale = MotorState {
            motor_enabled: true,
            direction: Direction::Right,
            speed_percentage: 0,
            ..Default::default()
        };
        assert!(!stale.is_moving());

        let moving = MotorState {
            motor_enabled: true,
            direction: Direction::None,
            speed_percentage: 30,
            ..Default::default()
        };
        assert!(moving.is_moving());

        let disabled = MotorState {
            motor_enabled: false,
            speed_percentage: 80,
            ..Default::default()
        };
        assert!(!disabled.is_moving());
    }

    #[test]
    fn test_knob_derives_speed_and_direction() {
        let knob = KnobState::with_angle(90.0);
        assert_eq!(knob.speed_percentage(), 50);
        assert_eq!(knob.direction(), Direction::Right);

        let knob = KnobState::with_angle(270.0);
        assert_eq!(knob.speed_percentage(), 50);
        assert_eq!(knob.direction(), Direction::Left);
    }

    #[test]
    fn test_knob_direction_label_stopped_at_zero() {
        assert_eq!(KnobState::new().direction_label(), "Stopped");
        assert_eq!(KnobState::with_angle(360.0).direction_label(), "Stopped");
        assert_eq!(KnobState::with_angle(45.0).direction_label(), "Right");
    }

    #[test]
    fn test_knob_rotate_wraps() {
        let mut knob = KnobState::with_angle(355.0);
        knob.rotate_by(10.0);
        assert!((knob.angle() - 5.0).abs() < 1e-9);

        knob.rotate_by(-10.0);
        assert!((knob.angle() - 355.0).abs() < 1e-9);
    }

    #[test]
    fn test_connection_status_from_error() {
        assert_eq!(
            ConnectionStatus::from_error(&Error::transport("refused")),
            ConnectionStatus::Disconnected
        );
        assert_eq!(
            ConnectionStatus::from_error(&Error::malformed("missing speed")),
            ConnectionStatus::Error
        );
    }

    #[test]
    fn test_direction_command_from_knob() {
        assert_eq!(
            DirectionCommand::from_knob(0, Direction::Right),
            DirectionCommand::Stop
        );
        assert_eq!(
            DirectionCommand::from_knob(40, Direction::Left),
            DirectionCommand::Left
        );
        assert_eq!(
            DirectionCommand::from_knob(40, Direction::Right),
            DirectionCommand::Right
        );
    }

    #[test]
    fn test_command_wire_names_and_values() {
        assert_eq!(DeviceCommand::Enable.name(), "enable");
        assert_eq!(DeviceCommand::Enable.value(), None);
        assert_eq!(DeviceCommand::Speed(42).value().as_deref(), Some("42"));
        assert_eq!(
            DeviceCommand::Direction(DirectionCommand::Stop)
                .value()
                .as_deref(),
            Some("stop")
        );
        assert_eq!(DeviceCommand::StepMode(StepMode::Half).name(), "step_mode");
        assert_eq!(
            DeviceCommand::RotateAngle(360).value().as_deref(),
            Some("360")
        );
        assert_eq!(DeviceCommand::ReturnToZero.name(), "return_to_zero");
    }

    #[test]
    fn test_command_parse() {
        assert_eq!(
            DeviceCommand::parse("speed 40").unwrap(),
            DeviceCommand::Speed(40)
        );
        assert_eq!(
            DeviceCommand::parse("  enable_torque ").unwrap(),
            DeviceCommand::EnableTorque
        );
        assert_eq!(
            DeviceCommand::parse("rotate_angle 90").unwrap(),
            DeviceCommand::RotateAngle(90)
        );
        assert!(DeviceCommand::parse("speed 140").is_err());
        assert!(DeviceCommand::parse("rotate_angle 400").is_err());
        assert!(DeviceCommand::parse("direction up").is_err());
        assert!(DeviceCommand::parse("speed").is_err());
        assert!(DeviceCommand::parse("dance").is_err());
        assert!(DeviceCommand::parse("").is_err());
    }

    #[test]
    fn test_validate_rotation_angle() {
        assert_eq!(validate_rotation_angle("0").unwrap(), 0);
        assert_eq!(validate_rotation_angle("360").unwrap(), 360);
        assert_eq!(validate_rotation_angle(" 90.4 ").unwrap(), 90);

        let err = validate_rotation_angle("400").unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(validate_rotation_angle("-1").is_err());
        assert!(validate_rotation_angle("abc").is_err());
        assert!(validate_rotation_angle("").is_err());
        assert!(validate_rotation_angle("NaN").is_err());
    }
}
