//! Application state (Model in TEA pattern)

use std::collections::VecDeque;
use std::time::Instant;

use chrono::{DateTime, Local};

use crate::animation::SpinAnimation;
use crate::config::Settings;
use stepdeck_core::{ConnectionStatus, KnobState, MotorState};

/// Activity entries retained for the log panel
pub const ACTIVITY_CAPACITY: usize = 200;

/// Current UI mode/screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    /// Control panel
    #[default]
    Normal,

    /// Angle prompt capturing digits for rotate-by-angle
    AngleInput,

    /// Blocking alert; the next key dismisses it
    Alert,
}

/// Pointer interaction with the knob
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Dragging,
}

/// Knob hit area in terminal cells, written by the renderer each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnobGeometry {
    pub center_column: f64,
    pub center_row: f64,
    /// Horizontal radius in cells
    pub radius_columns: f64,
    /// Vertical radius in cells
    pub radius_rows: f64,
}

impl KnobGeometry {
    /// Terminal cells are roughly twice as tall as they are wide
    pub const CELL_ASPECT: f64 = 2.0;

    /// Whether a cell lies within the knob's ellipse
    pub fn contains(&self, column: u16, row: u16) -> bool {
        if self.radius_columns <= 0.0 || self.radius_rows <= 0.0 {
            return false;
        }
        let nx = (column as f64 + 0.5 - self.center_column) / self.radius_columns;
        let ny = (row as f64 + 0.5 - self.center_row) / self.radius_rows;
        nx * nx + ny * ny <= 1.0
    }

    /// Offset of a cell from the center, with rows scaled to column units
    pub fn offset(&self, column: u16, row: u16) -> (f64, f64) {
        let dx = column as f64 + 0.5 - self.center_column;
        let dy = (row as f64 + 0.5 - self.center_row) * Self::CELL_ASPECT;
        (dx, dy)
    }
}

/// Severity of an activity entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityLevel {
    Info,
    Warning,
    Error,
}

/// One line of the activity panel
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityEntry {
    pub timestamp: DateTime<Local>,
    pub level: ActivityLevel,
    pub message: String,
}

/// Complete application state (the Model in TEA)
#[derive(Debug)]
pub struct AppState {
    /// Loaded settings
    pub settings: Settings,

    /// Device address shown in the header
    pub device_label: String,

    // ─────────────────────────────────────────────────────────
    // Device mirror
    // ─────────────────────────────────────────────────────────
    /// Last status snapshot; replaced whole on every successful fetch
    pub motor: MotorState,
    pub connection: ConnectionStatus,
    /// When the mirror was last replaced
    pub last_update: Option<DateTime<Local>>,
    /// Number of snapshots applied so far
    pub status_revision: u64,

    // ─────────────────────────────────────────────────────────
    // Operator input
    // ─────────────────────────────────────────────────────────
    pub knob: KnobState,
    pub interaction: Interaction,
    pub knob_geometry: Option<KnobGeometry>,
    pub ui_mode: UiMode,
    pub angle_input: String,
    pub alert: Option<String>,
    pub show_help: bool,

    // ─────────────────────────────────────────────────────────
    // Sync bookkeeping
    // ─────────────────────────────────────────────────────────
    /// Commands sent and not yet resolved
    pub commands_in_flight: usize,
    next_fetch_seq: u64,
    /// Sequence number of the snapshot on screen
    pub applied_fetch_seq: u64,

    pub animation: SpinAnimation,
    pub last_tick: Option<Instant>,
    pub activity: VecDeque<ActivityEntry>,
    quitting: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        let show_help = settings.ui.show_help;
        let device_label = settings.device.base_url.clone();
        Self {
            settings,
            device_label,
            motor: MotorState::default(),
            connection: ConnectionStatus::default(),
            last_update: None,
            status_revision: 0,
            knob: KnobState::new(),
            interaction: Interaction::Idle,
            knob_geometry: None,
            ui_mode: UiMode::Normal,
            angle_input: String::new(),
            alert: None,
            show_help,
            commands_in_flight: 0,
            next_fetch_seq: 0,
            applied_fetch_seq: 0,
            animation: SpinAnimation::new(),
            last_tick: None,
            activity: VecDeque::with_capacity(ACTIVITY_CAPACITY),
            quitting: false,
        }
    }

    /// Allocate the next status fetch sequence number (starts at 1)
    pub fn next_fetch_seq(&mut self) -> u64 {
        self.next_fetch_seq += 1;
        self.next_fetch_seq
    }

    /// Most recently issued fetch sequence number
    pub fn last_issued_fetch_seq(&self) -> u64 {
        self.next_fetch_seq
    }

    pub fn is_dragging(&self) -> bool {
        self.interaction == Interaction::Dragging
    }

    /// Whether any command is waiting on the device
    pub fn is_commanding(&self) -> bool {
        self.commands_in_flight > 0
    }

    /// Modals end any drag in progress
    pub fn show_alert(&mut self, message: impl Into<String>) {
        self.interaction = Interaction::Idle;
        self.alert = Some(message.into());
        self.ui_mode = UiMode::Alert;
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
        self.ui_mode = UiMode::Normal;
    }

    pub fn open_angle_prompt(&mut self) {
        self.interaction = Interaction::Idle;
        self.angle_input.clear();
        self.ui_mode = UiMode::AngleInput;
    }

    pub fn close_angle_prompt(&mut self) {
        self.angle_input.clear();
        self.ui_mode = UiMode::Normal;
    }

    pub fn record_activity(&mut self, level: ActivityLevel, message: impl Into<String>) {
        if self.activity.len() == ACTIVITY_CAPACITY {
            self.activity.pop_front();
        }
        self.activity.push_back(ActivityEntry {
            timestamp: Local::now(),
            level,
            message: message.into(),
        });
    }

    pub fn request_quit(&mut self) {
        self.quitting = true;
    }

    pub fn should_quit(&self) -> bool {
        self.quitting
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = AppState::new();
        assert_eq!(state.motor, MotorState::default());
        assert_eq!(state.connection, ConnectionStatus::Disconnected);
        assert_eq!(state.knob.angle(), 0.0);
        assert_eq!(state.ui_mode, UiMode::Normal);
        assert!(!state.is_dragging());
        assert!(!state.is_commanding());
        assert!(state.last_update.is_none());
    }

    #[test]
    fn test_fetch_seq_is_monotonic() {
        let mut state = AppState::new();
        assert_eq!(state.next_fetch_seq(), 1);
        assert_eq!(state.next_fetch_seq(), 2);
        assert_eq!(state.last_issued_fetch_seq(), 2);
    }

    #[test]
    fn test_alert_round_trip_restores_normal_mode() {
        let mut state = AppState::new();
        state.show_alert("bad angle");
        assert_eq!(state.ui_mode, UiMode::Alert);
        assert_eq!(state.alert.as_deref(), Some("bad angle"));

        state.dismiss_alert();
        assert_eq!(state.ui_mode, UiMode::Normal);
        assert!(state.alert.is_none());
    }

    #[test]
    fn test_activity_is_capped() {
        let mut state = AppState::new();
        for i in 0..ACTIVITY_CAPACITY + 5 {
            state.record_activity(ActivityLevel::Info, format!("entry {i}"));
        }
        assert_eq!(state.activity.len(), ACTIVITY_CAPACITY);
        assert_eq!(state.activity.front().unwrap().message, "entry 5");
    }

    #[test]
    fn test_knob_geometry_hit_test() {
        let geometry = KnobGeometry {
            center_column: 20.0,
            center_row: 10.0,
            radius_columns: 8.0,
            radius_rows: 4.0,
        };
        assert!(geometry.contains(19, 9));
        assert!(geometry.contains(26, 9));
        assert!(!geometry.contains(29, 9));
        assert!(!geometry.contains(19, 15));
    }

    #[test]
    fn test_knob_geometry_offset_scales_rows() {
        let geometry = KnobGeometry {
            center_column: 10.5,
            center_row: 5.5,
            radius_columns: 6.0,
            radius_rows: 3.0,
        };
        assert_eq!(geometry.offset(10, 3), (0.0, -4.0));
        assert_eq!(geometry.offset(13, 5), (3.0, 0.0));
    }
}
