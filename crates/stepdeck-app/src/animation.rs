//! Motor spin animation state
//!
//! One animation slot. Starting replaces whatever was running; stopping is
//! idempotent. The renderer reads [`SpinAnimation::frame`].

use std::time::Duration;

use stepdeck_core::{speed_to_animation_duration, Direction};

/// Number of frames in one revolution of the spinner
pub const SPIN_FRAMES: usize = 8;

/// Parameters of a running spin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spin {
    pub clockwise: bool,
    pub period: Duration,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpinAnimation {
    spin: Option<Spin>,
    /// Position within one revolution, `[0, 1)`
    phase: f64,
}

impl SpinAnimation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the animation for a direction and speed.
    ///
    /// Zero speed stops instead. Anything other than `Left` spins clockwise.
    pub fn start(&mut self, direction: Direction, speed: u8) {
        match speed_to_animation_duration(speed) {
            Some(period) => {
                self.spin = Some(Spin {
                    clockwise: direction != Direction::Left,
                    period,
                });
            }
            None => self.stop(),
        }
    }

    /// Stop and return to the resting frame
    pub fn stop(&mut self) {
        self.spin = None;
        self.phase = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.spin.is_some()
    }

    pub fn spin(&self) -> Option<Spin> {
        self.spin
    }

    /// Advance by wall-clock time
    pub fn advance(&mut self, elapsed: Duration) {
        let Some(spin) = self.spin else {
            return;
        };
        let turns = elapsed.as_secs_f64() / spin.period.as_secs_f64();
        let delta = if spin.clockwise { turns } else { -turns };
        self.phase = (self.phase + delta).rem_euclid(1.0);
    }

    /// Current frame index, `0..SPIN_FRAMES`
    pub fn frame(&self) -> usize {
        ((self.phase * SPIN_FRAMES as f64).floor() as usize) % SPIN_FRAMES
    }
}
