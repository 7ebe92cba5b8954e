//! Knob angle ⇄ (speed, direction) mapping.
//!
//! The dial reads 0° at the top and grows clockwise. The right half
//! (`[0, 180]`) spins the motor clockwise, the left half (`(180, 360]`)
//! counter-clockwise; in both halves speed grows with distance from the top,
//! peaking at 100% at the bottom (180°).

use std::time::Duration;

use crate::types::Direction;

/// Spin period at full speed
pub const MIN_SPIN_PERIOD: Duration = Duration::from_millis(100);

/// Spin period approached as speed falls towards zero
pub const MAX_SPIN_PERIOD: Duration = Duration::from_millis(2000);

/// Fold an arbitrary angle into `[0, 360]`. Exactly 360 is kept so the
/// counter-clockwise stop position stays distinguishable from 0.
pub fn normalize_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    if (0.0..=360.0).contains(&angle) {
        angle
    } else {
        angle.rem_euclid(360.0)
    }
}

/// Map a knob angle to a speed percentage and direction.
///
/// 180° belongs to the clockwise half.
pub fn angle_to_speed_direction(angle: f64) -> (u8, Direction) {
    let angle = normalize_angle(angle);

    if angle <= 180.0 {
        (scale_to_percent(angle), Direction::Right)
    } else {
        (scale_to_percent(360.0 - angle), Direction::Left)
    }
}

fn scale_to_percent(distance_from_top: f64) -> u8 {
    (distance_from_top / 180.0 * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Inverse of [`angle_to_speed_direction`], used to place the knob.
///
/// `Direction::None` maps to the top of the dial.
pub fn speed_direction_to_angle(speed: u8, direction: Direction) -> f64 {
    let distance = f64::from(speed.min(100)) / 100.0 * 180.0;
    match direction {
        Direction::Right => distance,
        Direction::Left if speed > 0 => 360.0 - distance,
        Direction::Left | Direction::None => 0.0,
    }
}

/// Spin animation period for a speed percentage.
///
/// Returns `None` at 0% so the caller stops the animation instead of
/// scheduling a zero-length one. Otherwise the period falls linearly from
/// just under [`MAX_SPIN_PERIOD`] to [`MIN_SPIN_PERIOD`] at 100%.
pub fn speed_to_animation_duration(speed: u8) -> Option<Duration> {
    if speed == 0 {
        return None;
    }

    let speed = u64::from(speed.min(100));
    let max = MAX_SPIN_PERIOD.as_millis() as u64;
    let min = MIN_SPIN_PERIOD.as_millis() as u64;

    Some(Duration::from_millis(max - (max - min) * speed / 100))
}

/// Angle of a pointer relative to the knob center.
///
/// `dx`/`dy` are screen offsets (y grows downward). The math angle is rotated
/// so 0° points up and increases clockwise.
pub fn pointer_to_angle(dx: f64, dy: f64) -> f64 {
    (dy.atan2(dx).to_degrees() + 90.0 + 360.0) % 360.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_clockwise_half_maps_linearly() {
        for angle in (0..=180).map(f64::from) {
            let (speed, direction) = angle_to_speed_direction(angle);
            assert_eq!(direction, Direction::Right, "angle {}", angle);
            assert_eq!(speed, (angle / 180.0 * 100.0).round() as u8);
        }
    }

    #[test]
    fn test_counter_clockwise_half_maps_inversely() {
        for angle in (181..=360).map(f64::from) {
            let (speed, direction) = angle_to_speed_direction(angle);
            assert_eq!(direction, Direction::Left, "angle {}", angle);
            assert_eq!(speed, ((360.0 - angle) / 180.0 * 100.0).round() as u8);
        }
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(angle_to_speed_direction(0.0), (0, Direction::Right));
        assert_eq!(angle_to_speed_direction(180.0), (100, Direction::Right));
        assert_eq!(angle_to_speed_direction(360.0), (0, Direction::Left));
        assert_eq!(angle_to_speed_direction(180.5).1, Direction::Left);
    }

    #[test]
    fn test_out_of_range_angles_wrap() {
        assert_eq!(angle_to_speed_direction(450.0), (50, Direction::Right));
        assert_eq!(angle_to_speed_direction(-90.0), (50, Direction::Left));
        assert_eq!(angle_to_speed_direction(f64::NAN), (0, Direction::Right));
    }

    #[test]
    fn test_speed_direction_to_angle_inverts_mapping() {
        for speed in [1u8, 25, 50, 99, 100] {
            for direction in [Direction::Left, Direction::Right] {
                let angle = speed_direction_to_angle(speed, direction);
                let (back_speed, back_direction) = angle_to_speed_direction(angle);
                assert_eq!(back_speed, speed);
                if speed < 100 {
                    assert_eq!(back_direction, direction);
                }
            }
        }
        assert_eq!(speed_direction_to_angle(40, Direction::None), 0.0);
        assert_eq!(speed_direction_to_angle(0, Direction::Left), 0.0);
    }

    #[test]
    fn test_zero_speed_disables_animation() {
        assert_eq!(speed_to_animation_duration(0), None);
    }

    #[test]
    fn test_full_speed_is_fastest_period() {
        assert_eq!(speed_to_animation_duration(100), Some(MIN_SPIN_PERIOD));
    }

    #[test]
    fn test_animation_period_decreases_with_speed() {
        let mut previous = MAX_SPIN_PERIOD;
        for speed in 1..=100u8 {
            let period = speed_to_animation_duration(speed).unwrap();
            assert!(period < previous, "speed {} gave {:?}", speed, period);
            assert!(period >= MIN_SPIN_PERIOD);
            previous = period;
        }
    }

    #[test]
    fn test_pointer_to_angle_cardinal_points() {
        // Screen coordinates: y grows downward
        assert!(approx(pointer_to_angle(0.0, -1.0), 0.0)); // up
        assert!(approx(pointer_to_angle(1.0, 0.0), 90.0)); // right
        assert!(approx(pointer_to_angle(0.0, 1.0), 180.0)); // down
        assert!(approx(pointer_to_angle(-1.0, 0.0), 270.0)); // left
    }

    #[test]
    fn test_pointer_to_angle_stays_in_range() {
        for (dx, dy) in [(-1.0, -1.0), (1.0, -1.0), (-0.001, -1.0), (0.3, 0.9)] {
            let angle = pointer_to_angle(dx, dy);
            assert!((0.0..360.0).contains(&angle), "{} out of range", angle);
        }
        assert!(approx(pointer_to_angle(-1.0, -1.0), 315.0));
    }
}
