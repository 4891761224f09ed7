use chrono::Timelike;
use std::f32::consts::PI;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The point `distance` away along `angle`, measured counter-clockwise
    /// from 3 o'clock. Screen y grows downward, so the sine term is negated.
    pub fn polar(self, distance: f32, angle: f32) -> Self {
        Self {
            x: self.x + angle.cos() * distance,
            y: self.y - angle.sin() * distance,
        }
    }

    pub fn distance_to(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Angle of hour slot `index` on a dial of `slots` divisions.
/// Slot 0 sits at 12 o'clock and the slots proceed clockwise.
pub fn slot_angle(index: usize, slots: usize) -> f32 {
    PI / 2.0 - index as f32 * (2.0 * PI / slots as f32)
}

/// Hand angles in radians, counter-clockwise from 3 o'clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandAngles {
    pub hour: f32,
    pub minute: f32,
    pub second: f32,
}

impl HandAngles {
    /// The hour hand makes one turn per day.
    pub fn at<T: Timelike>(time: &T) -> Self {
        let hours = time.hour() as f32;
        let minutes = time.minute() as f32;
        let seconds = time.second() as f32;

        Self {
            hour: PI / 2.0 - (hours + minutes / 60.0 + seconds / 3600.0) * (2.0 * PI / 24.0),
            minute: PI / 2.0 - (minutes + seconds / 60.0) * (2.0 * PI / 60.0),
            second: PI / 2.0 - seconds * (2.0 * PI / 60.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    const EPSILON: f32 = 1e-4;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn midnight_points_everything_up() {
        let angles = HandAngles::at(&NaiveTime::from_hms_opt(0, 0, 0).unwrap());
        assert!(close(angles.hour, PI / 2.0));
        assert!(close(angles.minute, PI / 2.0));
        assert!(close(angles.second, PI / 2.0));
    }

    #[test]
    fn six_in_the_morning_is_a_quarter_turn() {
        let angles = HandAngles::at(&NaiveTime::from_hms_opt(6, 0, 0).unwrap());
        assert!(close(angles.hour, 0.0));
        assert!(close(angles.minute, PI / 2.0));
        assert!(close(angles.second, PI / 2.0));
    }

    #[test]
    fn hour_hand_creeps_with_minutes_and_seconds() {
        let angles = HandAngles::at(&NaiveTime::from_hms_opt(12, 30, 36).unwrap());
        let expected = PI / 2.0 - 12.51 * (2.0 * PI / 24.0);
        assert!(close(angles.hour, expected));
        let expected = PI / 2.0 - 30.6 * (2.0 * PI / 60.0);
        assert!(close(angles.minute, expected));
    }

    #[test]
    fn slot_six_matches_six_oclock_hour_hand() {
        let angles = HandAngles::at(&NaiveTime::from_hms_opt(6, 0, 0).unwrap());
        assert!(close(slot_angle(6, 24), angles.hour));
    }

    #[test]
    fn polar_points_up_for_a_quarter_turn() {
        let tip = Point::new(10.0, 10.0).polar(5.0, PI / 2.0);
        assert!(close(tip.x, 10.0));
        assert!(close(tip.y, 5.0));
    }
}
