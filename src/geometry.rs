//! Clock geometry: sizing derived from the view's pixel dimensions and hand
//! angles derived from a time reading.
//!
//! Screen angles follow the framebuffer axes (x right, y down) and are
//! measured from +x, so increasing angles sweep clockwise on screen. A hand at
//! angle `-π/2` points at 12 o'clock, one at `0` points at 3 o'clock.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use chrono::{NaiveTime, Timelike};

pub const HOUR_HAND_FRACTION: f64 = 0.5;
pub const MINUTE_HAND_FRACTION: f64 = 0.7;
pub const SECOND_HAND_FRACTION: f64 = 0.9;

/// Divisor applied to `min(width, height)` to obtain the padding.
const PADDING_DIVISOR: u32 = 20;
/// Divisor applied to the radius to obtain the center dot radius.
const CENTER_DOT_DIVISOR: f64 = 12.0;
/// Glyph scale relative to the numeral placement inset.
const TEXT_SIZE_FACTOR: f64 = 1.2;

/// Sizing values derived from the view's measured dimensions.
///
/// Recomputed only when the on-screen size (or the font scale) changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometrySnapshot {
    pub width: u32,
    pub height: u32,
    pub padding: f64,
    pub radius: f64,
    pub cx: f64,
    pub cy: f64,
    pub hour_hand_fraction: f64,
    pub minute_hand_fraction: f64,
    pub second_hand_fraction: f64,
    pub center_radius: f64,
    /// Inset used when placing numerals.
    pub font_size: f64,
    /// Pixel height numerals are rasterised at.
    pub text_size: f64,
}

impl GeometrySnapshot {
    pub fn new(width: u32, height: u32, font_size_scale: f32) -> Self {
        let min_side = width.min(height);
        let padding = (min_side / PADDING_DIVISOR) as f64;
        let radius = (min_side as f64 / 2.0 - padding).floor().max(0.0);
        let scale = font_size_scale as f64;

        Self {
            width,
            height,
            padding,
            radius,
            cx: (width / 2) as f64,
            cy: (height / 2) as f64,
            hour_hand_fraction: HOUR_HAND_FRACTION,
            minute_hand_fraction: MINUTE_HAND_FRACTION,
            second_hand_fraction: SECOND_HAND_FRACTION,
            center_radius: radius / CENTER_DOT_DIVISOR,
            font_size: (radius * scale).floor().max(0.0),
            text_size: (TEXT_SIZE_FACTOR * scale * radius).max(0.0),
        }
    }

    /// Radius of the filled face disc.
    pub fn face_radius(&self) -> f64 {
        (self.width.min(self.height) as f64 / 2.0 - self.padding).max(0.0)
    }

    pub fn is_degenerate(&self) -> bool {
        self.radius <= 0.0
    }

    /// Point at `distance` from the center along a screen angle.
    pub fn point_at(&self, angle: f64, distance: f64) -> (f64, f64) {
        (
            self.cx + distance * angle.cos(),
            self.cy + distance * angle.sin(),
        )
    }

    /// Point at `distance` from the center along a clock bearing
    /// (0 at 12 o'clock, clockwise).
    pub fn point_at_bearing(&self, bearing: f64, distance: f64) -> (f64, f64) {
        (
            self.cx + distance * bearing.sin(),
            self.cy - distance * bearing.cos(),
        )
    }

    pub fn hand_length(&self, hand: Hand) -> f64 {
        let fraction = match hand {
            Hand::Hour => self.hour_hand_fraction,
            Hand::Minute => self.minute_hand_fraction,
            Hand::Second => self.second_hand_fraction,
        };
        self.radius * fraction
    }

    pub fn hand_end(&self, hand: Hand, angle: f64) -> (f64, f64) {
        self.point_at(angle, self.hand_length(hand))
    }

    /// Anchor for numeral `n` (1..=12): horizontally its center, vertically
    /// its baseline.
    pub fn numeral_anchor(&self, n: u32) -> (f64, f64) {
        let angle = PI / 6.0 * (n as f64 - 3.0);
        let distance = self.radius - self.padding - self.font_size;
        let (x, y) = self.point_at(angle, distance);
        (x, y + self.font_size / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hand {
    Hour,
    Minute,
    Second,
}

/// Wall-clock time as shown by the hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeReading {
    hour: u32,
    minute: u32,
    second: u32,
}

impl TimeReading {
    /// Returns `None` outside `00:00:00..=23:59:59`.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Option<Self> {
        (hour < 24 && minute < 60 && second < 60).then_some(Self {
            hour,
            minute,
            second,
        })
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn second(&self) -> u32 {
        self.second
    }
}

impl From<NaiveTime> for TimeReading {
    fn from(time: NaiveTime) -> Self {
        // Leap seconds surface as second 59 with an oversized nanosecond field.
        Self {
            hour: time.hour(),
            minute: time.minute(),
            second: time.second().min(59),
        }
    }
}

impl std::fmt::Display for TimeReading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

pub fn second_angle(seconds: u32) -> f64 {
    PI * (seconds as f64 / 30.0 - 0.5)
}

pub fn minute_angle(minutes: u32) -> f64 {
    PI * (minutes as f64 / 30.0 - 0.5)
}

/// Hour hand angle, advanced linearly by the minutes within the hour.
pub fn hour_angle(hour: u32, minutes: u32) -> f64 {
    PI * (((hour % 12) as f64 + minutes as f64 / 60.0) / 6.0 - 0.5)
}

/// Wraps an angle into `[-π, π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let mut wrapped = (angle + PI).rem_euclid(TAU);
    if wrapped >= TAU {
        wrapped -= TAU;
    }
    wrapped - PI
}

/// Converts a screen angle into a clock bearing in `[0, 2π)`.
pub fn to_bearing(angle: f64) -> f64 {
    let bearing = (angle + FRAC_PI_2).rem_euclid(TAU);
    if bearing >= TAU {
        0.0
    } else {
        bearing
    }
}

/// Screen angles of the three hands, each in `[-π, π)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandAngles {
    pub hour: f64,
    pub minute: f64,
    pub second: f64,
}

impl HandAngles {
    pub fn from_reading(reading: &TimeReading) -> Self {
        Self {
            hour: normalize_angle(hour_angle(reading.hour, reading.minute)),
            minute: normalize_angle(minute_angle(reading.minute)),
            second: normalize_angle(second_angle(reading.second)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn same_direction(a: f64, b: f64) -> bool {
        normalize_angle(a - b).abs() < EPS
    }

    #[test]
    fn reference_snapshot_for_square_view() {
        let geometry = GeometrySnapshot::new(1000, 1000, 0.1);
        assert_eq!(geometry.padding, 50.0);
        assert_eq!(geometry.radius, 450.0);
        assert_eq!((geometry.cx, geometry.cy), (500.0, 500.0));
        assert_eq!(geometry.font_size, 45.0);
        assert!((geometry.text_size - 54.0).abs() < 1e-4);
        assert!((geometry.center_radius - 37.5).abs() < EPS);
        assert_eq!(geometry.hand_length(Hand::Hour), 225.0);
        assert!((geometry.hand_length(Hand::Minute) - 315.0).abs() < EPS);
        assert!((geometry.hand_length(Hand::Second) - 405.0).abs() < EPS);
    }

    #[test]
    fn radius_and_padding_fit_inside_view() {
        for width in (0..400).step_by(7) {
            for height in (0..400).step_by(11) {
                let geometry = GeometrySnapshot::new(width, height, 0.1);
                let half = width.min(height) as f64 / 2.0;
                assert!(
                    geometry.radius + geometry.padding <= half,
                    "{width}x{height}: radius {} padding {}",
                    geometry.radius,
                    geometry.padding
                );
                assert!(geometry.radius >= 0.0);
            }
        }
    }

    #[test]
    fn zero_size_view_is_degenerate() {
        let geometry = GeometrySnapshot::new(0, 0, 0.1);
        assert!(geometry.is_degenerate());
        assert_eq!(geometry.font_size, 0.0);
        assert_eq!(geometry.face_radius(), 0.0);
    }

    #[test]
    fn center_uses_each_axis() {
        let geometry = GeometrySnapshot::new(801, 400, 0.1);
        assert_eq!((geometry.cx, geometry.cy), (400.0, 200.0));
        assert_eq!(geometry.padding, 20.0);
        assert_eq!(geometry.radius, 180.0);
    }

    #[test]
    fn angles_stay_in_range_and_match_formulas() {
        for hour in 0..24 {
            for minute in 0..60 {
                for second in (0..60).step_by(7) {
                    let reading = TimeReading::from_hms(hour, minute, second).unwrap();
                    let angles = HandAngles::from_reading(&reading);
                    for angle in [angles.hour, angles.minute, angles.second] {
                        assert!((-PI..PI).contains(&angle), "{reading}: {angle}");
                    }
                    assert!(same_direction(angles.second, second_angle(second)));
                    assert!(same_direction(angles.minute, minute_angle(minute)));
                    assert!(same_direction(angles.hour, hour_angle(hour, minute)));
                }
            }
        }
    }

    #[test]
    fn hour_hand_advances_with_minutes() {
        for hour in 0..24 {
            let start = TimeReading::from_hms(hour, 0, 0).unwrap();
            let mut previous = HandAngles::from_reading(&start);
            for minute in 1..60 {
                let current =
                    HandAngles::from_reading(&TimeReading::from_hms(hour, minute, 0).unwrap());
                let step = normalize_angle(current.hour - previous.hour);
                assert!(
                    (step - PI / 360.0).abs() < EPS,
                    "{hour}:{minute} stepped by {step}"
                );
                previous = current;
            }
        }
    }

    #[test]
    fn twelve_hour_wraparound() {
        assert_eq!(hour_angle(15, 0), hour_angle(3, 0));
        assert_eq!(hour_angle(0, 30), hour_angle(12, 30));
    }

    #[test]
    fn three_oclock_points_right() {
        let geometry = GeometrySnapshot::new(1000, 1000, 0.1);
        let angles = HandAngles::from_reading(&TimeReading::from_hms(3, 0, 0).unwrap());
        assert!(angles.hour.abs() < EPS);
        assert!((to_bearing(angles.hour) - FRAC_PI_2).abs() < EPS);
        let (x, y) = geometry.hand_end(Hand::Hour, angles.hour);
        assert!((x - 725.0).abs() < EPS);
        assert!((y - 500.0).abs() < EPS);

        // Minute and second hands at 12.
        let (x, y) = geometry.hand_end(Hand::Minute, angles.minute);
        assert!((x - 500.0).abs() < EPS);
        assert!((y - 185.0).abs() < EPS);
    }

    #[test]
    fn half_past_six_points_down_and_just_past_six() {
        let geometry = GeometrySnapshot::new(1000, 1000, 0.1);
        let angles = HandAngles::from_reading(&TimeReading::from_hms(6, 30, 0).unwrap());

        // Minute hand straight down at 6 o'clock.
        let (x, y) = geometry.hand_end(Hand::Minute, angles.minute);
        assert!((x - 500.0).abs() < EPS);
        assert!((y - 815.0).abs() < EPS);

        // Hour hand halfway between 6 and 7: below center, left of it.
        assert!((to_bearing(angles.hour) - 13.0 * PI / 12.0).abs() < EPS);
        let (x, y) = geometry.hand_end(Hand::Hour, angles.hour);
        assert!(x < 500.0);
        assert!(y > 500.0 + 200.0);
    }

    #[test]
    fn quarter_past_nine_places_hands_left_and_right() {
        let geometry = GeometrySnapshot::new(1000, 1000, 0.1);
        let angles = HandAngles::from_reading(&TimeReading::from_hms(9, 15, 0).unwrap());

        let (x, y) = geometry.hand_end(Hand::Minute, angles.minute);
        assert!((x - 815.0).abs() < EPS);
        assert!((y - 500.0).abs() < EPS);

        // A quarter of the way from 9 toward 10: left of center, slightly up.
        assert!((to_bearing(angles.hour) - 9.25 / 12.0 * TAU).abs() < EPS);
        let (x, y) = geometry.hand_end(Hand::Hour, angles.hour);
        assert!(x < 500.0 - 200.0);
        assert!(y < 500.0);
    }

    #[test]
    fn numerals_sit_on_inset_circle() {
        let geometry = GeometrySnapshot::new(1000, 1000, 0.1);
        // 12 at the top, baseline pushed down by half the font size.
        let (x, y) = geometry.numeral_anchor(12);
        assert!((x - 500.0).abs() < EPS);
        assert!((y - (500.0 - 355.0 + 22.5)).abs() < EPS);
        // 3 on the right.
        let (x, y) = geometry.numeral_anchor(3);
        assert!((x - 855.0).abs() < EPS);
        assert!((y - 522.5).abs() < EPS);
    }

    #[test]
    fn bearing_and_screen_points_agree() {
        let geometry = GeometrySnapshot::new(200, 200, 0.1);
        for step in 0..60 {
            let bearing = PI / 30.0 * step as f64;
            let (bx, by) = geometry.point_at_bearing(bearing, 50.0);
            let (sx, sy) = geometry.point_at(bearing - FRAC_PI_2, 50.0);
            assert!((bx - sx).abs() < 1e-9 && (by - sy).abs() < 1e-9);
        }
    }

    #[test]
    fn time_reading_validation() {
        assert!(TimeReading::from_hms(23, 59, 59).is_some());
        assert!(TimeReading::from_hms(24, 0, 0).is_none());
        assert!(TimeReading::from_hms(0, 60, 0).is_none());
        assert!(TimeReading::from_hms(0, 0, 60).is_none());
    }

    #[test]
    fn time_reading_from_chrono() {
        let time = NaiveTime::from_hms_opt(18, 7, 42).unwrap();
        let reading = TimeReading::from(time);
        assert_eq!(
            (reading.hour(), reading.minute(), reading.second()),
            (18, 7, 42)
        );
        assert_eq!(reading.to_string(), "18:07:42");
    }

    #[test]
    fn normalize_wraps_into_half_open_range() {
        assert!((normalize_angle(PI) + PI).abs() < EPS);
        assert!((normalize_angle(3.0 * FRAC_PI_2) + FRAC_PI_2).abs() < EPS);
        assert!((normalize_angle(-PI) + PI).abs() < EPS);
        assert!((normalize_angle(0.25) - 0.25).abs() < EPS);
    }
}
