//! Time and duration conversion utilities.
//!
//! This module provides safe conversion functions for durations,
//! avoiding truncation issues with explicit saturation behavior,
//! plus the display formats used for sound lengths and player positions.

use std::time::Duration;

/// Extension trait for safe Duration conversions.
pub trait DurationExt {
    /// Convert duration to milliseconds as i64, saturating at `i64::MAX`.
    ///
    /// Used for time-based ids. In practice this never saturates because
    /// `i64::MAX` milliseconds is ~292 million years.
    fn as_millis_i64(&self) -> i64;

    /// Fraction of `total` covered by this duration, in [0.0, 1.0].
    ///
    /// Returns 0.0 for a zero `total`.
    fn fraction_of(&self, total: Duration) -> f32;
}

impl DurationExt for Duration {
    fn as_millis_i64(&self) -> i64 {
        i64::try_from(self.as_millis()).unwrap_or(i64::MAX)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn fraction_of(&self, total: Duration) -> f32 {
        if total.is_zero() {
            return 0.0;
        }
        (self.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0) as f32
    }
}

/// Format a player position as `m:ss` (e.g. `4:05`).
///
/// Hours are folded into minutes, so an hour-long sound ends at `60:00`.
#[must_use]
pub fn format_clock(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Format a sound length as whole minutes (e.g. `10 min`).
#[must_use]
pub fn format_minutes(duration_secs: u32) -> String {
    format!("{} min", duration_secs / 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_millis_i64() {
        let duration = Duration::from_millis(5000);
        assert_eq!(duration.as_millis_i64(), 5000);
    }

    #[test]
    fn test_fraction_of() {
        let position = Duration::from_secs(150);
        assert!((position.fraction_of(Duration::from_secs(600)) - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_fraction_of_zero_total() {
        assert!(Duration::from_secs(5).fraction_of(Duration::ZERO).abs() < f32::EPSILON);
    }

    #[test]
    fn test_fraction_of_clamped() {
        let position = Duration::from_secs(700);
        assert!((position.fraction_of(Duration::from_secs(600)) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(Duration::ZERO), "0:00");
        assert_eq!(format_clock(Duration::from_secs(245)), "4:05");
        assert_eq!(format_clock(Duration::from_secs(3600)), "60:00");
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(600), "10 min");
        assert_eq!(format_minutes(2700), "45 min");
        assert_eq!(format_minutes(59), "0 min");
    }
}
