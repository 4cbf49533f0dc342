//! Conversions between fractional hours and [`chrono`] durations.
//!
//! Durations are kept at microsecond resolution.

use chrono::{DateTime, Duration, Utc};

const MICROSECONDS_PER_HOUR: f64 = 3_600_000_000.0;

/// Converts fractional hours to a [`Duration`].
///
/// Negative and non-finite values yield a zero duration.
pub fn hours(hours: f64) -> Duration {
    if !hours.is_finite() || hours <= 0.0 {
        return Duration::zero();
    }

    Duration::microseconds((hours * MICROSECONDS_PER_HOUR).round() as i64)
}

/// Number of hours from `start` to `end` (negative if `end` is earlier)
pub fn hours_between(start: &DateTime<Utc>, end: &DateTime<Utc>) -> f64 {
    let delta = *end - *start;
    match delta.num_microseconds() {
        Some(us) => us as f64 / MICROSECONDS_PER_HOUR,
        // overflow only past ~292k years
        None => delta.num_milliseconds() as f64 / (MICROSECONDS_PER_HOUR / 1000.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_hours_to_duration() {
        assert_eq!(hours(1.0), Duration::hours(1));
        assert_eq!(hours(0.5), Duration::minutes(30));
        assert_eq!(hours(10.0), Duration::hours(10));
        assert_eq!(hours(0.0), Duration::zero());
        assert_eq!(hours(-3.0), Duration::zero());
        assert_eq!(hours(f64::NAN), Duration::zero());
    }

    #[test]
    fn test_hours_between() {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 1, 2, 6, 30, 0).unwrap();
        assert_eq!(hours_between(&start, &end), 30.5);
        assert_eq!(hours_between(&end, &start), -30.5);
        assert_eq!(hours_between(&start, &start), 0.0);
    }
}
