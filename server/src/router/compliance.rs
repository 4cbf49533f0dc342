//! Hours-of-service compliance checks over a finished duty timeline.
//!
//! Every segment is checked on its own; there is no memory across
//! segments and repeated violations are all reported.

use super::router_types::segment::DutySegment;
use super::schedule::{MAX_DRIVING_HOURS, MAX_DUTY_HOURS};
use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Flat on-duty ceiling of the 70-hour/8-day cycle
pub const MAX_CYCLE_HOURS: f64 = 70.0;

/// Days in the rolling duty cycle
pub const DAYS_IN_CYCLE: u32 = 8;

/// The rule that was broken
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// More than 11 cumulative driving hours
    DrivingLimit,

    /// More than 14 cumulative on-duty hours
    DutyLimit,

    /// More than 70 on-duty hours in the cycle
    CycleLimit,
}

impl Display for ViolationKind {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            ViolationKind::DrivingLimit => {
                write!(f, "{}-hour driving limit", MAX_DRIVING_HOURS as u32)
            }
            ViolationKind::DutyLimit => write!(f, "{}-hour duty limit", MAX_DUTY_HOURS as u32),
            ViolationKind::CycleLimit => write!(
                f,
                "{}-hour/{}-day limit",
                MAX_CYCLE_HOURS as u32, DAYS_IN_CYCLE
            ),
        }
    }
}

/// A rule violation found at one timeline segment.
///
/// Serialized as its message, e.g.
/// `"Violation: Exceeded 11-hour driving limit at Chicago"`.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Which rule
    pub kind: ViolationKind,

    /// Name of the segment location
    pub location: String,
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "Violation: Exceeded {} at {}", self.kind, self.location)
    }
}

impl Serialize for Violation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Checks a single segment against every rule.
pub fn check_segment(segment: &DutySegment) -> Vec<Violation> {
    let mut violations = vec![];
    let location = segment.location.name();

    if segment.cumulative_driving_hours > MAX_DRIVING_HOURS {
        violations.push(Violation {
            kind: ViolationKind::DrivingLimit,
            location: location.to_owned(),
        });
    }

    if segment.cumulative_duty_hours > MAX_DUTY_HOURS {
        violations.push(Violation {
            kind: ViolationKind::DutyLimit,
            location: location.to_owned(),
        });
    }

    if segment.cumulative_duty_hours > MAX_CYCLE_HOURS {
        violations.push(Violation {
            kind: ViolationKind::CycleLimit,
            location: location.to_owned(),
        });
    }

    violations
}

/// Checks a whole timeline, returning violations in timeline order.
pub fn check_violations(schedule: &[DutySegment]) -> Vec<Violation> {
    let violations: Vec<Violation> = schedule.iter().flat_map(check_segment).collect();

    if !violations.is_empty() {
        router_warn!(
            "(check_violations) {} violation(s) across {} segment(s).",
            violations.len(),
            schedule.len()
        );
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::router_types::location::Location;
    use crate::router::router_types::status::DutyStatus;
    use chrono::{TimeZone, Utc};

    fn segment(name: &str, driving: f64, duty: f64) -> DutySegment {
        let time = Utc.with_ymd_and_hms(2026, 3, 2, 6, 0, 0).unwrap();
        DutySegment {
            location: Location::new(name, 40.0, -100.0).unwrap(),
            arrival_time: time,
            departure_time: time,
            status: DutyStatus::Driving,
            miles_from_start: 0.0,
            cumulative_driving_hours: driving,
            cumulative_duty_hours: duty,
        }
    }

    #[test]
    fn test_driving_limit() {
        let violations = check_violations(&[segment("Omaha", 12.0, 12.0)]);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::DrivingLimit);
        assert_eq!(
            violations[0].to_string(),
            "Violation: Exceeded 11-hour driving limit at Omaha"
        );
    }

    #[test]
    fn test_duty_and_cycle_limits() {
        let violations = check_violations(&[segment("Reno", 5.0, 75.0)]);
        let messages: Vec<String> = violations.iter().map(|v| v.to_string()).collect();
        assert_eq!(
            messages,
            vec![
                "Violation: Exceeded 14-hour duty limit at Reno",
                "Violation: Exceeded 70-hour/8-day limit at Reno",
            ]
        );
    }

    #[test]
    fn test_limits_are_exclusive() {
        assert!(check_violations(&[segment("Boise", 11.0, 14.0)]).is_empty());
        assert_eq!(check_violations(&[segment("Boise", 11.0, 70.0)]).len(), 1);
    }

    #[test]
    fn test_violations_kept_in_order_without_dedup() {
        let schedule = vec![
            segment("A", 12.0, 12.0),
            segment("B", 1.0, 1.0),
            segment("A", 12.0, 15.0),
        ];
        let kinds: Vec<(ViolationKind, String)> = check_violations(&schedule)
            .into_iter()
            .map(|v| (v.kind, v.location))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (ViolationKind::DrivingLimit, "A".to_owned()),
                (ViolationKind::DrivingLimit, "A".to_owned()),
                (ViolationKind::DutyLimit, "A".to_owned()),
            ]
        );
    }

    #[test]
    fn test_violation_serializes_as_message() {
        let violation = Violation {
            kind: ViolationKind::CycleLimit,
            location: "Tulsa".to_owned(),
        };
        assert_eq!(
            serde_json::to_string(&violation).unwrap(),
            "\"Violation: Exceeded 70-hour/8-day limit at Tulsa\""
        );
    }
}
