//! Definition for the [`DutyStatus`] type, implemented by an enum.
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Represent the duty status of a driver during a [`super::segment::DutySegment`].
#[derive(Debug, PartialEq, Hash, Eq, Copy, Clone, Serialize, Deserialize)]
pub enum DutyStatus {
    /// Behind the wheel. Counts toward driving and duty hours.
    #[serde(rename = "Driving")]
    Driving,

    /// On duty, not driving (fueling, loading, unloading).
    #[serde(rename = "On Duty")]
    OnDuty,

    /// Sleeper berth. Counts toward neither counter.
    #[serde(rename = "Sleeper")]
    Sleeper,

    /// Off duty. Long enough periods reset the counters.
    #[serde(rename = "Off Duty")]
    OffDuty,
}

impl DutyStatus {
    /// All statuses, in log-sheet row order
    pub const ALL: [DutyStatus; 4] = [
        DutyStatus::OffDuty,
        DutyStatus::Sleeper,
        DutyStatus::Driving,
        DutyStatus::OnDuty,
    ];

    /// Whether time in this status counts toward the driving-hour counter
    pub fn counts_as_driving(&self) -> bool {
        match self {
            DutyStatus::Driving => true,
            DutyStatus::OnDuty | DutyStatus::Sleeper | DutyStatus::OffDuty => false,
        }
    }

    /// Whether time in this status counts toward the duty-hour counter
    pub fn counts_as_duty(&self) -> bool {
        match self {
            DutyStatus::Driving | DutyStatus::OnDuty => true,
            DutyStatus::Sleeper | DutyStatus::OffDuty => false,
        }
    }
}

impl Display for DutyStatus {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            DutyStatus::Driving => write!(f, "Driving"),
            DutyStatus::OnDuty => write!(f, "On Duty"),
            DutyStatus::Sleeper => write!(f, "Sleeper"),
            DutyStatus::OffDuty => write!(f, "Off Duty"),
        }
    }
}
