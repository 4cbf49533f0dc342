//! Struct definition for [`DutySegment`], one entry of a duty timeline.

use super::location::Location;
use super::status::DutyStatus;
use crate::router::router_utils::clock;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// One entry in the duty-status timeline.
///
/// Counters are cumulative hours carried through the trip, starting
/// from the hours already used in the current cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DutySegment {
    /// Where the segment takes place; serialized as the location name.
    #[serde(serialize_with = "serialize_location_name")]
    pub location: Location,

    /// When the driver arrives at (or starts) this segment
    pub arrival_time: DateTime<Utc>,

    /// When the driver leaves (or ends) this segment, never before arrival
    pub departure_time: DateTime<Utc>,

    /// Duty status for the segment
    pub status: DutyStatus,

    /// Route miles covered since the trip start
    pub miles_from_start: f64,

    /// Cumulative driving hours
    pub cumulative_driving_hours: f64,

    /// Cumulative on-duty hours (driving included)
    pub cumulative_duty_hours: f64,
}

impl DutySegment {
    /// Time spent in this segment, in hours
    pub fn duration_hours(&self) -> f64 {
        clock::hours_between(&self.arrival_time, &self.departure_time)
    }
}

fn serialize_location_name<S>(location: &Location, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(location.name())
}
