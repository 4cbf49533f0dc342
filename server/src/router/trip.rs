//! Trip orchestration.
//!
//! Resolves the three waypoints of a trip, plans fuel stops, builds the
//! duty timeline and checks it for violations.

use super::compliance::{check_violations, Violation, MAX_CYCLE_HOURS};
use super::fuel::{plan_fuel_stops, FuelStopPolicy};
use super::router_types::leg::Leg;
use super::router_types::location::{Location, LocationError};
use super::router_types::segment::DutySegment;
use super::router_types::status::DutyStatus;
use super::router_utils::clock;
use super::schedule::{build_schedule, ScheduleInput};
use crate::config::Config;
use crate::resolver::{LocationCache, WaypointResolver};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Longest accepted place name, in characters
pub const MAX_LOCATION_LENGTH: usize = 200;

/// Errors raised for a malformed [`TripRequest`]
#[derive(Debug, Clone, PartialEq)]
pub enum TripError {
    /// The named field is empty or whitespace
    EmptyLocation(&'static str),

    /// The named field is longer than [`MAX_LOCATION_LENGTH`]
    LocationTooLong(&'static str),

    /// Cycle hours are not finite or outside of [0, 70]
    InvalidCycleHours(f64),
}

impl Display for TripError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            TripError::EmptyLocation(field) => write!(f, "{field} must not be empty"),
            TripError::LocationTooLong(field) => write!(
                f,
                "{field} must be at most {MAX_LOCATION_LENGTH} characters"
            ),
            TripError::InvalidCycleHours(hours) => write!(
                f,
                "current cycle hours must be between 0 and {MAX_CYCLE_HOURS}, got {hours}"
            ),
        }
    }
}

impl std::error::Error for TripError {}

/// A trip to plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    /// Where the driver is now
    pub current_location: String,

    /// Where the load is picked up
    pub pickup_location: String,

    /// Where the load is delivered
    pub dropoff_location: String,

    /// On-duty hours already used in the 70-hour/8-day cycle
    pub current_cycle_used: f64,
}

impl TripRequest {
    /// Checks the request before any lookup happens.
    pub fn validate(&self) -> Result<(), TripError> {
        let fields = [
            ("current_location", &self.current_location),
            ("pickup_location", &self.pickup_location),
            ("dropoff_location", &self.dropoff_location),
        ];

        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(TripError::EmptyLocation(field));
            }

            if value.chars().count() > MAX_LOCATION_LENGTH {
                return Err(TripError::LocationTooLong(field));
            }
        }

        let cycle = self.current_cycle_used;
        if !cycle.is_finite() || !(0.0..=MAX_CYCLE_HOURS).contains(&cycle) {
            return Err(TripError::InvalidCycleHours(cycle));
        }

        Ok(())
    }
}

/// Headline numbers of a planned trip
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TripSummary {
    /// Highest cumulative driving hours on the timeline
    pub total_driving_hours: f64,

    /// Highest cumulative duty hours on the timeline
    pub total_duty_hours: f64,

    /// Number of planned fuel stops
    pub fuel_stops_count: usize,

    /// Whether any rule was broken
    pub has_violations: bool,
}

/// A planned trip
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripResult {
    /// Route length in miles
    pub total_distance: f64,

    /// Hours from the first arrival to the last departure
    pub total_time: f64,

    /// Planned fuel stops of both legs, in route order
    #[serde(rename = "fueling_stops")]
    pub fuel_stops: Vec<Location>,

    /// The duty timeline
    pub duty_schedule: Vec<DutySegment>,

    /// Violations in timeline order
    pub violations: Vec<Violation>,
}

impl TripResult {
    /// Computes the headline numbers of this trip.
    pub fn summary(&self) -> TripSummary {
        let max_of = |hours: fn(&DutySegment) -> f64| {
            self.duty_schedule.iter().map(hours).fold(0.0, f64::max)
        };

        TripSummary {
            total_driving_hours: max_of(|s| s.cumulative_driving_hours),
            total_duty_hours: max_of(|s| s.cumulative_duty_hours),
            fuel_stops_count: self.fuel_stops.len(),
            has_violations: !self.violations.is_empty(),
        }
    }
}

/// A [`TripResult`] together with its [`TripSummary`], as printed by the
/// command line tool.
#[derive(Debug, Clone, Serialize)]
pub struct TripReport {
    #[serde(flatten)]
    pub trip: TripResult,

    pub summary: TripSummary,
}

impl From<TripResult> for TripReport {
    fn from(trip: TripResult) -> Self {
        let summary = trip.summary();
        TripReport { trip, summary }
    }
}

/// Plans trips against a waypoint resolver.
pub struct TripPlanner {
    resolver: WaypointResolver,
    policy: FuelStopPolicy,
}

impl TripPlanner {
    /// Planner using the default fuel-stop policy
    pub fn new(resolver: WaypointResolver) -> Self {
        TripPlanner {
            resolver,
            policy: FuelStopPolicy::default(),
        }
    }

    /// Builds the resolver and policy selected by the configuration.
    pub fn from_config(config: &Config) -> Result<Self, LocationError> {
        Ok(TripPlanner::new(WaypointResolver::from_config(config)?)
            .with_fuel_stop_policy(config.fuel_stop_policy))
    }

    /// Replaces the fuel-stop policy
    pub fn with_fuel_stop_policy(mut self, policy: FuelStopPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The active fuel-stop policy
    pub fn fuel_stop_policy(&self) -> FuelStopPolicy {
        self.policy
    }

    /// Plans a trip starting now.
    pub fn compute_trip(&self, request: &TripRequest) -> Result<TripResult, TripError> {
        self.compute_trip_at(request, Utc::now())
    }

    /// Plans a trip starting at `start`.
    ///
    /// Deterministic for a deterministic geocoder: the same request and
    /// start always produce the same result.
    pub fn compute_trip_at(
        &self,
        request: &TripRequest,
        start: DateTime<Utc>,
    ) -> Result<TripResult, TripError> {
        request.validate()?;

        router_info!(
            "(compute_trip_at) [{}] -> [{}] -> [{}], cycle used {:.1} h.",
            request.current_location,
            request.pickup_location,
            request.dropoff_location,
            request.current_cycle_used
        );

        let mut cache = LocationCache::new();
        let current = self.resolver.resolve(&mut cache, &request.current_location);
        let pickup = self.resolver.resolve(&mut cache, &request.pickup_location);
        let dropoff = self.resolver.resolve(&mut cache, &request.dropoff_location);

        let legs = [Leg::new(current, pickup.clone()), Leg::new(pickup, dropoff)];
        let total_distance = legs.iter().map(|leg| leg.distance_miles).sum();
        let planned = plan_fuel_stops(&legs);

        let duty_schedule = build_schedule(&ScheduleInput {
            to_pickup: &legs[0],
            to_dropoff: &legs[1],
            fuel_stops: &planned,
            policy: self.policy,
            start_time: start,
            cycle_hours_used: request.current_cycle_used,
        });

        let violations = check_violations(&duty_schedule);
        let total_time = total_time(&duty_schedule);

        router_info!(
            "(compute_trip_at) {:.1} mi, {:.2} h, {} fuel stop(s), {} violation(s).",
            total_distance,
            total_time,
            planned.len(),
            violations.len()
        );

        Ok(TripResult {
            total_distance,
            total_time,
            fuel_stops: planned.into_iter().map(|stop| stop.location).collect(),
            duty_schedule,
            violations,
        })
    }
}

/// Hours from the first segment's arrival to the last segment's departure
fn total_time(schedule: &[DutySegment]) -> f64 {
    match (schedule.first(), schedule.last()) {
        (Some(first), Some(last)) => {
            clock::hours_between(&first.arrival_time, &last.departure_time)
        }
        _ => 0.0,
    }
}

/// Hours per duty status, measured between consecutive segments.
///
/// The gap from one segment's departure to the next segment's arrival
/// is attributed to the earlier segment's status. All four statuses are
/// present in the result.
pub fn summarize_duty_hours(schedule: &[DutySegment]) -> HashMap<DutyStatus, f64> {
    let mut hours: HashMap<DutyStatus, f64> =
        DutyStatus::ALL.iter().map(|status| (*status, 0.0)).collect();

    for pair in schedule.windows(2) {
        let gap = clock::hours_between(&pair[0].departure_time, &pair[1].arrival_time);
        *hours.entry(pair[0].status).or_insert(0.0) += gap;
    }

    hours
}
