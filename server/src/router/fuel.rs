//! Fuel-stop planning.
//!
//! Stops are placed every [`FUELING_INTERVAL_MILES`] along each leg. The
//! mileage counter restarts on every leg; leftover miles from one leg do
//! not carry into the next.

use super::router_types::leg::Leg;
use super::router_types::location::Location;
use super::router_utils::haversine;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Maximum miles between refueling
pub const FUELING_INTERVAL_MILES: f64 = 1000.0;

/// A planned refueling point
#[derive(Debug, Clone, PartialEq)]
pub struct FuelStop {
    /// Index of the leg (0 = start → pickup, 1 = pickup → dropoff)
    pub leg_index: usize,

    /// Miles from the start of the leg
    pub leg_miles: f64,

    /// Interpolated position of the stop
    pub location: Location,
}

/// Which planned fuel stops are threaded into the duty schedule.
///
/// Every planned stop is always reported in the trip result. Only the
/// stops selected here show up as timeline segments.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelStopPolicy {
    /// Only the first leg receives fuel-stop segments
    #[default]
    FirstLeg,

    /// Each leg receives its own fuel-stop segments
    EveryLeg,
}

/// Error returned when parsing a [`FuelStopPolicy`]
#[derive(Debug, Clone, PartialEq)]
pub struct ParsePolicyError(pub String);

impl Display for ParsePolicyError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(
            f,
            "Unknown fuel stop policy [{}], expected 'first_leg' or 'every_leg'",
            self.0
        )
    }
}

impl std::error::Error for ParsePolicyError {}

impl FromStr for FuelStopPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first_leg" => Ok(FuelStopPolicy::FirstLeg),
            "every_leg" => Ok(FuelStopPolicy::EveryLeg),
            other => Err(ParsePolicyError(other.to_owned())),
        }
    }
}

impl FuelStopPolicy {
    /// The planned stops to schedule on leg `leg_index`
    pub fn stops_for_leg(&self, planned: &[FuelStop], leg_index: usize) -> Vec<FuelStop> {
        let threaded_leg = match self {
            FuelStopPolicy::FirstLeg => 0,
            FuelStopPolicy::EveryLeg => leg_index,
        };

        if leg_index != threaded_leg {
            return vec![];
        }

        planned
            .iter()
            .filter(|stop| stop.leg_index == leg_index)
            .cloned()
            .collect()
    }
}

/// Plans the fuel stops along a single leg.
///
/// Stops sit at `k * interval` miles for every `k >= 1` strictly below the
/// leg length; a stop landing exactly on the destination is dropped.
pub fn plan_leg_fuel_stops(leg_index: usize, leg: &Leg) -> Vec<FuelStop> {
    let mut stops = vec![];
    if !leg.distance_miles.is_finite() || leg.distance_miles <= 0.0 {
        return stops;
    }

    let mut k: u32 = 1;
    loop {
        let leg_miles = f64::from(k) * FUELING_INTERVAL_MILES;
        if leg_miles >= leg.distance_miles {
            break;
        }

        let location = haversine::interpolate(
            &leg.origin,
            &leg.destination,
            leg_miles / leg.distance_miles,
        );

        router_debug!(
            "(plan_leg_fuel_stops) leg {leg_index}: stop at {leg_miles} mi, {}",
            location
        );

        stops.push(FuelStop {
            leg_index,
            leg_miles,
            location,
        });
        k += 1;
    }

    stops
}

/// Plans fuel stops for every leg, in route order.
pub fn plan_fuel_stops(legs: &[Leg]) -> Vec<FuelStop> {
    legs.iter()
        .enumerate()
        .flat_map(|(index, leg)| plan_leg_fuel_stops(index, leg))
        .collect()
}
