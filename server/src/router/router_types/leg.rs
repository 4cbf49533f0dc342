//! Struct definition for [`Leg`], one point-to-point part of a trip.

use super::location::Location;
use crate::router::router_utils::haversine;

/// A point-to-point part of the trip, e.g. start → pickup.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    /// Where the leg starts
    pub origin: Location,

    /// Where the leg ends
    pub destination: Location,

    /// Great-circle length of the leg in miles
    pub distance_miles: f64,
}

impl Leg {
    /// Creates a leg, measuring its great-circle distance.
    pub fn new(origin: Location, destination: Location) -> Self {
        let distance_miles = haversine::distance(&origin, &destination);
        Leg {
            origin,
            destination,
            distance_miles,
        }
    }
}
