//! Struct definitions and implementations for [`Location`].
//!
//! A `Location` is a named point on the globe: a resolved waypoint
//! (start, pickup, dropoff) or a synthesized point such as a fuel stop.

use ordered_float::OrderedFloat;
use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Valid latitude range in degrees
const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;

/// Valid longitude range in degrees
const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// Errors raised when constructing a [`Location`]
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum LocationError {
    /// Latitude is not finite or outside of [-90, 90]
    InvalidLatitude(f64),

    /// Longitude is not finite or outside of [-180, 180]
    InvalidLongitude(f64),
}

impl Display for LocationError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            LocationError::InvalidLatitude(v) => write!(f, "Invalid latitude: {v}"),
            LocationError::InvalidLongitude(v) => write!(f, "Invalid longitude: {v}"),
        }
    }
}

impl std::error::Error for LocationError {}

/// A [`Location`] represents a named geographic point.
///
/// Latitude and longitude are kept as [`OrderedFloat`] so locations can
/// be compared and hashed. Fields are private; a `Location` is immutable
/// once built.
#[derive(Debug, PartialEq, Hash, Eq, Clone, Serialize)]
pub struct Location {
    /// Human readable name, e.g. the place name it was resolved from.
    name: String,

    /// The latitude of the location in degrees.
    latitude: OrderedFloat<f64>,

    /// The longitude of the location in degrees.
    longitude: OrderedFloat<f64>,
}

impl Location {
    /// Creates a new [`Location`], validating the coordinate ranges.
    pub fn new(
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, LocationError> {
        if !latitude.is_finite() || !LATITUDE_RANGE.contains(&latitude) {
            return Err(LocationError::InvalidLatitude(latitude));
        }

        if !longitude.is_finite() || !LONGITUDE_RANGE.contains(&longitude) {
            return Err(LocationError::InvalidLongitude(longitude));
        }

        Ok(Location {
            name: name.into(),
            latitude: OrderedFloat(latitude),
            longitude: OrderedFloat(longitude),
        })
    }

    /// Same coordinates under a different name
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Location {
            name: name.into(),
            ..self.clone()
        }
    }

    /// Name of the location
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Latitude in degrees
    pub fn latitude(&self) -> f64 {
        self.latitude.into_inner()
    }

    /// Longitude in degrees
    pub fn longitude(&self) -> f64 {
        self.longitude.into_inner()
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(
            f,
            "{} ({:.4}, {:.4})",
            self.name,
            self.latitude(),
            self.longitude()
        )
    }
}
