//! Waypoint resolution.
//!
//! Place names are turned into coordinates by a [`Geocoder`]. The
//! [`WaypointResolver`] wraps a geocoder and never fails: lookup errors
//! degrade to a fallback coordinate. Results are memoized in a
//! [`LocationCache`] owned by the caller, so each distinct place name is
//! looked up once per trip computation.

#[macro_use]
pub mod macros;
pub mod gazetteer;
#[cfg(feature = "nominatim")]
pub mod nominatim;

use crate::config::{Config, GeocoderKind};
use crate::router::router_types::location::{Location, LocationError};
use std::collections::HashMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Latitude used when a place cannot be resolved (New York)
pub const DEFAULT_FALLBACK_LATITUDE: f64 = 40.7128;

/// Longitude used when a place cannot be resolved (New York)
pub const DEFAULT_FALLBACK_LONGITUDE: f64 = -74.0060;

/// Errors a [`Geocoder`] may report
#[derive(Debug, Clone, PartialEq)]
pub enum ResolverError {
    /// The geocoder had no match for the query
    NotFound(String),

    /// The geocoder could not be reached
    Transport(String),

    /// The geocoder answered with something unusable
    InvalidResponse(String),

    /// The geocoder answered with coordinates outside of the valid range
    OutOfRange(String),
}

impl Display for ResolverError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            ResolverError::NotFound(query) => write!(f, "No match for [{query}]"),
            ResolverError::Transport(e) => write!(f, "Geocoder unreachable: {e}"),
            ResolverError::InvalidResponse(e) => write!(f, "Invalid geocoder response: {e}"),
            ResolverError::OutOfRange(e) => write!(f, "Coordinates out of range: {e}"),
        }
    }
}

impl std::error::Error for ResolverError {}

/// Looks up the coordinates of a free-text place name.
///
/// Implementations may be slow (network bound); callers should not
/// assume lookups are cheap.
pub trait Geocoder {
    /// Returns `(latitude, longitude)` in degrees for `query`.
    fn geocode(&self, query: &str) -> Result<(f64, f64), ResolverError>;
}

/// Resolved locations for one trip computation, keyed by the exact
/// place-name string.
#[derive(Debug, Default, Clone)]
pub struct LocationCache {
    locations: HashMap<String, Location>,
}

impl LocationCache {
    /// Empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached location for `name`, if any
    pub fn get(&self, name: &str) -> Option<&Location> {
        self.locations.get(name)
    }

    /// Number of distinct names resolved so far
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Whether nothing has been resolved yet
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    fn insert(&mut self, name: &str, location: Location) {
        self.locations.insert(name.to_owned(), location);
    }
}

/// Fail-soft place-name resolver.
pub struct WaypointResolver {
    geocoder: Box<dyn Geocoder>,
    fallback: Location,
}

impl WaypointResolver {
    /// Creates a resolver that falls back to New York on lookup failure.
    pub fn new(geocoder: Box<dyn Geocoder>) -> Self {
        WaypointResolver {
            geocoder,
            fallback: default_fallback(),
        }
    }

    /// Creates a resolver with a custom fallback coordinate.
    pub fn with_fallback(
        geocoder: Box<dyn Geocoder>,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, LocationError> {
        Ok(WaypointResolver {
            geocoder,
            fallback: Location::new("fallback", latitude, longitude)?,
        })
    }

    /// Builds the resolver selected by the configuration.
    pub fn from_config(config: &Config) -> Result<Self, LocationError> {
        let geocoder: Box<dyn Geocoder> = match config.geocoder {
            GeocoderKind::Gazetteer => Box::new(gazetteer::Gazetteer),
            GeocoderKind::Nominatim => nominatim_geocoder(config),
        };

        Self::with_fallback(geocoder, config.fallback_latitude, config.fallback_longitude)
    }

    /// The coordinate returned when a lookup fails
    pub fn fallback(&self) -> &Location {
        &self.fallback
    }

    /// Resolves `name`, consulting and filling `cache`.
    ///
    /// Never fails: on geocoder errors or out-of-range coordinates the
    /// fallback coordinate is returned under the requested name.
    pub fn resolve(&self, cache: &mut LocationCache, name: &str) -> Location {
        if let Some(location) = cache.get(name) {
            resolver_debug!("(resolve) Cache hit for [{}].", name);
            return location.clone();
        }

        let location = match self.geocoder.geocode(name).and_then(|(latitude, longitude)| {
            Location::new(name, latitude, longitude)
                .map_err(|e| ResolverError::OutOfRange(e.to_string()))
        }) {
            Ok(location) => location,
            Err(e) => {
                resolver_warn!(
                    "(resolve) Geocoding failed for '{}': {}; using fallback.",
                    name,
                    e
                );
                self.fallback.renamed(name)
            }
        };

        resolver_debug!("(resolve) Resolved {}", location);
        cache.insert(name, location.clone());
        location
    }
}

fn default_fallback() -> Location {
    Location::new(
        "fallback",
        DEFAULT_FALLBACK_LATITUDE,
        DEFAULT_FALLBACK_LONGITUDE,
    )
    .expect("(default_fallback) fallback constants are in range")
}

#[cfg(feature = "nominatim")]
fn nominatim_geocoder(config: &Config) -> Box<dyn Geocoder> {
    match nominatim::Nominatim::new(
        &config.nominatim_url,
        &config.nominatim_user_agent,
        std::time::Duration::from_secs(u64::from(config.nominatim_timeout_s)),
    ) {
        Ok(geocoder) => Box::new(geocoder),
        Err(e) => {
            resolver_error!(
                "(nominatim_geocoder) Could not build Nominatim client: {}; using gazetteer.",
                e
            );
            Box::new(gazetteer::Gazetteer)
        }
    }
}

#[cfg(not(feature = "nominatim"))]
fn nominatim_geocoder(_config: &Config) -> Box<dyn Geocoder> {
    resolver_warn!(
        "(nominatim_geocoder) Built without the 'nominatim' feature; using gazetteer."
    );
    Box::new(gazetteer::Gazetteer)
}
