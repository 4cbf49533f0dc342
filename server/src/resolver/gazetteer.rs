//! Offline geocoder backed by a table of major North American freight
//! hubs.
//!
//! Lookups are case-insensitive and ignore extra whitespace. A trailing
//! state or province (`"Chicago, IL"`) is tolerated, and literal
//! `"<lat>, <lon>"` pairs are accepted as-is.

use super::{Geocoder, ResolverError};
use lazy_static::lazy_static;
use std::collections::HashMap;

lazy_static! {
    static ref PLACES: HashMap<&'static str, (f64, f64)> = {
        let places: [(&'static str, (f64, f64)); 58] = [
            ("new york", (40.7128, -74.0060)),
            ("new york city", (40.7128, -74.0060)),
            ("nyc", (40.7128, -74.0060)),
            ("chicago", (41.8781, -87.6298)),
            ("los angeles", (34.0522, -118.2437)),
            ("la", (34.0522, -118.2437)),
            ("houston", (29.7604, -95.3698)),
            ("phoenix", (33.4484, -112.0740)),
            ("philadelphia", (39.9526, -75.1652)),
            ("san antonio", (29.4241, -98.4936)),
            ("san diego", (32.7157, -117.1611)),
            ("dallas", (32.7767, -96.7970)),
            ("san jose", (37.3382, -121.8863)),
            ("austin", (30.2672, -97.7431)),
            ("jacksonville", (30.3322, -81.6557)),
            ("fort worth", (32.7555, -97.3308)),
            ("columbus", (39.9612, -82.9988)),
            ("charlotte", (35.2271, -80.8431)),
            ("indianapolis", (39.7684, -86.1581)),
            ("san francisco", (37.7749, -122.4194)),
            ("seattle", (47.6062, -122.3321)),
            ("denver", (39.7392, -104.9903)),
            ("washington", (38.9072, -77.0369)),
            ("boston", (42.3601, -71.0589)),
            ("nashville", (36.1627, -86.7816)),
            ("detroit", (42.3314, -83.0458)),
            ("oklahoma city", (35.4676, -97.5164)),
            ("portland", (45.5152, -122.6784)),
            ("las vegas", (36.1699, -115.1398)),
            ("memphis", (35.1495, -90.0490)),
            ("louisville", (38.2527, -85.7585)),
            ("baltimore", (39.2904, -76.6122)),
            ("milwaukee", (43.0389, -87.9065)),
            ("albuquerque", (35.0844, -106.6504)),
            ("kansas city", (39.0997, -94.5786)),
            ("atlanta", (33.7490, -84.3880)),
            ("omaha", (41.2565, -95.9345)),
            ("miami", (25.7617, -80.1918)),
            ("minneapolis", (44.9778, -93.2650)),
            ("st. louis", (38.6270, -90.1994)),
            ("st louis", (38.6270, -90.1994)),
            ("saint louis", (38.6270, -90.1994)),
            ("salt lake city", (40.7608, -111.8910)),
            ("pittsburgh", (40.4406, -79.9959)),
            ("cleveland", (41.4993, -81.6944)),
            ("laredo", (27.5306, -99.4803)),
            ("el paso", (31.7619, -106.4850)),
            ("reno", (39.5296, -119.8138)),
            ("boise", (43.6150, -116.2023)),
            ("billings", (45.7833, -108.5007)),
            ("sacramento", (38.5816, -121.4944)),
            ("spokane", (47.6588, -117.4260)),
            ("tulsa", (36.1540, -95.9928)),
            ("toronto", (43.6532, -79.3832)),
            ("montreal", (45.5017, -73.5673)),
            ("vancouver", (49.2827, -123.1207)),
            ("calgary", (51.0447, -114.0719)),
            ("winnipeg", (49.8951, -97.1384)),
        ];
        places.into_iter().collect()
    };
}

/// Table-driven geocoder; no network access.
#[derive(Debug, Default, Copy, Clone)]
pub struct Gazetteer;

impl Gazetteer {
    /// Number of known place names (aliases included)
    pub fn len(&self) -> usize {
        PLACES.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        PLACES.is_empty()
    }
}

/// Lowercases and collapses whitespace
fn normalize(query: &str) -> String {
    query
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
        .to_lowercase()
}

/// Parses `"<lat>, <lon>"`
fn parse_coordinates(query: &str) -> Option<(f64, f64)> {
    let (latitude, longitude) = query.split_once(',')?;
    let latitude = latitude.trim().parse::<f64>().ok()?;
    let longitude = longitude.trim().parse::<f64>().ok()?;
    Some((latitude, longitude))
}

impl Geocoder for Gazetteer {
    fn geocode(&self, query: &str) -> Result<(f64, f64), ResolverError> {
        if let Some(coordinates) = parse_coordinates(query) {
            return Ok(coordinates);
        }

        let key = normalize(query);
        if let Some(coordinates) = PLACES.get(key.as_str()) {
            return Ok(*coordinates);
        }

        // "City, ST" or "City, Country"
        key.split_once(',')
            .and_then(|(city, _)| PLACES.get(city.trim()))
            .copied()
            .ok_or_else(|| ResolverError::NotFound(query.to_owned()))
    }
}
