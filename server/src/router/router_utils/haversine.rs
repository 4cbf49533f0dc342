//! Implementation of the Haversine formula for calculating the distance
//! between two points on a sphere, plus the travel-time and
//! interpolation helpers the planner builds on.
//!
//! See [Wikipedia](https://en.wikipedia.org/wiki/Haversine_formula) for
//! more.
//!
//! **Distance is returned in statute miles**.

use crate::router::router_types::location::Location;

/// Mean Earth radius in miles
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Average commercial vehicle speed used for every leg, in miles per hour
pub const AVERAGE_SPEED_MPH: f64 = 55.0;

/// Calculate the great-circle distance between two locations.
///
/// # Notes
/// This is used as a stand-in for road distance; no road network is
/// consulted.
pub fn distance(start: &Location, end: &Location) -> f64 {
    let d_lat = (end.latitude() - start.latitude()).to_radians();
    let d_lon = (end.longitude() - start.longitude()).to_radians();
    let lat1 = start.latitude().to_radians();
    let lat2 = end.latitude().to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + (d_lon / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();
    // rounding can push near-antipodal points just past 1
    let a = a.min(1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_MILES * c
}

/// Hours needed to drive `miles` at [`AVERAGE_SPEED_MPH`].
///
/// Negative or non-finite distances take no time.
pub fn travel_time(miles: f64) -> f64 {
    if !miles.is_finite() || miles <= 0.0 {
        return 0.0;
    }

    miles / AVERAGE_SPEED_MPH
}

/// Linear interpolation of latitude and longitude between two locations.
///
/// Not geodesically correct. `progress` is clamped to `[0, 1]`, so the
/// result always stays within the coordinate ranges of the endpoints.
pub fn interpolate(start: &Location, end: &Location, progress: f64) -> Location {
    let progress = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };

    let latitude = start.latitude() + (end.latitude() - start.latitude()) * progress;
    let longitude = start.longitude() + (end.longitude() - start.longitude()) * progress;
    let name = format!("Fuel stop near {latitude:.2}, {longitude:.2}");

    match Location::new(name, latitude, longitude) {
        Ok(location) => location,
        Err(e) => {
            // a convex combination of valid coordinates is valid
            router_error!("(interpolate) {e}; using start location.");
            start.clone()
        }
    }
}

#[cfg(test)]
pub mod haversine_test {
    use super::*;
    use proptest::prelude::*;

    fn location(latitude: f64, longitude: f64) -> Location {
        Location::new("test", latitude, longitude).unwrap()
    }

    #[test]
    fn haversine_distance_in_miles() {
        let new_york = location(40.7128, -74.0060);
        let chicago = location(41.8781, -87.6298);
        let d = distance(&new_york, &chicago);
        assert!((d - 712.0).abs() < 5.0, "distance was {d}");
    }

    #[test]
    fn haversine_distance_zero_for_same_point() {
        let denver = location(39.7392, -104.9903);
        assert_eq!(distance(&denver, &denver), 0.0);
    }

    #[test]
    fn travel_time_at_average_speed() {
        assert_eq!(travel_time(55.0), 1.0);
        assert_eq!(travel_time(0.0), 0.0);
        assert_eq!(travel_time(-10.0), 0.0);
        assert_eq!(travel_time(f64::NAN), 0.0);
    }

    #[test]
    fn interpolate_midpoint_and_name() {
        let a = location(40.0, -80.0);
        let b = location(42.0, -90.0);
        let mid = interpolate(&a, &b, 0.5);
        assert_eq!(mid.latitude(), 41.0);
        assert_eq!(mid.longitude(), -85.0);
        assert_eq!(mid.name(), "Fuel stop near 41.00, -85.00");
    }

    #[test]
    fn interpolate_clamps_progress() {
        let a = location(40.0, -80.0);
        let b = location(42.0, -90.0);
        assert_eq!(interpolate(&a, &b, -1.0).latitude(), 40.0);
        assert_eq!(interpolate(&a, &b, 7.0).longitude(), -90.0);
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(
            lat1 in -90.0f64..=90.0, lon1 in -180.0f64..=180.0,
            lat2 in -90.0f64..=90.0, lon2 in -180.0f64..=180.0,
        ) {
            let a = location(lat1, lon1);
            let b = location(lat2, lon2);
            let ab = distance(&a, &b);
            let ba = distance(&b, &a);
            prop_assert!((ab - ba).abs() < 1e-6);
            prop_assert!(ab >= 0.0);
            prop_assert_eq!(distance(&a, &a), 0.0);
        }

        #[test]
        fn travel_time_is_linear(miles in 0.0f64..10_000.0) {
            prop_assert!((travel_time(2.0 * miles) - 2.0 * travel_time(miles)).abs() < 1e-9);
        }
    }
}
