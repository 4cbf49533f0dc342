//! End to end trip planning against the offline gazetteer.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use svc_hos_planner::resolver::gazetteer::Gazetteer;
use svc_hos_planner::resolver::{Geocoder, ResolverError, WaypointResolver};
use svc_hos_planner::router::compliance::ViolationKind;
use svc_hos_planner::router::fuel::FuelStopPolicy;
use svc_hos_planner::router::router_types::status::DutyStatus;
use svc_hos_planner::{TripPlanner, TripRequest, TripResult};

/// Gazetteer that records every lookup
#[derive(Clone, Default)]
struct CountingGazetteer {
    queries: Rc<RefCell<Vec<String>>>,
}

impl Geocoder for CountingGazetteer {
    fn geocode(&self, query: &str) -> Result<(f64, f64), ResolverError> {
        self.queries.borrow_mut().push(query.to_owned());
        Gazetteer.geocode(query)
    }
}

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 6, 0, 0).unwrap()
}

fn planner() -> TripPlanner {
    TripPlanner::new(WaypointResolver::new(Box::new(Gazetteer)))
}

fn request(current: &str, pickup: &str, dropoff: &str, cycle: f64) -> TripRequest {
    TripRequest {
        current_location: current.to_owned(),
        pickup_location: pickup.to_owned(),
        dropoff_location: dropoff.to_owned(),
        current_cycle_used: cycle,
    }
}

fn cross_country(cycle: f64) -> TripResult {
    planner()
        .compute_trip_at(&request("New York", "Chicago", "Los Angeles", cycle), start())
        .unwrap()
}

fn assert_timeline_invariants(trip: &TripResult) {
    let schedule = &trip.duty_schedule;
    assert!(!schedule.is_empty());

    for segment in schedule {
        assert!(segment.departure_time >= segment.arrival_time);
        assert!(segment.cumulative_driving_hours <= segment.cumulative_duty_hours + 1e-9);
    }

    for pair in schedule.windows(2) {
        assert!(pair[1].arrival_time >= pair[0].departure_time);
        assert!(pair[1].miles_from_start >= pair[0].miles_from_start);
    }

    let last = schedule.last().unwrap();
    assert!((last.miles_from_start - trip.total_distance).abs() < 1e-6);
}

#[test]
fn test_new_york_chicago_los_angeles() {
    let trip = cross_country(0.0);

    // Distances are great-circle, not road miles: 711 mi to Chicago and
    // 1742 mi on to Los Angeles. The road route is about 2728 mi with two
    // fuel stops; the straight-line legs only pass one 1000 mi mark.
    assert!((trip.total_distance - 2453.5).abs() < 2453.5 * 0.01);
    assert_eq!(trip.fuel_stops.len(), 1);
    assert!(trip.fuel_stops[0].name().starts_with("Fuel stop near "));

    assert!(trip
        .duty_schedule
        .iter()
        .any(|s| s.status == DutyStatus::OffDuty && (s.duration_hours() - 10.0).abs() < 1e-6));
    assert!(!trip.violations.is_empty());
    assert_eq!(trip.violations[0].location, "Chicago");
    assert_eq!(trip.violations[0].kind, ViolationKind::DrivingLimit);

    assert_timeline_invariants(&trip);

    // driving, pickup, break, driving, dropoff and the closing rest
    let expected_hours = 2453.49 / 55.0 + 1.0 + 0.5 + 1.0 + 10.0;
    assert!((trip.total_time - expected_hours).abs() < 0.01);
}

#[test]
fn test_first_leg_policy_drops_second_leg_fuel_segment() {
    let trip = cross_country(0.0);

    // the only planned stop lies on the second leg
    let fueling = trip
        .duty_schedule
        .iter()
        .filter(|s| s.location.name().starts_with("Fuel stop near "))
        .count();
    assert_eq!(fueling, 0);

    let every_leg = planner()
        .with_fuel_stop_policy(FuelStopPolicy::EveryLeg)
        .compute_trip_at(&request("New York", "Chicago", "Los Angeles", 0.0), start())
        .unwrap();
    let fueling: Vec<_> = every_leg
        .duty_schedule
        .iter()
        .filter(|s| s.location.name().starts_with("Fuel stop near "))
        .collect();
    assert_eq!(fueling.len(), 1);
    assert_eq!(fueling[0].status, DutyStatus::OnDuty);
    assert!((fueling[0].miles_from_start - (711.07 + 1000.0)).abs() < 0.1);
    assert_eq!(every_leg.fuel_stops, trip.fuel_stops);
    assert_timeline_invariants(&every_leg);
}

#[test]
fn test_full_cycle_violates_on_first_drive() {
    let trip = cross_country(70.0);

    let first_driving = trip
        .duty_schedule
        .iter()
        .find(|s| s.status == DutyStatus::Driving)
        .unwrap();
    assert!(first_driving.cumulative_duty_hours > 70.0);
    assert!(trip
        .violations
        .iter()
        .any(|v| v.kind == ViolationKind::CycleLimit && v.location == "Chicago"));
}

#[test]
fn test_idempotent_for_fixed_start() {
    assert_eq!(cross_country(12.5), cross_country(12.5));
}

#[test]
fn test_start_shifts_every_timestamp() {
    let offset = Duration::hours(7) + Duration::minutes(15);
    let request = request("Seattle", "Denver", "Atlanta", 20.0);

    let early = planner().compute_trip_at(&request, start()).unwrap();
    let late = planner().compute_trip_at(&request, start() + offset).unwrap();

    assert_eq!(early.duty_schedule.len(), late.duty_schedule.len());
    for (a, b) in early.duty_schedule.iter().zip(&late.duty_schedule) {
        assert_eq!(b.arrival_time - a.arrival_time, offset);
        assert_eq!(b.departure_time - a.departure_time, offset);
        assert_eq!(a.status, b.status);
        assert_eq!(a.miles_from_start, b.miles_from_start);
    }
    assert_eq!(early.total_time, late.total_time);
    assert_eq!(early.violations, late.violations);
}

#[test]
fn test_each_name_geocoded_once() {
    let geocoder = CountingGazetteer::default();
    let planner = TripPlanner::new(WaypointResolver::new(Box::new(geocoder.clone())));

    planner
        .compute_trip_at(&request("Dallas", "Houston", "Dallas", 0.0), start())
        .unwrap();
    assert_eq!(*geocoder.queries.borrow(), vec!["Dallas", "Houston"]);

    // the cache does not outlive a computation
    planner
        .compute_trip_at(&request("Dallas", "Houston", "Dallas", 0.0), start())
        .unwrap();
    assert_eq!(geocoder.queries.borrow().len(), 4);
}

#[test]
fn test_unknown_place_uses_fallback() {
    let trip = planner()
        .compute_trip_at(&request("Atlantis", "New York", "Boston", 0.0), start())
        .unwrap();

    // Atlantis falls back to New York, so the first leg is empty
    assert_eq!(trip.duty_schedule[1].location.name(), "New York");
    assert_eq!(trip.duty_schedule[1].miles_from_start, 0.0);
    assert_timeline_invariants(&trip);
}

const CITIES: [&str; 10] = [
    "New York",
    "Chicago",
    "Los Angeles",
    "Seattle",
    "Miami",
    "Denver",
    "Dallas",
    "Boston",
    "Phoenix",
    "Atlanta",
];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_timeline_invariants(
        current in 0..CITIES.len(),
        pickup in 0..CITIES.len(),
        dropoff in 0..CITIES.len(),
        cycle in 0.0..=70.0f64,
        every_leg in any::<bool>(),
    ) {
        let policy = if every_leg { FuelStopPolicy::EveryLeg } else { FuelStopPolicy::FirstLeg };
        let trip = planner()
            .with_fuel_stop_policy(policy)
            .compute_trip_at(
                &request(CITIES[current], CITIES[pickup], CITIES[dropoff], cycle),
                start(),
            )
            .unwrap();

        assert_timeline_invariants(&trip);

        // counters restart on the closing rest
        let rests: Vec<_> = trip
            .duty_schedule
            .iter()
            .filter(|s| s.status == DutyStatus::OffDuty && s.duration_hours() >= 10.0)
            .collect();
        for rest in &rests {
            prop_assert_eq!(rest.cumulative_driving_hours, 0.0);
            prop_assert_eq!(rest.cumulative_duty_hours, 0.0);
        }
        if trip.summary().total_duty_hours >= 14.0 {
            prop_assert_eq!(rests.len(), 1);
        }
    }
}
