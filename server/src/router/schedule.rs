//! Duty schedule builder.
//!
//! Walks the trip start → pickup → dropoff and emits a chronological
//! duty-status timeline. The running totals (clock, driving hours, duty
//! hours, route miles) live in a [`RunningState`] value; every step takes
//! the current state and returns the next one along with the segments it
//! emitted.

use super::fuel::{FuelStop, FuelStopPolicy};
use super::router_types::leg::Leg;
use super::router_types::location::Location;
use super::router_types::segment::DutySegment;
use super::router_types::status::DutyStatus;
use super::router_utils::{clock, haversine};
use chrono::{DateTime, Utc};

/// Maximum driving hours before a 10 hour reset is required
pub const MAX_DRIVING_HOURS: f64 = 11.0;

/// Maximum on-duty hours before a 10 hour reset is required
pub const MAX_DUTY_HOURS: f64 = 14.0;

/// Length of the mandatory off-duty reset
pub const MIN_OFF_DUTY_HOURS: f64 = 10.0;

/// Cumulative driving hours that require a break
pub const BREAK_THRESHOLD_HOURS: f64 = 8.0;

/// Length of the required break
pub const BREAK_DURATION_HOURS: f64 = 0.5;

/// Time spent fueling at each fuel stop
pub const FUELING_DURATION_HOURS: f64 = 0.5;

/// Time spent loading at the pickup
pub const PICKUP_DURATION_HOURS: f64 = 1.0;

/// Time spent unloading at the dropoff
pub const DROPOFF_DURATION_HOURS: f64 = 1.0;

/// Running totals threaded through the schedule.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RunningState {
    /// Current wall-clock time
    pub time: DateTime<Utc>,

    /// Cumulative driving hours
    pub driving_hours: f64,

    /// Cumulative on-duty hours
    pub duty_hours: f64,

    /// Route miles covered so far
    pub miles: f64,
}

impl RunningState {
    /// Initial state; both counters are seeded with the hours already
    /// used in the current cycle.
    pub fn new(time: DateTime<Utc>, cycle_hours_used: f64) -> Self {
        RunningState {
            time,
            driving_hours: cycle_hours_used,
            duty_hours: cycle_hours_used,
            miles: 0.0,
        }
    }

    /// Segment starting now, stamped with this state's counters.
    fn segment(&self, location: &Location, status: DutyStatus, hours: f64) -> DutySegment {
        DutySegment {
            location: location.clone(),
            arrival_time: self.time,
            departure_time: self.time + clock::hours(hours),
            status,
            miles_from_start: self.miles,
            cumulative_driving_hours: self.driving_hours,
            cumulative_duty_hours: self.duty_hours,
        }
    }

    /// State after `hours` spent in `status`.
    fn record(self, status: DutyStatus, hours: f64) -> Self {
        let driving = if status.counts_as_driving() { hours } else { 0.0 };
        let duty = if status.counts_as_duty() { hours } else { 0.0 };
        RunningState {
            time: self.time + clock::hours(hours),
            driving_hours: self.driving_hours + driving,
            duty_hours: self.duty_hours + duty,
            ..self
        }
    }

    /// State after driving on until the odometer reads `end_miles`.
    ///
    /// The odometer is set to `end_miles` exactly and never moves back.
    fn drive_to(self, end_miles: f64) -> Self {
        let end_miles = end_miles.max(self.miles);
        RunningState {
            miles: end_miles,
            ..self.record(DutyStatus::Driving, haversine::travel_time(end_miles - self.miles))
        }
    }

    /// State after `hours` on duty without driving.
    fn on_duty(self, hours: f64) -> Self {
        self.record(DutyStatus::OnDuty, hours)
    }
}

/// Everything needed to build a schedule.
#[derive(Debug, Clone)]
pub struct ScheduleInput<'a> {
    /// Start → pickup
    pub to_pickup: &'a Leg,

    /// Pickup → dropoff
    pub to_dropoff: &'a Leg,

    /// Fuel stops planned for all legs
    pub fuel_stops: &'a [FuelStop],

    /// Which planned stops are scheduled
    pub policy: FuelStopPolicy,

    /// When the trip starts
    pub start_time: DateTime<Utc>,

    /// Hours already used in the current cycle
    pub cycle_hours_used: f64,
}

/// Emits the zero-length off-duty segment at the trip start.
pub fn start_segment(state: RunningState, start: &Location) -> (RunningState, DutySegment) {
    (state, state.segment(start, DutyStatus::OffDuty, 0.0))
}

/// Inserts a 30 minute break if the driving counter carried into a leg
/// has reached [`BREAK_THRESHOLD_HOURS`].
///
/// The break segment carries the counters from before the break; afterwards
/// the driving counter is zero and the break counts toward duty hours.
pub fn break_check(state: RunningState, at: &Location) -> (RunningState, Option<DutySegment>) {
    if state.driving_hours < BREAK_THRESHOLD_HOURS {
        return (state, None);
    }

    router_debug!(
        "(break_check) {:.2} driving hours at {}, taking a break.",
        state.driving_hours,
        at.name()
    );

    let segment = state.segment(at, DutyStatus::OffDuty, BREAK_DURATION_HOURS);
    let next = RunningState {
        time: segment.departure_time,
        driving_hours: 0.0,
        duty_hours: state.duty_hours + BREAK_DURATION_HOURS,
        miles: state.miles,
    };

    (next, Some(segment))
}

/// Drives to a fuel stop `stop_miles` from the route start and fuels up.
pub fn fuel_stop(
    state: RunningState,
    stop: &Location,
    stop_miles: f64,
) -> (RunningState, DutySegment) {
    let arrived = state.drive_to(stop_miles);
    let fueled = arrived.on_duty(FUELING_DURATION_HOURS);

    let segment = DutySegment {
        departure_time: fueled.time,
        cumulative_driving_hours: fueled.driving_hours,
        cumulative_duty_hours: fueled.duty_hours,
        ..arrived.segment(stop, DutyStatus::OnDuty, 0.0)
    };

    (fueled, segment)
}

/// Drives on to the end of a leg, `end_miles` from the route start.
pub fn arrive(
    state: RunningState,
    destination: &Location,
    end_miles: f64,
) -> (RunningState, DutySegment) {
    let arrived = state.drive_to(end_miles);
    (arrived, arrived.segment(destination, DutyStatus::Driving, 0.0))
}

/// Loading or unloading at a leg endpoint.
///
/// The segment carries the counters including the handling time.
pub fn handle_cargo(
    state: RunningState,
    at: &Location,
    hours: f64,
) -> (RunningState, DutySegment) {
    let handled = state.on_duty(hours);
    let segment = DutySegment {
        departure_time: handled.time,
        cumulative_duty_hours: handled.duty_hours,
        ..state.segment(at, DutyStatus::OnDuty, 0.0)
    };

    (handled, segment)
}

/// Appends the 10 hour reset when either daily limit has been reached.
///
/// Thresholds are inclusive. The emitted segment carries zeroed counters.
pub fn mandatory_rest(state: RunningState, at: &Location) -> (RunningState, Option<DutySegment>) {
    if state.driving_hours < MAX_DRIVING_HOURS && state.duty_hours < MAX_DUTY_HOURS {
        return (state, None);
    }

    router_debug!(
        "(mandatory_rest) driving {:.2} h, duty {:.2} h at {}; resetting.",
        state.driving_hours,
        state.duty_hours,
        at.name()
    );

    let reset = RunningState {
        driving_hours: 0.0,
        duty_hours: 0.0,
        ..state
    };
    let segment = reset.segment(at, DutyStatus::OffDuty, MIN_OFF_DUTY_HOURS);
    let next = RunningState {
        time: segment.departure_time,
        ..reset
    };

    (next, Some(segment))
}

/// Schedules one leg: break check, fuel stops, final arrival, then the
/// cargo handling at the destination.
pub fn schedule_leg(
    state: RunningState,
    leg: &Leg,
    fuel_stops: &[FuelStop],
    handling_hours: f64,
) -> (RunningState, Vec<DutySegment>) {
    let mut segments = vec![];
    let leg_start_miles = state.miles;

    let (mut state, rest) = break_check(state, &leg.origin);
    segments.extend(rest);

    for stop in fuel_stops {
        let progress = state.miles - leg_start_miles;
        if stop.leg_miles >= leg.distance_miles || stop.leg_miles < progress {
            router_warn!(
                "(schedule_leg) Skipping fuel stop at {:.1} mi; leg is {:.1} mi, progress {:.1} mi.",
                stop.leg_miles,
                leg.distance_miles,
                progress
            );
            continue;
        }

        let (next, segment) = fuel_stop(state, &stop.location, leg_start_miles + stop.leg_miles);
        segments.push(segment);
        state = next;
    }

    let end_miles = leg_start_miles + leg.distance_miles;
    let (arrived, segment) = arrive(state, &leg.destination, end_miles);
    segments.push(segment);

    let (handled, segment) = handle_cargo(arrived, &leg.destination, handling_hours);
    segments.push(segment);

    (handled, segments)
}

/// Builds the full duty timeline for a trip.
pub fn build_schedule(input: &ScheduleInput) -> Vec<DutySegment> {
    let mut schedule = vec![];

    let state = RunningState::new(input.start_time, input.cycle_hours_used);
    let (mut state, segment) = start_segment(state, &input.to_pickup.origin);
    schedule.push(segment);

    let legs = [
        (input.to_pickup, PICKUP_DURATION_HOURS),
        (input.to_dropoff, DROPOFF_DURATION_HOURS),
    ];

    for (index, (leg, handling_hours)) in legs.into_iter().enumerate() {
        let stops = input.policy.stops_for_leg(input.fuel_stops, index);
        router_debug!(
            "(build_schedule) leg {index}: {} -> {}, {:.1} mi, {} fuel stop(s).",
            leg.origin.name(),
            leg.destination.name(),
            leg.distance_miles,
            stops.len()
        );

        let (next, segments) = schedule_leg(state, leg, &stops, handling_hours);
        schedule.extend(segments);
        state = next;
    }

    let (_, rest) = mandatory_rest(state, &input.to_dropoff.destination);
    schedule.extend(rest);

    router_info!(
        "(build_schedule) {} segment(s) from {} to {}.",
        schedule.len(),
        input.to_pickup.origin.name(),
        input.to_dropoff.destination.name()
    );

    schedule
}
