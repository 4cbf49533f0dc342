//! test utilities. Provides log macros and shared fixtures for unit tests.

use crate::resolver::gazetteer::Gazetteer;
use crate::resolver::WaypointResolver;
use chrono::{DateTime, TimeZone, Utc};

/// Writes a debug! message to the test::ut logger
#[macro_export]
macro_rules! ut_debug {
    ($($arg:tt)+) => {
        log::debug!(target: "test::ut", $($arg)+)
    };
}

/// Writes an info! message to the test::ut logger
#[macro_export]
macro_rules! ut_info {
    ($($arg:tt)+) => {
        log::info!(target: "test::ut", $($arg)+)
    };
}

/// Writes an error! message to the test::ut logger
#[macro_export]
macro_rules! ut_error {
    ($($arg:tt)+) => {
        log::error!(target: "test::ut", $($arg)+)
    };
}

/// Fixed trip start used across tests
pub fn trip_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 6, 0, 0)
        .single()
        .unwrap_or_else(|| panic!("(trip_start) invalid fixture time"))
}

/// Resolver backed by the offline gazetteer
pub fn gazetteer_resolver() -> WaypointResolver {
    WaypointResolver::new(Box::new(Gazetteer))
}
