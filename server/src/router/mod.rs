//! Router module
//!
//! The hours-of-service planning pipeline: geo math, fuel-stop planning,
//! duty schedule building, compliance checks and the trip orchestrator
//! that ties them together.

#[macro_use]
pub mod macros;
pub mod compliance;
pub mod fuel;
pub mod router_types;
pub mod router_utils;
pub mod schedule;
pub mod trip;
