//! Domain types shared by the planner: locations, legs, duty statuses
//! and timeline segments.

pub mod leg;
pub mod location;
pub mod segment;
pub mod status;
