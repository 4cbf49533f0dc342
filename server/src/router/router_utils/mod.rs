pub mod clock;
pub mod haversine;
