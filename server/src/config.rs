//! # Config
//!
//! Define and implement config options for module

use crate::resolver::{DEFAULT_FALLBACK_LATITUDE, DEFAULT_FALLBACK_LONGITUDE};
use crate::router::fuel::FuelStopPolicy;
use anyhow::Result;
use config::{ConfigError, Environment};
use dotenv::dotenv;
use serde::Deserialize;

/// Which geocoder backs the waypoint resolver
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeocoderKind {
    /// Built-in table of major cities, no network access
    Gazetteer,

    /// OpenStreetMap Nominatim (requires the `nominatim` feature)
    Nominatim,
}

/// struct holding configuration options
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// path to log configuration YAML file
    pub log_config: String,

    /// latitude used when a place can not be resolved
    pub fallback_latitude: f64,

    /// longitude used when a place can not be resolved
    pub fallback_longitude: f64,

    /// geocoder backing the waypoint resolver
    pub geocoder: GeocoderKind,

    /// Nominatim search endpoint
    pub nominatim_url: String,

    /// User-Agent sent to Nominatim
    pub nominatim_user_agent: String,

    /// Nominatim request timeout in seconds
    pub nominatim_timeout_s: u32,

    /// which legs receive fuel-stop segments in the duty schedule
    pub fuel_stop_policy: FuelStopPolicy,
}

impl Default for Config {
    fn default() -> Self {
        log::warn!("(default) Creating Config object with default values.");
        Self::new()
    }
}

impl Config {
    /// Default values for Config
    pub fn new() -> Self {
        Config {
            log_config: String::from("log4rs.yaml"),
            fallback_latitude: DEFAULT_FALLBACK_LATITUDE,
            fallback_longitude: DEFAULT_FALLBACK_LONGITUDE,
            geocoder: GeocoderKind::Gazetteer,
            nominatim_url: String::from("https://nominatim.openstreetmap.org/search"),
            nominatim_user_agent: String::from("Trip-ELD-Navigator/1.0"),
            nominatim_timeout_s: 10,
            fuel_stop_policy: FuelStopPolicy::FirstLeg,
        }
    }

    /// Create a new `Config` object using environment variables
    pub fn try_from_env() -> Result<Self, ConfigError> {
        // read .env file if present
        dotenv().ok();
        let default_config = Config::default();

        config::Config::builder()
            .set_default("log_config", default_config.log_config)?
            .set_default("fallback_latitude", default_config.fallback_latitude)?
            .set_default("fallback_longitude", default_config.fallback_longitude)?
            .set_default("geocoder", "gazetteer")?
            .set_default("nominatim_url", default_config.nominatim_url)?
            .set_default("nominatim_user_agent", default_config.nominatim_user_agent)?
            .set_default("nominatim_timeout_s", default_config.nominatim_timeout_s)?
            .set_default("fuel_stop_policy", "first_leg")?
            .add_source(Environment::default().separator("__"))
            .build()?
            .try_deserialize()
    }
}
