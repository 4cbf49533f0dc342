//! Command line trip planner

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use log::info;
use svc_hos_planner::*;

/// Plans an hours-of-service compliant duty schedule for a truck trip
/// and prints it as JSON.
#[derive(Parser, Debug)]
#[command(name = "svc-hos-planner", version, about)]
struct Args {
    /// Where the driver is now
    current_location: String,

    /// Where the load is picked up
    pickup_location: String,

    /// Where the load is delivered
    dropoff_location: String,

    /// On-duty hours already used in the 70-hour/8-day cycle
    #[arg(short = 'c', long, default_value_t = 0.0)]
    cycle_used: f64,

    /// Trip start as an RFC 3339 timestamp; defaults to now
    #[arg(short, long)]
    start: Option<DateTime<Utc>>,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pretty: bool,
}

#[cfg(not(tarpaulin_include))]
fn main() -> Result<()> {
    let args = Args::parse();

    // Will use default config settings if no environment vars are found.
    let config =
        Config::try_from_env().context("Failed to load configuration from environment")?;

    // Try to load log configuration from the provided log file.
    // Will default to stderr debug logging if the file can not be loaded.
    if let Err(e) = load_logger_config_from_file(config.log_config.as_str()) {
        log::error!("(main) {}", e);
    }

    info!("(main) Planning trip.");

    let planner = TripPlanner::from_config(&config).context("Invalid fallback coordinate")?;
    let request = TripRequest {
        current_location: args.current_location,
        pickup_location: args.pickup_location,
        dropoff_location: args.dropoff_location,
        current_cycle_used: args.cycle_used,
    };

    let trip = match args.start {
        Some(start) => planner.compute_trip_at(&request, start),
        None => planner.compute_trip(&request),
    }?;

    let report = TripReport::from(trip);
    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");

    info!("(main) Done.");

    // Make sure all log message are written/ displayed before shutdown
    log::logger().flush();

    Ok(())
}
