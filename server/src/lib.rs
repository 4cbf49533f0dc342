#![doc = include_str!("../README.md")]

#[cfg(test)]
#[macro_use]
pub mod test_util;

pub mod config;
pub mod resolver;
pub mod router;

pub use crate::config::Config;
pub use crate::router::trip::{TripPlanner, TripReport, TripRequest, TripResult};

use lazy_static::lazy_static;
use log4rs::append::console::{ConsoleAppender, Target};

lazy_static! {
    /// Initialized log4rs handle
    pub static ref LOG_HANDLE: Option<log4rs::Handle> = {
        // Set up basic logger to make sure we can write to stderr; stdout
        // carries the trip report
        let stderr = ConsoleAppender::builder()
            .target(Target::Stderr)
            .encoder(Box::new(log4rs::encode::pattern::PatternEncoder::new(
                "{d(%Y-%m-%d %H:%M:%S)} | {I} | {h({l}):5.5} | {f}:{L} | {m}{n}",
            )))
            .build();
        match log4rs::config::Config::builder()
            .appender(log4rs::config::Appender::builder().build("stderr", Box::new(stderr)))
            .build(
                log4rs::config::Root::builder()
                    .appender("stderr")
                    .build(log::LevelFilter::Debug),
            ) {
            Ok(config) => log4rs::init_config(config).ok(),
            Err(_) => None,
        }
    };
}

/// Returns the process-wide log4rs handle, installing the default
/// logger on first use.
pub fn get_log_handle() -> Option<log4rs::Handle> {
    LOG_HANDLE.to_owned()
}

/// Initialize a log4rs logger with provided configuration file path
pub fn load_logger_config_from_file(config_file: &str) -> Result<(), String> {
    let log_handle = get_log_handle()
        .ok_or("(load_logger_config_from_file) Could not get the log handle.")?;
    match log4rs::config::load_config_file(config_file, Default::default()) {
        Ok(config) => {
            log_handle.set_config(config);
            Ok(())
        }
        Err(e) => Err(format!(
            "(logger) Could not parse log config file [{}]: {}.",
            config_file, e,
        )),
    }
}
