//! Logging setup
//!
//! Diagnostics go to stderr so they never mix with command output.

use tracing_subscriber::EnvFilter;

use crate::config::Settings;

/// Environment variable holding a log filter, e.g. `FINBOARD_LOG=debug`
pub const LOG_ENV: &str = "FINBOARD_LOG";

/// Build the filter from `FINBOARD_LOG`, else the configured level
pub fn filter(settings: &Settings) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber; later calls are no-ops
pub fn init(settings: &Settings) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(settings))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
