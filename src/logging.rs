// logging.rs

use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{Config, LOG_ENV};

/// Installs the global subscriber. Logs go to stderr so results on stdout
/// stay clean. Falls back to `warn` if the configured filter does not parse.
/// Settings rejected while loading `config` are reported once the
/// subscriber is live.
pub fn init_logging(config: &Config) {
    let (filter, bad_filter) = match EnvFilter::try_new(&config.log_filter) {
        Ok(filter) => (filter, false),
        Err(_) => (EnvFilter::new("warn"), true),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    debug!(filter = %config.log_filter, "logging initialised");
    if bad_filter {
        warn!(value = %config.log_filter, "ignoring invalid {}, using warn", LOG_ENV);
    }
    config.warn_rejected();
}
