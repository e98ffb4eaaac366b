// config.rs

use std::path::PathBuf;

use tracing::warn;

use crate::history::{EXPORT_FILE_NAME, HISTORY_CAPACITY};

pub const LOG_ENV: &str = "CALCSHELL_LOG";
pub const EXPORT_ENV: &str = "CALCSHELL_EXPORT";
pub const CAPACITY_ENV: &str = "CALCSHELL_HISTORY_CAPACITY";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// `tracing` filter directive, e.g. `warn` or `calcshell=debug`.
    pub log_filter: String,
    /// Where `export` writes when no path is given.
    pub export_path: PathBuf,
    pub history_capacity: usize,
    /// Settings that were present but unusable, as `(variable, value)`.
    /// Reported by [`Config::warn_rejected`] once logging is up.
    pub rejected: Vec<(&'static str, String)>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: "warn".to_string(),
            export_path: PathBuf::from(EXPORT_FILE_NAME),
            history_capacity: HISTORY_CAPACITY,
            rejected: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        if let Some(filter) = lookup(LOG_ENV).filter(|s| !s.trim().is_empty()) {
            config.log_filter = filter;
        }
        if let Some(path) = lookup(EXPORT_ENV).filter(|s| !s.trim().is_empty()) {
            config.export_path = PathBuf::from(path);
        }
        if let Some(raw) = lookup(CAPACITY_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => config.history_capacity = n,
                _ => config.rejected.push((CAPACITY_ENV, raw)),
            }
        }
        config
    }

    /// Emits one warning per rejected setting. Call after the subscriber is
    /// installed; events fired earlier are dropped.
    pub fn warn_rejected(&self) {
        for (key, value) in &self.rejected {
            warn!(value = %value, "ignoring invalid {}, using the default", key);
        }
    }
}
