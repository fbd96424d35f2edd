//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::cache::{CacheOptions, DEFAULT_DURATION_SECS, DEFAULT_PREFIX};

/// Default byte quota for the file store, the usual browser storage allowance
pub const DEFAULT_STORE_QUOTA: usize = 5 * 1024 * 1024;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespace prefix for every stored key
    pub prefix: String,
    /// Default entry lifetime in seconds
    pub default_duration: u64,
    /// Force persistence on or off; `None` probes the store
    pub use_persistence: Option<bool>,
    /// Directory holding the file store
    pub store_dir: PathBuf,
    /// Byte quota of the file store, 0 = unlimited
    pub store_quota: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Seconds between background `clean` calls
    pub clean_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_PREFIX` - Key namespace (default: `cache:`)
    /// - `DEFAULT_DURATION` - Default lifetime in seconds (default: 86400)
    /// - `USE_PERSISTENCE` - `true`/`false` (default: probe the store)
    /// - `STORE_DIR` - File store directory (default: `./data/cache`)
    /// - `STORE_QUOTA_BYTES` - File store quota (default: 5 MiB, 0 = unlimited)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEAN_INTERVAL` - Background clean frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            prefix: env::var("CACHE_PREFIX").unwrap_or(defaults.prefix),
            default_duration: parse_var("DEFAULT_DURATION").unwrap_or(defaults.default_duration),
            use_persistence: parse_var("USE_PERSISTENCE"),
            store_dir: env::var("STORE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.store_dir),
            store_quota: parse_var("STORE_QUOTA_BYTES").unwrap_or(defaults.store_quota),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            clean_interval: parse_var("CLEAN_INTERVAL").unwrap_or(defaults.clean_interval),
        }
    }

    /// Cache options derived from this configuration.
    pub fn cache_options(&self) -> CacheOptions {
        let options = CacheOptions::new()
            .prefix(self.prefix.clone())
            .default_duration(self.default_duration);
        match self.use_persistence {
            Some(enabled) => options.use_persistence(enabled),
            None => options,
        }
    }

    /// Store quota as an option, `None` when unlimited.
    pub fn quota(&self) -> Option<usize> {
        (self.store_quota > 0).then_some(self.store_quota)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            default_duration: DEFAULT_DURATION_SECS,
            use_persistence: None,
            store_dir: PathBuf::from("./data/cache"),
            store_quota: DEFAULT_STORE_QUOTA,
            server_port: 3000,
            clean_interval: 60,
        }
    }
}
