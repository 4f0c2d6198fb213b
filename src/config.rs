//! Configuration Module
//!
//! Loads service configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::cache::{ttl, DEFAULT_EVICTION_PERCENT, MAX_ENTRIES};

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Capacity of the process-local store
    pub max_entries: usize,
    /// Share of capacity removed by one eviction sweep
    pub eviction_percent: usize,
    /// TTL in seconds used when a write names neither a TTL nor a preset
    pub default_ttl: i64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Store capacity (default: 500)
    /// - `EVICTION_PERCENT` - Sweep size as a percentage of capacity (default: 20)
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 300)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_entries: env_or("MAX_ENTRIES", defaults.max_entries),
            eviction_percent: env_or("EVICTION_PERCENT", defaults.eviction_percent),
            default_ttl: env_or("DEFAULT_TTL", defaults.default_ttl),
            server_port: env_or("SERVER_PORT", defaults.server_port),
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: MAX_ENTRIES,
            eviction_percent: DEFAULT_EVICTION_PERCENT,
            default_ttl: ttl::CATALOG,
            server_port: 3000,
        }
    }
}
