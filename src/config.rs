//! Configuration Module
//!
//! Handles loading the server configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::cache::OnceCacheOptions;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
/// Durations are in milliseconds; zero disables the corresponding behavior.
#[derive(Debug, Clone)]
pub struct Config {
    /// Total lifetime of the cache in milliseconds (0 = unbounded)
    pub lifetime_ms: u64,
    /// Default TTL in milliseconds for entries without explicit TTL (0 = permanent)
    pub default_key_ttl_ms: u64,
    /// Sweep interval in milliseconds (0 = no sweeping)
    pub sweep_interval_ms: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_LIFETIME_MS` - Total cache lifetime (default: 0, unbounded)
    /// - `DEFAULT_KEY_TTL_MS` - Default entry TTL (default: 0, permanent)
    /// - `SWEEP_INTERVAL_MS` - Sweep frequency (default: 1000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            lifetime_ms: env_or("CACHE_LIFETIME_MS", defaults.lifetime_ms),
            default_key_ttl_ms: env_or("DEFAULT_KEY_TTL_MS", defaults.default_key_ttl_ms),
            sweep_interval_ms: env_or("SWEEP_INTERVAL_MS", defaults.sweep_interval_ms),
            server_port: env_or("SERVER_PORT", defaults.server_port),
        }
    }

    /// Builds the cache options described by this configuration.
    ///
    /// The destroy callback is left for the caller to attach.
    pub fn cache_options(&self) -> OnceCacheOptions {
        OnceCacheOptions::new()
            .lifetime(Duration::from_millis(self.lifetime_ms))
            .default_key_ttl(Duration::from_millis(self.default_key_ttl_ms))
            .sweep_interval(Duration::from_millis(self.sweep_interval_ms))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lifetime_ms: 0,
            default_key_ttl_ms: 0,
            sweep_interval_ms: 1000,
            server_port: 3000,
        }
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
