//! Configuration Module
//!
//! Loads server and cache configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Capacity and TTL for one named cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSettings {
    /// Maximum number of entries
    pub max_entries: usize,
    /// TTL in seconds
    pub ttl_secs: u64,
}

impl CacheSettings {
    pub const fn new(max_entries: usize, ttl_secs: u64) -> Self {
        Self {
            max_entries,
            ttl_secs,
        }
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    fn from_env(prefix: &str, default: Self) -> Self {
        Self {
            max_entries: env_or(&format!("{}_CACHE_MAX", prefix), default.max_entries),
            ttl_secs: env_or(&format!("{}_CACHE_TTL", prefix), default.ttl_secs),
        }
    }
}

/// Server configuration parameters.
///
/// Read once at startup; nothing here changes while the process runs.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Seconds between janitor sweeps
    pub janitor_interval: u64,
    /// Product listing cache
    pub products_cache: CacheSettings,
    /// Category listing cache
    pub categories_cache: CacheSettings,
    /// Search results cache
    pub search_cache: CacheSettings,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `JANITOR_INTERVAL` - Sweep frequency in seconds (default: 60)
    /// - `PRODUCTS_CACHE_MAX` / `PRODUCTS_CACHE_TTL` (default: 100 / 300)
    /// - `CATEGORIES_CACHE_MAX` / `CATEGORIES_CACHE_TTL` (default: 50 / 600)
    /// - `SEARCH_CACHE_MAX` / `SEARCH_CACHE_TTL` (default: 50 / 60)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            janitor_interval: env_or("JANITOR_INTERVAL", defaults.janitor_interval),
            products_cache: CacheSettings::from_env("PRODUCTS", defaults.products_cache),
            categories_cache: CacheSettings::from_env("CATEGORIES", defaults.categories_cache),
            search_cache: CacheSettings::from_env("SEARCH", defaults.search_cache),
        }
    }

    pub fn janitor_interval(&self) -> Duration {
        Duration::from_secs(self.janitor_interval.max(1))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            janitor_interval: 60,
            products_cache: CacheSettings::new(100, 300),
            categories_cache: CacheSettings::new(50, 600),
            search_cache: CacheSettings::new(50, 60),
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
