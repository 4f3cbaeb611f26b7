//! Configuration Module
//!
//! Handles loading cache timing parameters from environment variables.

use std::env;
use std::time::Duration;

/// Lowest cadence the background sweeper will run at.
pub const MIN_CLEANUP_INTERVAL: Duration = Duration::from_secs(1);

/// Default TTL when nothing is configured (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Cache timing parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// TTL applied on every insert and every successful `get`
    pub ttl: Duration,
    /// How often the sweeper scans for expired entries (floored at 1 second)
    pub cleanup_interval: Duration,
}

impl CacheConfig {
    /// Creates a config whose cleanup interval equals the TTL.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            cleanup_interval: ttl,
        }
    }

    /// Sets an independent cleanup cadence.
    pub fn with_cleanup_interval(mut self, cleanup_interval: Duration) -> Self {
        self.cleanup_interval = cleanup_interval;
        self
    }

    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL_MS` - Entry TTL in milliseconds (default: 300000)
    /// - `CACHE_CLEANUP_INTERVAL_MS` - Sweep cadence in milliseconds (default: the TTL)
    pub fn from_env() -> Self {
        let ttl = env_millis("CACHE_TTL_MS").unwrap_or(DEFAULT_TTL);
        let cleanup_interval = env_millis("CACHE_CLEANUP_INTERVAL_MS").unwrap_or(ttl);

        Self {
            ttl,
            cleanup_interval,
        }
    }

    /// Interval the sweeper actually runs at.
    pub fn effective_cleanup_interval(&self) -> Duration {
        self.cleanup_interval.max(MIN_CLEANUP_INTERVAL)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

fn env_millis(name: &str) -> Option<Duration> {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_millis)
}
