//! Self-Sweeping Cache
//!
//! Pairs a [`CacheStore`] with its background cleanup task.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, CacheStore};
use crate::config::CacheConfig;
use crate::tasks::{spawn_cleanup_task, CleanupHandle};
use crate::value::Value;

// == Cache ==
/// Thread-safe TTL cache with sliding expiration and background sweeping.
///
/// Construction spawns a cleanup task on the current Tokio runtime. The task
/// stops when [`shutdown`](Self::shutdown) is called or when the cache is
/// dropped. Share the cache between threads by wrapping it in an `Arc`.
///
/// Expired entries are only reclaimed while that runtime keeps running. A
/// cache built inside a `current_thread` `block_on` and then used from plain
/// sync code stays readable but is never swept; call
/// [`cleanup_expired`](Self::cleanup_expired) yourself in that case.
///
/// # Example
/// ```no_run
/// use std::time::Duration;
/// use ttl_cache::Cache;
///
/// #[tokio::main]
/// async fn main() {
///     let cache: Cache = Cache::new(Duration::from_secs(30));
///     cache.set("user:1", "ada");
///
///     if let Some(entry) = cache.get("user:1") {
///         assert_eq!(entry.value().as_str().unwrap(), "ada");
///     }
/// }
/// ```
#[derive(Debug)]
pub struct Cache<V = Value> {
    store: Arc<CacheStore<V>>,
    cleanup: CleanupHandle,
}

impl<V> Cache<V>
where
    V: Send + Sync + 'static,
{
    // == Constructors ==
    /// Creates a cache whose cleanup interval equals `ttl`.
    ///
    /// # Panics
    /// Panics if called outside of a Tokio runtime.
    pub fn new(ttl: Duration) -> Self {
        Self::from_config(&CacheConfig::new(ttl))
    }

    /// Creates a cache with an independent cleanup cadence.
    ///
    /// Intervals below one second are raised to one second.
    ///
    /// # Panics
    /// Panics if called outside of a Tokio runtime.
    pub fn with_cleanup_interval(ttl: Duration, cleanup_interval: Duration) -> Self {
        Self::from_config(&CacheConfig::new(ttl).with_cleanup_interval(cleanup_interval))
    }

    /// Creates a cache from a loaded configuration.
    ///
    /// The sweeper runs on the current runtime, so background reclamation
    /// only happens while that runtime is being driven.
    ///
    /// # Panics
    /// Panics if called outside of a Tokio runtime.
    pub fn from_config(config: &CacheConfig) -> Self {
        if tokio::runtime::Handle::try_current().is_err() {
            panic!(
                "ttl_cache::Cache requires a Tokio runtime to run its cleanup task; \
                 construct it from within #[tokio::main], #[tokio::test] or a runtime context"
            );
        }

        let store = Arc::new(CacheStore::new(config.ttl));
        let cleanup = spawn_cleanup_task(Arc::downgrade(&store), config.cleanup_interval);
        debug!(
            ttl = ?config.ttl,
            cleanup_interval = ?config.effective_cleanup_interval(),
            "Cache created"
        );

        Self { store, cleanup }
    }
}

impl<V> Cache<V> {
    /// Stores a value, replacing whatever was at `key`.
    pub fn set(&self, key: impl Into<String>, value: impl Into<V>) {
        self.store.set(key, value.into());
    }

    /// Stores a value only if `key` holds no live entry. Returns whether it was stored.
    pub fn set_if_not_exist(&self, key: impl Into<String>, value: impl Into<V>) -> bool {
        self.store.set_if_not_exist(key, value.into())
    }

    /// Looks up a live entry, extending its life by the TTL.
    pub fn get(&self, key: &str) -> Option<Arc<CacheEntry<V>>> {
        self.store.get(key)
    }

    /// Reports whether `key` holds a live entry without extending its life.
    pub fn has(&self, key: &str) -> bool {
        self.store.has(key)
    }

    /// Number of entries physically present, including expired ones not yet swept.
    pub fn count(&self) -> usize {
        self.store.count()
    }

    /// Removes expired entries now instead of waiting for the next sweep.
    pub fn cleanup_expired(&self) -> usize {
        self.store.cleanup_expired()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.store.stats()
    }

    /// Returns the TTL applied on insert and on every hit.
    pub fn ttl(&self) -> Duration {
        self.store.ttl()
    }

    // == Lifecycle ==
    /// Stops the background sweep. The cache stays usable; expired entries
    /// are no longer reclaimed unless [`cleanup_expired`](Self::cleanup_expired)
    /// is called.
    pub fn shutdown(&self) {
        self.cleanup.shutdown();
    }

    /// Returns true until the cleanup task has exited.
    ///
    /// A task spawned on a runtime that is no longer being driven still
    /// reports as running even though it makes no progress.
    pub fn is_sweeper_running(&self) -> bool {
        !self.cleanup.is_finished()
    }
}
