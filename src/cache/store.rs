//! Cache Store Module
//!
//! The synchronized key -> entry map with sliding TTL semantics. The store has
//! no background work of its own; see [`crate::cache::Cache`] for the variant
//! that sweeps itself.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

use crate::cache::{CacheEntry, CacheStats};

/// Map contents plus counters, guarded together by the store lock.
#[derive(Debug)]
struct StoreInner<V> {
    entries: HashMap<String, Arc<CacheEntry<V>>>,
    stats: CacheStats,
}

// == Cache Store ==
/// Thread-safe map of entries that become invisible once stale.
///
/// Every insert and every successful [`get`](Self::get) sets the entry's
/// expiration to `now + ttl`. Expired entries stay in the map until
/// [`cleanup_expired`](Self::cleanup_expired) removes them or they are overwritten.
#[derive(Debug)]
pub struct CacheStore<V> {
    inner: RwLock<StoreInner<V>>,
    /// TTL applied on insert and on every hit
    ttl: Duration,
}

impl<V> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store with the given TTL.
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                entries: HashMap::new(),
                stats: CacheStats::new(),
            }),
            ttl,
        }
    }

    /// Returns the configured TTL.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Set ==
    /// Stores a value, replacing whatever was at `key`.
    pub fn set(&self, key: impl Into<String>, value: V) {
        let entry = Arc::new(CacheEntry::new(value, self.ttl));
        self.inner.write().entries.insert(key.into(), entry);
    }

    // == Set If Not Exist ==
    /// Stores a value only if `key` holds no live entry.
    ///
    /// The check and the insert happen under one write lock, so among
    /// concurrent callers racing on the same key exactly one wins.
    ///
    /// # Returns
    /// - `true` if the value was stored
    /// - `false` if a live entry already occupied the key (nothing changes)
    pub fn set_if_not_exist(&self, key: impl Into<String>, value: V) -> bool {
        let key = key.into();
        let mut inner = self.inner.write();

        if let Some(existing) = inner.entries.get(&key) {
            if !existing.is_expired() {
                return false;
            }
        }

        inner
            .entries
            .insert(key, Arc::new(CacheEntry::new(value, self.ttl)));
        true
    }

    // == Get ==
    /// Looks up a live entry and refreshes its TTL.
    ///
    /// A hit mutates the entry's expiration, so this takes the write lock.
    pub fn get(&self, key: &str) -> Option<Arc<CacheEntry<V>>> {
        let mut inner = self.inner.write();

        let found = match inner.entries.get(key) {
            Some(entry) if !entry.is_expired() => {
                entry.touch(self.ttl);
                Some(Arc::clone(entry))
            }
            _ => None,
        };

        if found.is_some() {
            inner.stats.record_hit();
        } else {
            inner.stats.record_miss();
        }
        found
    }

    // == Has ==
    /// Reports whether `key` holds a live entry without refreshing its TTL.
    pub fn has(&self, key: &str) -> bool {
        self.inner
            .read()
            .entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired())
    }

    // == Count ==
    /// Returns the number of entries physically in the map.
    ///
    /// Expired entries that have not been swept yet are included.
    pub fn count(&self) -> usize {
        self.inner.read().entries.len()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.read();
        let mut stats = inner.stats.clone();
        stats.total_entries = inner.entries.len();
        stats
    }

    // == Cleanup Expired ==
    /// Removes all expired entries in a single critical section.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&self) -> usize {
        let mut inner = self.inner.write();

        let before = inner.entries.len();
        inner.entries.retain(|_, entry| !entry.is_expired());
        let removed = before - inner.entries.len();

        inner.stats.record_sweep(removed);
        removed
    }
}
