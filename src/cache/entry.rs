//! Cache Entry Module
//!
//! Defines individual cache entries: a value plus an independently locked
//! expiration timestamp.

use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Longest TTL honoured; longer values are capped so `now + ttl` cannot overflow.
pub const MAX_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

// == Cache Entry ==
/// A single cached value with its staleness state.
///
/// The expiration timestamp sits behind the entry's own lock, so refreshing one
/// entry never contends with unrelated entries.
#[derive(Debug)]
pub struct CacheEntry<V> {
    /// The stored value
    value: V,
    /// Expiration instant, `None` = not yet touched (treated as expired)
    expires_at: Mutex<Option<Instant>>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry that is already live for `ttl`.
    pub fn new(value: V, ttl: Duration) -> Self {
        let entry = Self::untouched(value);
        entry.touch(ttl);
        entry
    }

    /// Creates an entry with no expiration set. It reads as expired until touched.
    pub fn untouched(value: V) -> Self {
        Self {
            value,
            expires_at: Mutex::new(None),
        }
    }

    /// Returns the stored value.
    pub fn value(&self) -> &V {
        &self.value
    }

    // == Touch ==
    /// Pushes the expiration out to `now + ttl`.
    pub fn touch(&self, ttl: Duration) {
        let expires = Instant::now() + ttl.min(MAX_TTL);
        *self.expires_at.lock() = Some(expires);
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired when its expiration was never set, or when the
    /// current time is at or past the expiration instant.
    pub fn is_expired(&self) -> bool {
        match *self.expires_at.lock() {
            Some(expires) => Instant::now() >= expires,
            None => true,
        }
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, or `None` if the entry was never touched.
    ///
    /// # Returns
    /// - `Some(Duration::ZERO)` if the entry has expired
    /// - `Some(remaining)` if the entry is still live
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at
            .lock()
            .map(|expires| expires.saturating_duration_since(Instant::now()))
    }

    #[cfg(test)]
    pub(crate) fn set_expires_at(&self, expires: Option<Instant>) {
        *self.expires_at.lock() = expires;
    }
}
