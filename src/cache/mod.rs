//! Cache Module
//!
//! Provides the in-memory map with sliding TTL expiration, and the
//! self-sweeping [`Cache`] built on top of it.

mod entry;
mod handle;
mod stats;
mod store;


// Re-export public types
pub use entry::{CacheEntry, MAX_TTL};
pub use handle::Cache;
pub use stats::CacheStats;
pub use store::CacheStore;
