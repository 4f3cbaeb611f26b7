//! TTL Cache - An in-process expiring key/value store
//!
//! Entries expire a fixed TTL after they were last written or read, and a
//! background task periodically reclaims the expired ones.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;
pub mod value;

pub use cache::{Cache, CacheEntry, CacheStats, CacheStore};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use value::Value;
