//! Error types for the cache
//!
//! Cache operations themselves are total; the only failure mode is a stored
//! value that cannot be narrowed to the kind a caller asked for.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Stored value is not of the requested kind
    #[error("type assertion to {expected} failed")]
    TypeMismatch {
        /// Name of the kind the caller asked for
        expected: &'static str,
    },
}

impl CacheError {
    pub(crate) fn mismatch(expected: &'static str) -> Self {
        CacheError::TypeMismatch { expected }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
