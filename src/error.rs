//! Error types for the content cache
//!
//! Provides unified error handling using thiserror.

use std::path::PathBuf;

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for every adapter and the cache facade.
///
/// A missing or expired entry is never an error; it surfaces as `None`.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Storage I/O failure (permission, disk full, path too long, ...)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted entry could not be decoded
    #[error("Corrupt cache entry at {}: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    /// Content could not be encoded, or stored JSON did not fit the requested type
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// == Decode Error Enum ==
/// Reasons a persisted `[timestamp][payload]` blob is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Fewer bytes than the fixed-width timestamp field
    #[error("entry is {len} bytes, shorter than the timestamp field")]
    Truncated { len: usize },

    /// Timestamp field contains something other than ASCII digits
    #[error("invalid expiration timestamp {0:?}")]
    InvalidTimestamp(String),

    /// Payload is not valid UTF-8
    #[error("payload is not valid UTF-8")]
    InvalidUtf8,
}

// == Result Type Alias ==
/// Convenience Result type for the content cache.
pub type Result<T> = std::result::Result<T, CacheError>;
