//! Cache Module
//!
//! The structured-content facade plus the entry encoding shared by adapters.

mod codec;
mod entry;
mod facade;
mod stats;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use codec::{deserialize, serialize};
pub use entry::{
    current_timestamp, expiration_timestamp, ttl_from_seconds, CacheEntry, MAX_TS,
    TIMESTAMP_WIDTH,
};
pub use facade::Cache;
pub use stats::CacheStats;
