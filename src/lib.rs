//! Content Cache - a serializing cache facade over pluggable storage adapters
//!
//! Ships a file-backed adapter that stores one `sha256`-named file per key,
//! an in-memory adapter and a no-op adapter.

pub mod adapter;
pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use adapter::{Adapter, FsAdapter, MemoryAdapter, NullAdapter, PurgeExpired};
pub use cache::{Cache, CacheStats};
pub use config::Config;
pub use error::{CacheError, DecodeError, Result};
pub use tasks::spawn_cleanup_task;
