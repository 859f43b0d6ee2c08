//! Adapter Module
//!
//! The storage contract every backend implements, plus the backends shipped
//! with the crate.
//!
//! # Adapters
//! - [`FsAdapter`] - one file per entry in a directory
//! - [`MemoryAdapter`] - entries held in process memory
//! - [`NullAdapter`] - stores nothing, every read misses

mod fs;
mod memory;
mod null;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

pub use fs::FsAdapter;
pub use memory::MemoryAdapter;
pub use null::NullAdapter;

// == Adapter Contract ==
/// Raw string storage with per-entry expiration.
///
/// Adapters know nothing about structured content; the cache facade
/// serializes before calling in.
#[async_trait]
pub trait Adapter: Send + Sync {
    /// Stores `content` under `key`, expiring `seconds` from now.
    ///
    /// Overwrites any existing entry. `seconds == 0` stores the entry without
    /// expiration, exactly like [`Adapter::forever`].
    async fn set(&self, key: &str, seconds: u64, content: &str) -> Result<()>;

    /// Stores `content` under `key` with no expiration.
    async fn forever(&self, key: &str, content: &str) -> Result<()>;

    /// Returns whether a live entry exists for `key`.
    ///
    /// Must agree with [`Adapter::get`] at the same instant.
    async fn has(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }

    /// Returns the stored content, or `None` if absent or expired.
    ///
    /// Reading an expired entry evicts it.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Removes the entry for `key`. Succeeds when there is nothing to remove.
    async fn forget(&self, key: &str) -> Result<()>;

    /// Removes every entry, expired or not.
    async fn flush(&self) -> Result<()>;
}

// == Expired Entry Sweep ==
/// Adapters that can drop expired entries without them being read.
#[async_trait]
pub trait PurgeExpired: Send + Sync {
    /// Removes every expired entry and returns how many were removed.
    async fn purge_expired(&self) -> Result<usize>;
}

macro_rules! forward_adapter {
    ($wrapper:ident) => {
        #[async_trait]
        impl<A: Adapter + ?Sized> Adapter for $wrapper<A> {
            async fn set(&self, key: &str, seconds: u64, content: &str) -> Result<()> {
                (**self).set(key, seconds, content).await
            }

            async fn forever(&self, key: &str, content: &str) -> Result<()> {
                (**self).forever(key, content).await
            }

            async fn has(&self, key: &str) -> Result<bool> {
                (**self).has(key).await
            }

            async fn get(&self, key: &str) -> Result<Option<String>> {
                (**self).get(key).await
            }

            async fn forget(&self, key: &str) -> Result<()> {
                (**self).forget(key).await
            }

            async fn flush(&self) -> Result<()> {
                (**self).flush().await
            }
        }

        #[async_trait]
        impl<P: PurgeExpired + ?Sized> PurgeExpired for $wrapper<P> {
            async fn purge_expired(&self) -> Result<usize> {
                (**self).purge_expired().await
            }
        }
    };
}

forward_adapter!(Arc);
forward_adapter!(Box);
