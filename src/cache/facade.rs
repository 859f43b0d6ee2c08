//! Cache Facade
//!
//! Structured-content API over any [`Adapter`].

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::codec::{deserialize, serialize};
use super::stats::{CacheStats, StatsRecorder};
use crate::adapter::{Adapter, FsAdapter};
use crate::config::Config;
use crate::error::{CacheError, Result};

// == Cache ==
/// Serializing cache over a storage adapter.
///
/// Strings are stored as-is and everything else as JSON. Adapter errors are
/// returned to the caller unchanged.
///
/// # Example
/// ```ignore
/// let cache = Cache::new(FsAdapter::new("/tmp/cache")?);
/// let page: String = cache.remember("page:home", 60, || async { render() }).await?;
/// ```
#[derive(Debug)]
pub struct Cache<A> {
    adapter: A,
    stats: StatsRecorder,
}

impl<A: Adapter> Cache<A> {
    // == Constructor ==
    /// Creates a cache backed by `adapter`.
    pub fn new(adapter: A) -> Self {
        Self {
            adapter,
            stats: StatsRecorder::default(),
        }
    }

    /// Borrows the underlying adapter.
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Returns current usage statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }

    // == Has ==
    /// Checks whether a live entry exists for `key`.
    pub async fn has(&self, key: &str) -> Result<bool> {
        self.adapter.has(key).await
    }

    // == Get ==
    /// Returns the cached value, or `None` if absent or expired.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.adapter.get(key).await? {
            Some(content) => {
                self.stats.record_hit();
                deserialize(&content).map(Some)
            }
            None => {
                self.stats.record_miss();
                Ok(None)
            }
        }
    }

    // == Set ==
    /// Caches `content` for `seconds` seconds.
    pub async fn set<T: Serialize + ?Sized>(
        &self,
        key: &str,
        seconds: u64,
        content: &T,
    ) -> Result<()> {
        let content = serialize(content)?;
        self.adapter.set(key, seconds, &content).await?;
        self.stats.record_write();
        Ok(())
    }

    // == Forever ==
    /// Caches `content` without expiration.
    pub async fn forever<T: Serialize + ?Sized>(&self, key: &str, content: &T) -> Result<()> {
        let content = serialize(content)?;
        self.adapter.forever(key, &content).await?;
        self.stats.record_write();
        Ok(())
    }

    // == Forget ==
    /// Removes the entry for `key`.
    pub async fn forget(&self, key: &str) -> Result<()> {
        self.adapter.forget(key).await
    }

    // == Flush ==
    /// Removes every entry.
    pub async fn flush(&self) -> Result<()> {
        self.adapter.flush().await
    }

    // == Remember ==
    /// Returns the cached value for `key`, or computes, caches for `seconds`
    /// and returns it.
    ///
    /// `compute` runs at most once per call. Concurrent callers racing on a
    /// cold key may each run their own `compute`; the last write wins.
    pub async fn remember<T, F, Fut>(&self, key: &str, seconds: u64, compute: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        if let Some(value) = self.cached(key).await? {
            return Ok(value);
        }

        let value = compute().await;
        self.set(key, seconds, &value).await?;
        Ok(value)
    }

    // == Remember Forever ==
    /// Like [`Cache::remember`], but the computed value never expires.
    pub async fn remember_forever<T, F, Fut>(&self, key: &str, compute: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        if let Some(value) = self.cached(key).await? {
            return Ok(value);
        }

        let value = compute().await;
        self.forever(key, &value).await?;
        Ok(value)
    }

    // == Try Remember ==
    /// Like [`Cache::remember`] for a `compute` that can fail.
    ///
    /// A failed `compute` is returned as is and nothing is cached, so the
    /// next call computes again.
    pub async fn try_remember<T, E, F, Fut>(
        &self,
        key: &str,
        seconds: u64,
        compute: F,
    ) -> std::result::Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<CacheError>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
    {
        if let Some(value) = self.cached(key).await? {
            return Ok(value);
        }

        let value = compute().await?;
        self.set(key, seconds, &value).await?;
        Ok(value)
    }

    // == Try Remember Forever ==
    /// Like [`Cache::try_remember`], but the computed value never expires.
    pub async fn try_remember_forever<T, E, F, Fut>(
        &self,
        key: &str,
        compute: F,
    ) -> std::result::Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<CacheError>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
    {
        if let Some(value) = self.cached(key).await? {
            return Ok(value);
        }

        let value = compute().await?;
        self.forever(key, &value).await?;
        Ok(value)
    }

    /// Existence check followed by a fetch. An entry that expires between the
    /// two calls reads as a miss.
    async fn cached<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        if !self.has(key).await? {
            debug!("Cold key {}, computing", key);
            self.stats.record_miss();
            return Ok(None);
        }
        self.get(key).await
    }
}

impl Cache<FsAdapter> {
    /// Creates a file-backed cache in the directory named by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(FsAdapter::from_config(config)?))
    }
}
