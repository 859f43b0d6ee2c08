//! In-Memory Adapter
//!
//! HashMap storage behind an async lock, with the same expiration rules as
//! the file-backed adapter.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{Adapter, PurgeExpired};
use crate::cache::{current_timestamp, ttl_from_seconds, CacheEntry};
use crate::error::Result;

// == Memory Adapter ==
/// Process-local storage; contents are lost when the adapter is dropped.
#[derive(Debug, Default)]
pub struct MemoryAdapter {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryAdapter {
    // == Constructor ==
    /// Creates an empty adapter.
    pub fn new() -> Self {
        Self::default()
    }

    // == Length ==
    /// Returns the number of stored entries, including expired ones not yet evicted.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    // == Is Empty ==
    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    async fn insert(&self, key: &str, ttl_seconds: Option<u64>, content: &str) {
        let entry = CacheEntry::new(content.to_string(), ttl_seconds);
        self.entries.write().await.insert(key.to_string(), entry);
    }
}

#[async_trait]
impl Adapter for MemoryAdapter {
    async fn set(&self, key: &str, seconds: u64, content: &str) -> Result<()> {
        self.insert(key, ttl_from_seconds(seconds), content).await;
        Ok(())
    }

    async fn forever(&self, key: &str, content: &str) -> Result<()> {
        self.insert(key, None, content).await;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let now = current_timestamp();

        // Fast path under the read lock
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return Ok(None),
                Some(entry) if !entry.is_expired_at(now) => {
                    return Ok(Some(entry.content.clone()))
                }
                Some(_) => {}
            }
        }

        // Re-check under the write lock; a concurrent set may have refreshed it
        let mut entries = self.entries.write().await;
        match entries.get(key) {
            Some(entry) if entry.is_expired_at(now) => {
                entries.remove(key);
                debug!("Evicted expired entry {}", key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.content.clone())),
            None => Ok(None),
        }
    }

    async fn forget(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn flush(&self) -> Result<()> {
        self.entries.write().await.clear();
        Ok(())
    }
}

#[async_trait]
impl PurgeExpired for MemoryAdapter {
    async fn purge_expired(&self) -> Result<usize> {
        let now = current_timestamp();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        Ok(before - entries.len())
    }
}
