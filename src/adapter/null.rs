//! No-op Adapter
//!
//! Accepts every write and forgets it immediately, so reads always miss.
//! Useful to switch caching off without touching call sites.

use async_trait::async_trait;

use super::Adapter;
use crate::error::Result;

/// Adapter that stores nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAdapter;

impl NullAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Adapter for NullAdapter {
    async fn set(&self, _key: &str, _seconds: u64, _content: &str) -> Result<()> {
        Ok(())
    }

    async fn forever(&self, _key: &str, _content: &str) -> Result<()> {
        Ok(())
    }

    async fn has(&self, _key: &str) -> Result<bool> {
        Ok(false)
    }

    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    async fn forget(&self, _key: &str) -> Result<()> {
        Ok(())
    }

    async fn flush(&self) -> Result<()> {
        Ok(())
    }
}
