//! File-Backed Adapter
//!
//! Persists each entry as `<dir>/<hex(sha256(key))>.cache`, holding the
//! 10-digit expiration timestamp immediately followed by the content.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::fs;
use tracing::{debug, info, warn};

use super::{Adapter, PurgeExpired};
use crate::cache::{current_timestamp, ttl_from_seconds, CacheEntry};
use crate::config::Config;
use crate::error::{CacheError, Result};

/// Extension of every entry file.
const ENTRY_EXTENSION: &str = "cache";

/// Distinguishes temporary files written concurrently by this process.
static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

// == File-Backed Adapter ==
/// Filesystem storage, one file per cache entry.
///
/// There is no index: the file for a key is derived from the key on every
/// access, so separate instances over the same directory see the same entries.
#[derive(Debug, Clone)]
pub struct FsAdapter {
    cache_dir: PathBuf,
}

impl FsAdapter {
    // == Constructor ==
    /// Creates an adapter over `cache_dir`, creating the directory if needed.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Result<Self> {
        let cache_dir = cache_dir.into();
        std::fs::create_dir_all(&cache_dir)?;
        info!("File cache ready at {}", cache_dir.display());
        Ok(Self { cache_dir })
    }

    /// Creates an adapter over the directory named in `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.cache_dir)
    }

    /// Directory holding the entry files.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    // == Key Mapping ==
    /// Returns the file that stores `key`.
    ///
    /// Arbitrary key content is normalized to a fixed-length lowercase hex
    /// digest, which is always a safe file name.
    pub fn entry_path(&self, key: &str) -> PathBuf {
        let digest = hex::encode(Sha256::digest(key.as_bytes()));
        self.cache_dir.join(format!("{}.{}", digest, ENTRY_EXTENSION))
    }

    // == Write ==
    async fn write(&self, key: &str, ttl_seconds: Option<u64>, content: &str) -> Result<()> {
        let path = self.entry_path(key);
        let entry = CacheEntry::new(content.to_string(), ttl_seconds);

        write_atomic(&path, entry.encode().as_bytes()).await?;
        debug!("Cached {} until {}", path.display(), entry.expires_at);
        Ok(())
    }

    // == Read ==
    /// Reads and decodes the entry file, `None` if it does not exist.
    async fn read_entry(&self, path: &Path) -> Result<Option<CacheEntry>> {
        let raw = match fs::read(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        CacheEntry::decode(&raw)
            .map(Some)
            .map_err(|source| CacheError::Corrupt {
                path: path.to_path_buf(),
                source,
            })
    }

    // == Evict ==
    /// Removes an expired entry file; failure only costs a later re-check.
    ///
    /// The file is re-read first so an entry rewritten since it was seen
    /// expired survives. A `set` landing between that re-read and the removal
    /// is still lost; there is no file locking.
    async fn evict(&self, path: &Path, now: u64) {
        match self.read_entry(path).await {
            Ok(Some(entry)) if entry.is_expired_at(now) => {}
            Ok(Some(_)) => {
                debug!("Entry {} was refreshed, keeping it", path.display());
                return;
            }
            Ok(None) => return,
            // Still unreadable; removing it is as good as evicting.
            Err(_) => {}
        }

        match fs::remove_file(path).await {
            Ok(()) => debug!("Evicted expired entry {}", path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to evict expired entry {}: {}", path.display(), e),
        }
    }
}

#[async_trait]
impl Adapter for FsAdapter {
    async fn set(&self, key: &str, seconds: u64, content: &str) -> Result<()> {
        self.write(key, ttl_from_seconds(seconds), content).await
    }

    async fn forever(&self, key: &str, content: &str) -> Result<()> {
        self.write(key, None, content).await
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.entry_path(key);

        let Some(entry) = self.read_entry(&path).await? else {
            debug!("Cache miss for {}", path.display());
            return Ok(None);
        };

        let now = current_timestamp();
        if entry.is_expired_at(now) {
            self.evict(&path, now).await;
            return Ok(None);
        }

        Ok(Some(entry.content))
    }

    async fn forget(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.entry_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn flush(&self) -> Result<()> {
        let mut dir = match fs::read_dir(&self.cache_dir).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fs::create_dir_all(&self.cache_dir).await?;
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let mut removed = 0usize;
        while let Some(item) = dir.next_entry().await? {
            let path = item.path();
            let result = if item.file_type().await?.is_dir() {
                fs::remove_dir_all(&path).await
            } else {
                fs::remove_file(&path).await
            };

            match result {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }

        info!("Flushed {} items from {}", removed, self.cache_dir.display());
        Ok(())
    }
}

#[async_trait]
impl PurgeExpired for FsAdapter {
    async fn purge_expired(&self) -> Result<usize> {
        let now = current_timestamp();
        let mut dir = fs::read_dir(&self.cache_dir).await?;
        let mut removed = 0usize;

        while let Some(item) = dir.next_entry().await? {
            let path = item.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(ENTRY_EXTENSION) {
                continue;
            }

            match self.read_entry(&path).await {
                Ok(Some(entry)) if entry.is_expired_at(now) => {
                    match fs::remove_file(&path).await {
                        Ok(()) => removed += 1,
                        Err(e) if e.kind() == ErrorKind::NotFound => {}
                        Err(e) => return Err(e.into()),
                    }
                }
                Ok(_) => {}
                Err(CacheError::Corrupt { path, source }) => {
                    warn!("Skipping undecodable entry {}: {}", path.display(), source);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(removed)
    }
}

/// Replaces `path` with `contents` so readers never observe a partial file.
async fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
    let temp_path = path.with_extension(format!("{}.{}.tmp", std::process::id(), seq));

    write_then_rename(&temp_path, path, contents).await
}

/// Writes `temp_path` and renames it over `path`; the temporary file never
/// outlives a failure.
async fn write_then_rename(temp_path: &Path, path: &Path, contents: &[u8]) -> Result<()> {
    let result = match fs::write(temp_path, contents).await {
        Ok(()) => fs::rename(temp_path, path).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        let _ = fs::remove_file(temp_path).await;
        return Err(e.into());
    }

    Ok(())
}
