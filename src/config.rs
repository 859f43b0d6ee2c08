//! Configuration Module
//!
//! Handles the cache directory and sweep interval, optionally loaded from
//! environment variables.

use std::env;
use std::path::PathBuf;

/// Cache configuration parameters.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding one file per cache entry
    pub cache_dir: PathBuf,
    /// Interval in seconds between expired-entry sweeps
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a Config for the given cache directory with default intervals.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            ..Self::default()
        }
    }

    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_DIR` - Cache directory (default: `<temp dir>/content-cache`)
    /// - `CACHE_CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 300)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_dir: env::var_os("CACHE_DIR")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_dir),
            cleanup_interval: env::var("CACHE_CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cleanup_interval),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_dir: env::temp_dir().join("content-cache"),
            cleanup_interval: 300,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.cache_dir.ends_with("content-cache"));
        assert_eq!(config.cleanup_interval, 300);
    }

    #[test]
    fn test_config_new_keeps_default_interval() {
        let config = Config::new("/var/cache/app");
        assert_eq!(config.cache_dir, PathBuf::from("/var/cache/app"));
        assert_eq!(config.cleanup_interval, 300);
    }

    #[test]
    fn test_config_from_env() {
        env::set_var("CACHE_DIR", "/srv/cache");
        env::set_var("CACHE_CLEANUP_INTERVAL", "not-a-number");

        let config = Config::from_env();
        assert_eq!(config.cache_dir, PathBuf::from("/srv/cache"));
        assert_eq!(config.cleanup_interval, 300);

        env::remove_var("CACHE_DIR");
        env::remove_var("CACHE_CLEANUP_INTERVAL");
    }
}
