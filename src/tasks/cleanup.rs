//! Expired Entry Sweep Task
//!
//! Background task that periodically removes expired entries that nobody
//! reads anymore.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::adapter::PurgeExpired;

/// Spawns a background task that periodically purges expired entries.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between sweeps. A failed sweep is logged and retried on the next tick.
///
/// # Arguments
/// * `adapter` - shared reference to the adapter to sweep
/// * `cleanup_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which the owner aborts on shutdown.
///
/// # Example
/// ```ignore
/// let adapter = Arc::new(FsAdapter::new("/tmp/cache")?);
/// let cleanup_handle = spawn_cleanup_task(adapter.clone(), 300);
/// let cache = Cache::new(adapter);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task<P>(adapter: Arc<P>, cleanup_interval_secs: u64) -> JoinHandle<()>
where
    P: PurgeExpired + ?Sized + 'static,
{
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting expired entry sweep with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            match adapter.purge_expired().await {
                Ok(0) => debug!("Sweep: no expired entries found"),
                Ok(removed) => info!("Sweep: removed {} expired entries", removed),
                Err(e) => warn!("Sweep failed: {}", e),
            }
        }
    })
}
