//! Background Tasks Module
//!
//! Contains background tasks that run periodically alongside the cache.
//!
//! # Tasks
//! - Expired entry sweep: purges expired entries at configured intervals

mod cleanup;

pub use cleanup::spawn_cleanup_task;
