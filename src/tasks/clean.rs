//! Periodic Clean Task
//!
//! Background task that calls `clean` on an interval so expired entries do
//! not linger in the backing store.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::backend::BackingStore;
use crate::cache::{Cache, Ttl};

/// Spawns a background task that periodically cleans the cache.
///
/// Every `interval_secs` the task takes the write lock and calls
/// `clean(window_secs)`, so the full purge scan runs at most once per
/// window no matter how short the interval.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(Cache::memory_only(CacheOptions::default())));
/// let clean_handle = spawn_clean_task(cache.clone(), 60, 3600);
/// // Later, during shutdown:
/// clean_handle.abort();
/// ```
pub fn spawn_clean_task<S>(
    cache: Arc<RwLock<Cache<S>>>,
    interval_secs: u64,
    window_secs: u64,
) -> JoinHandle<()>
where
    S: BackingStore + 'static,
{
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting clean task every {} seconds, purging at most every {} seconds",
            interval_secs, window_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let result = {
                let mut cache_guard = cache.write().await;
                cache_guard.clean(Some(Ttl::from(window_secs)))
            };

            match result {
                Ok(Some(removed)) => debug!("Clean: purge removed {} entries", removed),
                Ok(None) => debug!("Clean: purge skipped, window still open"),
                Err(e) => warn!("Clean failed: {}", e),
            }
        }
    })
}
