//! Cache Reaper Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that sweeps `store` every `interval`.
///
/// Each sweep takes the store lock once and removes every entry at least
/// `interval` old. The first sweep happens one full interval after spawn.
///
/// The task exits when `true` is sent on `shutdown_rx` or when every sender
/// has been dropped.
///
/// # Arguments
/// * `store` - Shared store, guarded by the cache lock
/// * `interval` - Sweep period and maximum entry age
/// * `shutdown_rx` - Shutdown signal
///
/// # Example
/// ```ignore
/// let store = Arc::new(Mutex::new(CacheStore::new()));
/// let (shutdown_tx, shutdown_rx) = watch::channel(false);
/// let handle = spawn_reaper_task(store.clone(), Duration::from_secs(5), shutdown_rx);
/// // Later:
/// shutdown_tx.send(true).ok();
/// handle.await.ok();
/// ```
pub fn spawn_reaper_task(
    store: Arc<Mutex<CacheStore>>,
    interval: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        debug!(
            interval_ms = interval.as_millis() as u64,
            "Cache reaper started"
        );

        loop {
            tokio::select! {
                changed = shutdown_rx.changed() => {
                    // Err means every sender is gone
                    if changed.is_err() || *shutdown_rx.borrow() {
                        debug!("Cache reaper shutting down");
                        break;
                    }
                }
                _ = ticker.tick() => {
                    let removed = {
                        let mut guard = store.lock().unwrap_or_else(PoisonError::into_inner);
                        guard.reap(interval)
                    };

                    if removed > 0 {
                        info!(removed, "Cache reap: removed expired entries");
                    } else {
                        debug!("Cache reap: nothing to remove");
                    }
                }
            }
        }
    })
}
