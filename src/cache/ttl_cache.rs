//! Shared TTL Cache
//!
//! Cloneable handle over a mutex-guarded [`CacheStore`] plus the background
//! reaper that sweeps it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{CacheStats, CacheStore};
use crate::error::{PokedexError, Result};
use crate::tasks::spawn_reaper_task;

// == Cache ==
/// Time-expiring response cache shared between callers and its reaper.
///
/// Every entry is dropped by the first sweep at which it is at least
/// `interval` old, so nothing outlives its last `add` by more than two
/// intervals. Dropping the last clone stops the reaper.
#[derive(Debug, Clone)]
pub struct Cache {
    /// Store guarded by the single cache lock
    store: Arc<Mutex<CacheStore>>,
    /// Reap period and maximum entry age
    interval: Duration,
    /// Shutdown signal for the reaper; closes when the last clone drops
    shutdown_tx: Arc<watch::Sender<bool>>,
    /// Reaper handle, taken on shutdown
    reaper: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl Cache {
    // == Constructor ==
    /// Creates an empty cache and starts its reaper.
    ///
    /// # Errors
    /// - `InvalidInterval` if `interval` is zero
    /// - `NoRuntime` if called outside a Tokio runtime
    pub fn new(interval: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(PokedexError::InvalidInterval);
        }
        if tokio::runtime::Handle::try_current().is_err() {
            return Err(PokedexError::NoRuntime);
        }

        let store = Arc::new(Mutex::new(CacheStore::new()));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = spawn_reaper_task(store.clone(), interval, shutdown_rx);

        debug!(interval_ms = interval.as_millis() as u64, "Cache created");

        Ok(Self {
            store,
            interval,
            shutdown_tx: Arc::new(shutdown_tx),
            reaper: Arc::new(Mutex::new(Some(handle))),
        })
    }

    // == Get ==
    /// Returns the payload stored under `key`, if any.
    ///
    /// Does not refresh the entry's age.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        self.lock().get(key)
    }

    // == Add ==
    /// Stores `value` under `key`, replacing any previous entry and its age.
    pub fn add(&self, key: impl Into<String>, value: impl Into<Bytes>) {
        self.lock().add(key.into(), value.into());
    }

    // == Introspection ==
    /// Reap period and maximum entry age.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }

    // == Shutdown ==
    /// Stops the reaper and waits for it to exit.
    ///
    /// Entries stay readable afterwards but are no longer reaped. Calling
    /// this more than once is a no-op.
    pub async fn shutdown(&self) {
        let handle = self
            .reaper
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        let Some(handle) = handle else {
            return;
        };

        // Send fails only if the reaper already exited
        let _ = self.shutdown_tx.send(true);
        if let Err(err) = handle.await {
            debug!(error = %err, "Reaper task ended abnormally");
        }
        info!("Cache reaper stopped");
    }

    // Entries carry no cross-entry invariant, so a poisoned lock is safe to reuse.
    fn lock(&self) -> MutexGuard<'_, CacheStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test]
    async fn test_rejects_zero_interval() {
        let result = Cache::new(Duration::ZERO);
        assert!(matches!(result, Err(PokedexError::InvalidInterval)));
    }

    #[test]
    fn test_requires_runtime() {
        let result = Cache::new(Duration::from_millis(50));
        assert!(matches!(result, Err(PokedexError::NoRuntime)));
    }

    #[tokio::test]
    async fn test_miss_then_hit() {
        let cache = Cache::new(Duration::from_secs(5)).unwrap();

        assert!(cache.get("k").is_none());

        cache.add("k", &b"value"[..]);
        assert_eq!(cache.get("k"), Some(Bytes::from_static(b"value")));
    }

    #[tokio::test]
    async fn test_overwrite() {
        let cache = Cache::new(Duration::from_secs(5)).unwrap();

        cache.add("k", &b"v1"[..]);
        cache.add("k", &b"v2"[..]);

        assert_eq!(cache.get("k"), Some(Bytes::from_static(b"v2")));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_expiry_after_two_intervals() {
        let cache = Cache::new(Duration::from_millis(50)).unwrap();

        cache.add("k", &b"value"[..]);
        sleep(Duration::from_millis(160)).await;

        assert!(cache.get("k").is_none());
        assert!(cache.is_empty());
        assert_eq!(cache.stats().reaped, 1);
    }

    #[tokio::test]
    async fn test_no_premature_expiry() {
        let cache = Cache::new(Duration::from_millis(200)).unwrap();

        cache.add("k", &b"value"[..]);
        assert_eq!(cache.get("k"), Some(Bytes::from_static(b"value")));
    }

    #[tokio::test]
    async fn test_key_independence() {
        let cache = Cache::new(Duration::from_millis(100)).unwrap();

        cache.add("a", &b"x"[..]);
        cache.add("b", &b"y"[..]);

        assert_eq!(cache.get("a"), Some(Bytes::from_static(b"x")));
        assert_eq!(cache.get("b"), Some(Bytes::from_static(b"y")));

        // Poll until "a" is reaped, then refresh only "b"
        let mut waited = Duration::ZERO;
        while cache.get("a").is_some() && waited < Duration::from_millis(500) {
            sleep(Duration::from_millis(10)).await;
            waited += Duration::from_millis(10);
        }
        assert!(cache.get("a").is_none());

        cache.add("b", &b"y2"[..]);
        assert_eq!(cache.get("b"), Some(Bytes::from_static(b"y2")));
        assert!(cache.get("a").is_none());
    }

    #[tokio::test]
    async fn test_shutdown_stops_reaping() {
        let cache = Cache::new(Duration::from_millis(30)).unwrap();
        cache.shutdown().await;

        cache.add("k", &b"value"[..]);
        sleep(Duration::from_millis(120)).await;

        // Reaper is gone, so the stale entry is still there
        assert_eq!(cache.get("k"), Some(Bytes::from_static(b"value")));

        // Second call is a no-op
        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let cache = Cache::new(Duration::from_secs(5)).unwrap();
        let other = cache.clone();

        other.add("shared", &b"1"[..]);
        assert_eq!(cache.get("shared"), Some(Bytes::from_static(b"1")));
        assert_eq!(cache.interval(), other.interval());
    }
}
