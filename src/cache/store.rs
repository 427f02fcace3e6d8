//! Cache Store Module
//!
//! Unsynchronised storage behind the shared cache handle: a HashMap of
//! response bodies keyed by request URL, plus lookup statistics.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use bytes::Bytes;

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Key-value storage with age-based reaping.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Performance statistics
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Add ==
    /// Stores a payload under `key`.
    ///
    /// An existing entry is replaced outright, including its creation time.
    pub fn add(&mut self, key: String, value: Bytes) {
        self.add_at(key, value, Instant::now());
    }

    /// Stores a payload with an explicit creation time.
    pub fn add_at(&mut self, key: String, value: Bytes, created_at: Instant) {
        self.entries
            .insert(key, CacheEntry::created_at(value, created_at));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Retrieves a payload by key.
    ///
    /// Lookups never touch the entry, so reading does not extend its life.
    pub fn get(&mut self, key: &str) -> Option<Bytes> {
        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Reap ==
    /// Removes every entry at least `max_age` old.
    ///
    /// Returns the number of entries removed.
    pub fn reap(&mut self, max_age: Duration) -> usize {
        self.reap_at(Instant::now(), max_age)
    }

    /// Removes every entry at least `max_age` old as of `now`.
    pub fn reap_at(&mut self, now: Instant, max_age: Duration) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| !entry.is_expired_at(now, max_age));

        let removed = before - self.entries.len();
        self.stats.record_reaped(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
