//! Cache Entry Module
//!
//! Defines a single cached response body and its insertion time.

use std::time::{Duration, Instant};

use bytes::Bytes;

// == Cache Entry ==
/// Represents a single cache entry: an opaque payload and when it was stored.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored payload
    pub value: Bytes,
    /// Monotonic insertion time
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current instant.
    pub fn new(value: Bytes) -> Self {
        Self::created_at(value, Instant::now())
    }

    /// Creates an entry with an explicit insertion time.
    pub fn created_at(value: Bytes, created_at: Instant) -> Self {
        Self { value, created_at }
    }

    // == Age ==
    /// Age of the entry as seen at `now`.
    ///
    /// Saturates to zero if `now` precedes `created_at`, so the age is never negative.
    pub fn age_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Is Expired ==
    /// Checks whether the entry has outlived `max_age` at `now`.
    ///
    /// Boundary condition: an entry whose age equals `max_age` is expired.
    pub fn is_expired_at(&self, now: Instant, max_age: Duration) -> bool {
        self.age_at(now) >= max_age
    }
}
