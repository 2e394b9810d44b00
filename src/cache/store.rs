//! In-memory store for minimal API responses
//!
//! Provides a `CacheStore` that maps cache keys to the decoded body of the last
//! successful fetch, together with the time it was stored. Freshness is never
//! decided here: each read supplies its own TTL.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Minimal response payload: only the decoded body survives
///
/// Status codes, headers and the target URL are dropped before a response is
/// stored or returned from the cached read path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedResponse<T> {
    /// The decoded response body
    pub data: T,
}

/// A stored response and when it was stored
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// The stored payload, kept as raw JSON so one store serves every body type
    pub value: CachedResponse<serde_json::Value>,
    /// When the payload was written
    pub stored_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Age of the entry at `now`
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.stored_at
    }

    /// Whether the entry is still usable for a read with the given TTL in seconds
    ///
    /// Fresh means strictly younger than the TTL, so an entry exactly `ttl_secs`
    /// old is stale.
    pub fn is_fresh(&self, ttl_secs: u64, now: DateTime<Utc>) -> bool {
        let ttl = i64::try_from(ttl_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX);
        self.age(now) < ttl
    }
}

/// Keyed store of previously fetched responses
///
/// Construct one per process (or per test) and share it by `Arc`. Entries are
/// never evicted; a later write for the same key replaces the earlier one.
#[derive(Debug, Default)]
pub struct CacheStore {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl CacheStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock still guards plain data, so keep using it.
    fn entries(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Looks up the entry for `key`
    ///
    /// Returns `None` when nothing was ever stored under the key. Stale entries
    /// are returned as well; the caller decides with [`CacheEntry::is_fresh`].
    pub fn get(&self, key: &str) -> Option<CacheEntry> {
        self.entries().get(key).cloned()
    }

    /// Stores `value` under `key`, stamped with the current time
    pub fn set(&self, key: impl Into<String>, value: CachedResponse<serde_json::Value>) {
        self.set_at(key, value, Utc::now());
    }

    /// Stores `value` under `key` with an explicit timestamp
    ///
    /// Useful for pre-warming the store with data fetched elsewhere.
    pub fn set_at(
        &self,
        key: impl Into<String>,
        value: CachedResponse<serde_json::Value>,
        stored_at: DateTime<Utc>,
    ) {
        self.entries()
            .insert(key.into(), CacheEntry { value, stored_at });
    }

    /// Number of stored entries, fresh or stale
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Whether nothing has been stored yet
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}
