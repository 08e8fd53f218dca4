//! Storage backend trait and the cached entry shape.

use crate::core::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A cached value and the instant it was observed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Cached value
    pub value: serde_json::Value,
    /// Observation time, persisted as unix milliseconds
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl CacheEntry {
    /// Create an entry.
    pub fn new(value: impl Into<serde_json::Value>, timestamp: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            timestamp,
        }
    }

    /// Age of the entry relative to `now`. Entries from the future are age zero.
    pub fn age(&self, now: DateTime<Utc>) -> std::time::Duration {
        (now - self.timestamp).to_std().unwrap_or_default()
    }
}

/// Trait for key/value persistence backends.
///
/// Lookups never mutate; `set` upserts and may be buffered until [`save`].
///
/// [`save`]: PersistentStore::save
pub trait PersistentStore: Send + std::fmt::Debug {
    /// Get an entry. `None` when the key is absent or was expired at load.
    fn get(&self, key: &str) -> Option<CacheEntry>;

    /// Insert or replace an entry.
    fn set(&mut self, key: &str, entry: CacheEntry);

    /// Flush all entries to durable storage.
    fn save(&mut self) -> Result<()>;

    /// Number of live entries.
    fn len(&self) -> usize;

    /// Whether the store holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
