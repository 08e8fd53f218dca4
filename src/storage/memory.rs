//! In-memory store with no durability.

use super::{CacheEntry, PersistentStore};
use crate::core::Result;
use std::collections::HashMap;

/// Process-lifetime store. `save` is a no-op.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: HashMap<String, CacheEntry>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistentStore for InMemoryStore {
    fn get(&self, key: &str) -> Option<CacheEntry> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, entry: CacheEntry) {
        self.entries.insert(key.to_string(), entry);
    }

    fn save(&mut self) -> Result<()> {
        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
