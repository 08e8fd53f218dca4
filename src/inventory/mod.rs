//! Inventory data produced by an integration.
//!
//! Items are keyed by name and hold arbitrary JSON fields. The map sits
//! behind one mutex, so a shared `Inventory` can be filled from several
//! threads.

use parking_lot::Mutex;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Fields of one inventory item.
pub type Item = BTreeMap<String, serde_json::Value>;

/// All inventory items by key.
pub type Items = BTreeMap<String, Item>;

/// Inventory store.
#[derive(Debug, Default)]
pub struct Inventory {
    items: Mutex<Items>,
}

impl Inventory {
    /// Create an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one field of an item, creating the item if needed.
    pub fn set_item(&self, key: &str, field: &str, value: impl Into<serde_json::Value>) {
        self.items
            .lock()
            .entry(key.to_string())
            .or_default()
            .insert(field.to_string(), value.into());
    }

    /// A copy of one item.
    pub fn item(&self, key: &str) -> Option<Item> {
        self.items.lock().get(key).cloned()
    }

    /// A copy of every item.
    pub fn items(&self) -> Items {
        self.items.lock().clone()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    /// Whether no item has been set.
    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

impl Serialize for Inventory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.lock().serialize(serializer)
    }
}
