//! A store handle shared by several metric sets.

use super::PersistentStore;
use crate::core::Result;
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

/// Cloneable handle to one store.
///
/// Locking discipline: a caller performing a read-modify-write on a cached
/// entry takes [`SharedStore::lock`] once and holds the guard across the whole
/// get/compute/set sequence. Metric sets do this inside `set_metric`, so sets
/// sharing a handle never interleave on the same entry.
#[derive(Debug, Clone)]
pub struct SharedStore {
    inner: Arc<Mutex<Box<dyn PersistentStore>>>,
}

impl SharedStore {
    /// Wrap a backend.
    pub fn new<S: PersistentStore + 'static>(store: S) -> Self {
        Self::from_boxed(Box::new(store))
    }

    /// Wrap an already boxed backend.
    pub fn from_boxed(store: Box<dyn PersistentStore>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Take the exclusive lock.
    pub fn lock(&self) -> MutexGuard<'_, Box<dyn PersistentStore>> {
        self.inner.lock()
    }

    /// Flush the backend to durable storage.
    pub fn save(&self) -> Result<()> {
        self.inner.lock().save()
    }
}
