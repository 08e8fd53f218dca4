//! Persistence for rate and delta baselines.
//!
//! This module provides the store interface and its two backends:
//! an in-memory map and a JSON file with per-entry time-to-live.

use std::path::PathBuf;
use std::time::Duration;

pub mod backend;
pub mod file;
pub mod memory;
pub mod shared;

// Re-export commonly used types
pub use backend::{CacheEntry, PersistentStore};
pub use file::FileStore;
pub use memory::InMemoryStore;
pub use shared::SharedStore;

/// Default time-to-live for file store entries.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Default store file for an integration: `<tmp>/nr-integrations/<name>.json`.
pub fn default_path(integration_name: &str) -> PathBuf {
    std::env::temp_dir()
        .join("nr-integrations")
        .join(format!("{integration_name}.json"))
}
