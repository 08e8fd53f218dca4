//! File-backed store with per-entry time-to-live.
//!
//! The whole file is read once at open and rewritten on [`FileStore::save`].
//! Entries older than the TTL at open time are discarded, which restarts
//! rate/delta derivation for integrations that have not run for a while.

use super::{CacheEntry, PersistentStore};
use crate::core::{Clock, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Durable store persisted as one JSON document.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    entries: BTreeMap<String, CacheEntry>,
}

impl FileStore {
    /// Open the store at `path`, loading unexpired entries if the file exists.
    pub fn open(path: impl Into<PathBuf>, ttl: Duration, clock: Arc<dyn Clock>) -> Result<Self> {
        let path = path.into();
        let mut entries = load(&path)?;

        let now = clock.now();
        let loaded = entries.len();
        entries.retain(|_, entry| entry.age(now) <= ttl);

        tracing::debug!(
            path = %path.display(),
            loaded,
            expired = loaded - entries.len(),
            ?ttl,
            "Opened file store"
        );

        Ok(Self {
            path,
            ttl,
            clock,
            entries,
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entry time-to-live applied at load.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

fn load(path: &Path) -> Result<BTreeMap<String, CacheEntry>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(e) => return Err(e.into()),
    };

    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    Ok(serde_json::from_str(&content)?)
}

impl PersistentStore for FileStore {
    fn get(&self, key: &str) -> Option<CacheEntry> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, entry: CacheEntry) {
        self.entries.insert(key.to_string(), entry);
    }

    /// Write every entry to a sibling temp file, then rename it over the
    /// target. On failure the previous file is left as it was.
    fn save(&mut self) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer(&mut writer, &self.entries)?;
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        tracing::debug!(
            path = %self.path.display(),
            entries = self.entries.len(),
            at = %self.clock.now(),
            "Saved file store"
        );
        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
