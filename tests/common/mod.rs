//! Common test utilities and fixtures.

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use integration_metrics::core::ManualClock;
use integration_metrics::metrics::{Attribute, MetricSet};
use integration_metrics::storage::{FileStore, SharedStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// TTL used by file stores in tests.
pub const TEST_TTL: Duration = Duration::from_secs(3600);

/// Route the crate's debug logs to the test harness output.
///
/// Safe to call from every test; only the first call installs a subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// A manual clock at a fixed, readable instant. Also installs test logging.
pub fn test_clock() -> Arc<ManualClock> {
    init_tracing();
    Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()))
}

/// Scratch directory plus the store path inside it.
pub fn temp_store_path() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.json");
    (dir, path)
}

/// Open a shared file store on `clock`.
pub fn open_file_store(path: &Path, clock: &Arc<ManualClock>) -> SharedStore {
    SharedStore::new(FileStore::open(path, TEST_TTL, clock.clone()).unwrap())
}

/// Test fixture builder for metric sets with sensible defaults.
pub struct TestSetBuilder {
    event_type: String,
    attributes: Vec<Attribute>,
    store: Option<SharedStore>,
    clock: Arc<ManualClock>,
}

impl TestSetBuilder {
    pub fn new(clock: &Arc<ManualClock>) -> Self {
        Self {
            event_type: "some-event-type".to_string(),
            attributes: Vec::new(),
            store: None,
            clock: Arc::clone(clock),
        }
    }

    pub fn event_type(mut self, event_type: &str) -> Self {
        self.event_type = event_type.to_string();
        self
    }

    pub fn attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.push(Attribute::new(key, value));
        self
    }

    pub fn store(mut self, store: &SharedStore) -> Self {
        self.store = Some(store.clone());
        self
    }

    pub fn build(self) -> MetricSet {
        let mut builder = MetricSet::builder(self.event_type)
            .attributes(self.attributes)
            .clock(self.clock);
        if let Some(store) = self.store {
            builder = builder.store(store);
        }
        builder.build()
    }
}

/// Numeric value of a metric, panicking when absent or textual.
pub fn number(set: &MetricSet, key: &str) -> f64 {
    set.metric(key)
        .and_then(|v| v.as_f64())
        .unwrap_or_else(|| panic!("metric {key} is not a number: {:?}", set.metric(key)))
}

/// Advance the clock by whole seconds.
pub fn tick(clock: &ManualClock, secs: u64) {
    clock.advance(Duration::from_secs(secs));
}
