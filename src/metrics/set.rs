//! Metric sets and the rate/delta engine.
//!
//! Gauges and attributes are stored as given. Rates and deltas are computed
//! against a baseline (the previous raw value and its timestamp) kept in a
//! [`SharedStore`] under a key namespaced by the set's attributes, so the
//! baseline survives process restarts when the store is file-backed.

use super::namespace::{namespace, Attribute};
use super::{MetricValue, RawValue, SourceType};
use crate::core::{Clock, IntegrationError, Result, SystemClock};
use crate::storage::{CacheEntry, SharedStore};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Default minimum spacing between rate/delta samples.
///
/// Samples no further apart than this reuse the previously computed value.
/// At zero only simultaneous or clock-regressed samples are affected.
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::ZERO;

/// Related metric values sharing an event type and identifying attributes.
///
/// Not internally synchronized: mutation needs `&mut self`. Sets sharing a
/// store coordinate through the store's lock.
#[derive(Debug)]
pub struct MetricSet {
    pub(crate) event_type: String,
    pub(crate) attributes: Vec<Attribute>,
    pub(crate) metrics: HashMap<String, MetricValue>,
    store: Option<SharedStore>,
    clock: Arc<dyn Clock>,
    min_interval: Duration,
}

/// Builder for [`MetricSet`].
#[derive(Debug)]
pub struct MetricSetBuilder {
    event_type: String,
    attributes: Vec<Attribute>,
    store: Option<SharedStore>,
    clock: Option<Arc<dyn Clock>>,
    min_interval: Duration,
}

impl MetricSetBuilder {
    /// Store holding rate/delta baselines.
    pub fn store(mut self, store: SharedStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Add one identifying attribute.
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(key, value));
        self
    }

    /// Add identifying attributes.
    pub fn attributes<I>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = Attribute>,
    {
        self.attributes.extend(attributes);
        self
    }

    /// Time source for rate computation. Defaults to the wall clock.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Minimum spacing between rate/delta samples.
    pub fn min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = interval;
        self
    }

    /// Build the set. Attributes are also recorded as attribute metrics.
    pub fn build(self) -> MetricSet {
        let metrics = self
            .attributes
            .iter()
            .map(|a| (a.key.clone(), MetricValue::Text(a.value.clone())))
            .collect();

        MetricSet {
            event_type: self.event_type,
            attributes: self.attributes,
            metrics,
            store: self.store,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            min_interval: self.min_interval,
        }
    }
}

impl MetricSet {
    /// Start building a set for `event_type`.
    pub fn builder(event_type: impl Into<String>) -> MetricSetBuilder {
        MetricSetBuilder {
            event_type: event_type.into(),
            attributes: Vec::new(),
            store: None,
            clock: None,
            min_interval: DEFAULT_MIN_INTERVAL,
        }
    }

    /// Create a set on the wall clock.
    pub fn new<I>(event_type: impl Into<String>, store: Option<SharedStore>, attributes: I) -> Self
    where
        I: IntoIterator<Item = Attribute>,
    {
        let mut builder = Self::builder(event_type).attributes(attributes);
        if let Some(store) = store {
            builder = builder.store(store);
        }
        builder.build()
    }

    /// Event type of every sample in the set.
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Identifying attributes, in the order supplied.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// All computed values.
    pub fn metrics(&self) -> &HashMap<String, MetricValue> {
        &self.metrics
    }

    /// One computed value.
    pub fn metric(&self, key: &str) -> Option<&MetricValue> {
        self.metrics.get(key)
    }

    /// Store backing rates and deltas, if any.
    pub fn store(&self) -> Option<&SharedStore> {
        self.store.as_ref()
    }

    /// Cache key used for `key` in this set.
    pub fn namespace(&self, key: &str) -> String {
        namespace(&self.attributes, key)
    }

    /// Record a sample.
    ///
    /// Gauges and attributes are stored directly. Rates and deltas are
    /// computed against the cached baseline; the first observation reports
    /// `0.0`. On any error neither the set nor the store is modified.
    ///
    /// # Errors
    ///
    /// - [`IntegrationError::TypeMismatch`] when the value does not fit the source type
    /// - [`IntegrationError::NoStoreConfigured`] for rates and deltas without a store
    /// - [`IntegrationError::CounterReset`] when a positive-only kind decreases
    /// - [`IntegrationError::Storage`] when the cached baseline is not a number
    pub fn set_metric(
        &mut self,
        key: &str,
        value: impl Into<RawValue>,
        source_type: SourceType,
    ) -> Result<()> {
        let value = value.into();

        match source_type {
            SourceType::Attribute => {
                let text = value
                    .as_text()
                    .ok_or_else(|| IntegrationError::type_mismatch(key, source_type, "string"))?;
                self.metrics
                    .insert(key.to_string(), MetricValue::Text(text.to_string()));
            },
            SourceType::Gauge => {
                let number = value
                    .as_f64()
                    .ok_or_else(|| IntegrationError::type_mismatch(key, source_type, "numeric"))?;
                self.metrics.insert(key.to_string(), MetricValue::Number(number));
            },
            SourceType::Rate | SourceType::PRate | SourceType::Delta | SourceType::PDelta => {
                let number = value
                    .as_f64()
                    .filter(|n| n.is_finite())
                    .ok_or_else(|| {
                        IntegrationError::type_mismatch(key, source_type, "finite numeric")
                    })?;
                self.set_stateful(key, number, source_type)?;
            },
        }

        Ok(())
    }

    fn set_stateful(&mut self, key: &str, raw: f64, source_type: SourceType) -> Result<()> {
        let store = self
            .store
            .as_ref()
            .ok_or_else(|| IntegrationError::NoStoreConfigured {
                key: key.to_string(),
                source_type,
            })?;

        let ns = namespace(&self.attributes, key);
        let mut store = store.lock();
        let now = self.clock.now();

        let Some(prior) = store.get(&ns) else {
            tracing::debug!(key, namespace = %ns, %source_type, "First observation, baseline stored");
            store.set(&ns, CacheEntry::new(raw, now));
            self.metrics.insert(key.to_string(), MetricValue::Number(0.0));
            return Ok(());
        };

        let elapsed = (now - prior.timestamp).to_std().unwrap_or_default();
        if elapsed <= self.min_interval {
            tracing::debug!(
                key,
                namespace = %ns,
                ?elapsed,
                min_interval = ?self.min_interval,
                "Sample too close to the previous one, keeping last value"
            );
            return Ok(());
        }

        let previous = prior.value.as_f64().ok_or_else(|| {
            IntegrationError::storage(format!(
                "cached value for {} is not a number: {}",
                ns, prior.value
            ))
        })?;

        let diff = raw - previous;
        let computed = if source_type.is_rate() {
            diff / elapsed.as_secs_f64()
        } else {
            diff
        };

        if source_type.is_positive_only() && computed < 0.0 {
            tracing::warn!(key, namespace = %ns, previous, current = raw, "Source was reset, skipping");
            return Err(IntegrationError::CounterReset {
                key: key.to_string(),
                previous,
                current: raw,
            });
        }

        self.metrics.insert(key.to_string(), MetricValue::Number(computed));
        store.set(&ns, CacheEntry::new(raw, now));
        Ok(())
    }
}
