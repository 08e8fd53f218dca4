//! Metric sets: gauges, attributes, and rates/deltas derived from counters.
//!
//! ```
//! use integration_metrics::metrics::{attr, MetricSet, SourceType};
//! use integration_metrics::storage::{InMemoryStore, SharedStore};
//!
//! let store = SharedStore::new(InMemoryStore::new());
//! let mut set = MetricSet::new("NginxSample", Some(store), [attr("host", "web-1")]);
//!
//! set.set_metric("net.connectionsActive", 12, SourceType::Gauge)?;
//! set.set_metric("net.requestsPerSecond", 1_000, SourceType::Rate)?;
//! assert_eq!(set.metric("net.requestsPerSecond").and_then(|v| v.as_f64()), Some(0.0));
//! # Ok::<(), integration_metrics::IntegrationError>(())
//! ```

pub mod codec;
pub mod namespace;
pub mod set;
pub mod source_type;
pub mod value;

pub use codec::EVENT_TYPE_FIELD;
pub use namespace::{attr, namespace, Attribute};
pub use set::{MetricSet, MetricSetBuilder, DEFAULT_MIN_INTERVAL};
pub use source_type::SourceType;
pub use value::{MetricValue, RawValue};
