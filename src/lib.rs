//! Integration metrics - metric sets for monitoring-agent integrations.
//!
//! Integrations group related samples into metric sets sharing an event type
//! and identifying attributes. Gauges and attributes are reported as given;
//! rates and deltas are derived from raw counters against a baseline kept in
//! a pluggable store, so derivation continues across process restarts.
//!
//! # Architecture
//!
//! - `core`: errors, configuration and injectable clocks
//! - `storage`: the persistence trait with in-memory and file backends
//! - `metrics`: metric sets, source types, cache namespacing and the JSON codec
//! - `inventory`: key/field inventory data
//!
//! # Example
//!
//! ```no_run
//! use integration_metrics::core::{Config, SystemClock};
//! use integration_metrics::metrics::{attr, SourceType};
//! use std::sync::Arc;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::new()?;
//!     let clock = Arc::new(SystemClock);
//!     let store = config.open_store(clock.clone())?;
//!
//!     let mut set = config.metric_set("RedisSample", Some(store.clone()), [attr("port", "6379")], clock);
//!     set.set_metric("net.commandsProcessedPerSecond", 1_234_567, SourceType::Rate)?;
//!     println!("{}", set.to_json()?);
//!
//!     store.save()?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod core;
pub mod inventory;
pub mod metrics;
pub mod storage;

// Re-export core types for convenience
pub use crate::core::{Config, IntegrationError, Result};
pub use crate::metrics::{MetricSet, SourceType};
