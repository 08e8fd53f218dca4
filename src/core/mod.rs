//! Ambient building blocks: errors, configuration and time.

#![warn(missing_docs)]

pub mod clock;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Config, ConfigBuilder, MetricsConfig, StoreConfig};
pub use error::{IntegrationError, Result};
