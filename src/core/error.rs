//! Error type shared by every module of the crate.

use crate::metrics::SourceType;
use thiserror::Error;

/// Errors returned by metric sets, stores and configuration.
#[derive(Error, Debug)]
pub enum IntegrationError {
    /// The value does not fit the source type.
    #[error("Type mismatch for metric {key}: {source_type} requires a {expected} value")]
    TypeMismatch {
        /// Metric key
        key: String,
        /// Requested source type
        source_type: SourceType,
        /// Kind of value the source type accepts
        expected: &'static str,
    },

    /// A source type name or code outside the known set.
    #[error("Unknown source type: {0}")]
    UnknownSourceType(String),

    /// A rate or delta was requested on a set without a store.
    #[error("No store configured: metric {key} uses {source_type}, which needs prior state")]
    NoStoreConfigured {
        /// Metric key
        key: String,
        /// Requested source type
        source_type: SourceType,
    },

    /// A positive-only counter went down.
    #[error("Counter reset for metric {key}: {current} is below the previous value {previous}")]
    CounterReset {
        /// Metric key
        key: String,
        /// Cached raw value
        previous: f64,
        /// New raw value
        current: f64,
    },

    /// Store contents could not be used.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for integration operations
pub type Result<T> = std::result::Result<T, IntegrationError>;

impl IntegrationError {
    /// Creates a new storage error
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        Self::Storage(msg.into())
    }

    /// Creates a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a new type mismatch error
    pub fn type_mismatch<S: Into<String>>(
        key: S,
        source_type: SourceType,
        expected: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            key: key.into(),
            source_type,
            expected,
        }
    }

    /// Returns true if callers are expected to tolerate this error and keep going.
    ///
    /// Only counter resets qualify: instrumentation restarting with a fresh
    /// counter is routine.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::CounterReset { .. })
    }

    /// Returns the error category for metrics/logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::TypeMismatch { .. } | Self::UnknownSourceType(_) => "validation",
            Self::NoStoreConfigured { .. } => "config",
            Self::Config(_) => "config",
            Self::CounterReset { .. } => "counter_reset",
            Self::Storage(_) => "storage",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
        }
    }
}
