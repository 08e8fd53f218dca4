//! Configuration management for integrations.
//!
//! This module provides configuration handling with:
//! - YAML file support
//! - Human-readable durations (`30s`, `1m`)
//! - Validation and defaults

use crate::core::{Clock, IntegrationError, Result};
use crate::metrics::{Attribute, MetricSet, DEFAULT_MIN_INTERVAL};
use crate::storage::{default_path, FileStore, InMemoryStore, SharedStore, DEFAULT_TTL};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Complete configuration for an integration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Integration name, used to derive the default store path
    pub integration_name: String,
    /// Persistence configuration
    pub store: StoreConfig,
    /// Metric computation configuration
    pub metrics: MetricsConfig,
}

/// Persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Keep state on disk between runs
    pub persistent: bool,
    /// Store file; defaults to a per-integration file in the temp dir
    pub path: Option<PathBuf>,
    /// Entries older than this are dropped when the store is loaded
    #[serde(with = "humantime_serde")]
    pub ttl: Duration,
}

/// Metric computation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Samples at most this far apart reuse the previous rate/delta
    #[serde(with = "humantime_serde")]
    pub min_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            integration_name: "integration".to_string(),
            store: StoreConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            persistent: false,
            path: None,
            ttl: DEFAULT_TTL,
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        MetricsConfig {
            min_interval: DEFAULT_MIN_INTERVAL,
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Result<Self> {
        let config = Config::default();
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.integration_name.is_empty() {
            return Err(IntegrationError::config("integration_name cannot be empty"));
        }

        if self.integration_name.len() > 255 {
            return Err(IntegrationError::config(
                "integration_name cannot exceed 255 characters",
            ));
        }

        if self.integration_name.contains(['/', '\\']) {
            return Err(IntegrationError::config(format!(
                "integration_name cannot contain path separators: {}",
                self.integration_name
            )));
        }

        if self.store.persistent && self.store.ttl.is_zero() {
            return Err(IntegrationError::config(
                "store ttl must be greater than 0 for a persistent store",
            ));
        }

        Ok(())
    }

    /// Open the configured store
    pub fn open_store(&self, clock: Arc<dyn Clock>) -> Result<SharedStore> {
        self.store.open(&self.integration_name, clock)
    }

    /// Build a metric set that honours the configured minimum interval
    pub fn metric_set<I>(
        &self,
        event_type: impl Into<String>,
        store: Option<SharedStore>,
        attributes: I,
        clock: Arc<dyn Clock>,
    ) -> MetricSet
    where
        I: IntoIterator<Item = Attribute>,
    {
        let mut builder = MetricSet::builder(event_type)
            .clock(clock)
            .min_interval(self.metrics.min_interval)
            .attributes(attributes);
        if let Some(store) = store {
            builder = builder.store(store);
        }
        builder.build()
    }
}

impl StoreConfig {
    /// Resolve the store file path for an integration
    pub fn resolved_path(&self, integration_name: &str) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| default_path(integration_name))
    }

    /// Open an in-memory store, or a file store when `persistent` is set
    pub fn open(&self, integration_name: &str, clock: Arc<dyn Clock>) -> Result<SharedStore> {
        if !self.persistent {
            return Ok(SharedStore::new(InMemoryStore::new()));
        }

        let path = self.resolved_path(integration_name);
        let store = FileStore::open(path, self.ttl, clock)?;
        Ok(SharedStore::new(store))
    }
}

/// Configuration builder for programmatic construction
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with defaults
    pub fn new() -> Self {
        ConfigBuilder {
            config: Config::default(),
        }
    }

    /// Load configuration from YAML string
    pub fn from_yaml(mut self, yaml: &str) -> Result<Self> {
        self.config = serde_yaml::from_str(yaml)
            .map_err(|e| IntegrationError::config(format!("Failed to parse YAML config: {}", e)))?;
        Ok(self)
    }

    /// Set integration name
    pub fn integration_name(mut self, name: impl Into<String>) -> Self {
        self.config.integration_name = name.into();
        self
    }

    /// Enable persistent storage
    pub fn persistent(mut self, enable: bool) -> Self {
        self.config.store.persistent = enable;
        self
    }

    /// Set store file path
    pub fn store_path(mut self, path: PathBuf) -> Self {
        self.config.store.path = Some(path);
        self
    }

    /// Set store entry time-to-live
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.config.store.ttl = ttl;
        self
    }

    /// Set minimum interval between rate/delta samples
    pub fn min_interval(mut self, interval: Duration) -> Self {
        self.config.metrics.min_interval = interval;
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
