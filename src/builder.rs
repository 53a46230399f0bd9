//! Grid builder for configuration-driven construction
//!
//! This module provides a builder pattern for creating fixed grids from a
//! [`GridConfig`], with individual settings overridable in code.

use crate::error::Result;
use crate::storage::FixedSamples;
use crate::types::GridConfig;
use std::time::{Duration, SystemTime};

/// Builder for [`FixedSamples`] grids.
#[derive(Debug, Clone)]
pub struct GridBuilder {
    since: Option<SystemTime>,
    config: GridConfig,
}

impl GridBuilder {
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self {
            since: None,
            config: GridConfig::default(),
        }
    }

    /// Start the grid at `since`. Defaults to the moment `build` is called.
    pub fn since(mut self, since: SystemTime) -> Self {
        self.since = Some(since);
        self
    }

    /// Set the slot width. Zero is refused by `build`.
    pub fn granularity(mut self, granularity: Duration) -> Self {
        self.config.granularity = granularity;
        self
    }

    /// Set how far past `since` the grid reaches.
    pub fn retention(mut self, retention: Duration) -> Self {
        self.config.retention = retention;
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: GridConfig) -> Self {
        self.config = config;
        self
    }

    /// Load the configuration from JSON.
    pub fn config_json(self, json: &str) -> Result<Self> {
        Ok(self.config(GridConfig::from_json(json)?))
    }

    /// Load the configuration from TOML (requires toml feature).
    #[cfg(feature = "toml")]
    pub fn config_toml(self, toml_str: &str) -> Result<Self> {
        Ok(self.config(GridConfig::from_toml(toml_str)?))
    }

    /// Build the grid, allocating every slot.
    pub fn build<V>(self) -> Result<FixedSamples<V>> {
        let since = self.since.unwrap_or_else(SystemTime::now);
        FixedSamples::with_config(since, &self.config)
    }
}

impl Default for GridBuilder {
    fn default() -> Self {
        Self::new()
    }
}
