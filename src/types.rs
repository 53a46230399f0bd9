//! Sample, configuration and statistics types for timestore.
//!
//! Configuration is serializable so it can be loaded from JSON, or TOML with
//! the `toml` feature, alongside the rest of an application's settings.
use serde::de::Error;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime};

/// A value with the timestamp it was recorded at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample<V> {
    pub timestamp: SystemTime,
    pub value: V,
}

impl<V> Sample<V> {
    pub fn new(timestamp: SystemTime, value: V) -> Self {
        Self { timestamp, value }
    }

    /// Borrow the value while keeping the timestamp.
    pub fn as_ref(&self) -> Sample<&V> {
        Sample {
            timestamp: self.timestamp,
            value: &self.value,
        }
    }

    /// Map the value while preserving the timestamp.
    pub fn map<U, F: FnOnce(V) -> U>(self, f: F) -> Sample<U> {
        Sample {
            timestamp: self.timestamp,
            value: f(self.value),
        }
    }
}

impl<V: Clone> Sample<&V> {
    pub fn cloned(self) -> Sample<V> {
        self.map(V::clone)
    }
}

/// Slot reported by `FixedSamples::earliest` and `FixedSamples::latest`.
///
/// Before the first write both fields describe an untouched grid: the value
/// is the empty slot at the grid edge and no timestamp is reported.
#[derive(Debug, PartialEq, Eq)]
pub struct GridEntry<'a, V> {
    pub value: Option<&'a V>,
    pub timestamp: Option<SystemTime>,
}

impl<'a, V> GridEntry<'a, V> {
    /// The entry as a sample, when both a value and a timestamp are present.
    pub fn sample(&self) -> Option<Sample<&'a V>> {
        Some(Sample::new(self.timestamp?, self.value?))
    }
}

/// Fixed grid configuration.
///
/// # Example
///
/// ```rust
/// use timestore::GridConfig;
/// use std::time::Duration;
///
/// let json = r#"{
///     "granularity": { "secs": 0, "nanos": 500000000 },
///     "retention": { "secs": 3600, "nanos": 0 }
/// }"#;
/// let config = GridConfig::from_json(json).unwrap();
/// assert_eq!(config.granularity, Duration::from_millis(500));
/// assert_eq!(config.capacity(), 7200);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridConfig {
    /// Width of each slot
    #[serde(default = "GridConfig::default_granularity")]
    pub granularity: Duration,

    /// How far past `since` the grid reaches
    #[serde(default = "GridConfig::default_retention")]
    pub retention: Duration,

    /// Slot count above which construction logs a memory warning
    #[serde(default = "GridConfig::default_capacity_warning_threshold")]
    pub capacity_warning_threshold: usize,
}

impl GridConfig {
    const fn default_granularity() -> Duration {
        Duration::from_secs(1)
    }

    const fn default_retention() -> Duration {
        Duration::from_secs(60 * 60)
    }

    const fn default_capacity_warning_threshold() -> usize {
        10_000_000
    }

    pub fn with_granularity(mut self, granularity: Duration) -> Self {
        assert!(!granularity.is_zero(), "Granularity must be greater than zero");
        self.granularity = granularity;
        self
    }

    pub fn with_retention(mut self, retention: Duration) -> Self {
        self.retention = retention;
        self
    }

    pub fn with_capacity_warning_threshold(mut self, threshold: usize) -> Self {
        self.capacity_warning_threshold = threshold;
        self
    }

    /// Number of slots a grid built from this configuration holds.
    pub fn capacity(&self) -> usize {
        self.retention
            .as_nanos()
            .checked_div(self.granularity.as_nanos())
            .map_or(0, |slots| usize::try_from(slots).unwrap_or(usize::MAX))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.granularity.is_zero() {
            return Err("Granularity must be greater than zero".to_string());
        }
        if self.capacity_warning_threshold == 0 {
            return Err("Capacity warning threshold must be greater than zero".to_string());
        }
        Ok(())
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: GridConfig = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(serde_json::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load configuration from TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: GridConfig = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            granularity: Self::default_granularity(),
            retention: Self::default_retention(),
            capacity_warning_threshold: Self::default_capacity_warning_threshold(),
        }
    }
}

/// Store statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// Number of samples currently held (written slots for a grid)
    pub sample_count: usize,
    /// Fixed slot count for a grid, `None` for growable stores
    pub capacity: Option<usize>,
    /// Successful inserts, overwrites included
    pub inserts: u64,
    /// Inserts refused as out of range
    pub rejected: u64,
}
