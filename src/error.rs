//! Error types for timestore.

use std::time::SystemTime;
use thiserror::Error;

/// Errors surfaced by the sample stores.
///
/// Lookups that find nothing are not errors: closest lookups return `None`
/// and range lookups return empty slices.
#[derive(Debug, Error)]
pub enum TimestoreError {
    /// A fixed grid write landed before `since` or at/after `until`.
    #[error("timestamp {timestamp:?} is outside the grid window [{since:?}, {until:?})")]
    OutOfRange {
        timestamp: SystemTime,
        since: SystemTime,
        until: SystemTime,
    },

    /// Construction parameters that cannot describe a grid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "toml")]
    #[error("failed to parse TOML configuration: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[cfg(feature = "toml")]
    #[error("failed to write TOML configuration: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

impl TimestoreError {
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, TimestoreError::OutOfRange { .. })
    }
}

pub type Result<T> = std::result::Result<T, TimestoreError>;
