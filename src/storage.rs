//! Storage engine abstraction for timestore
//!
//! This module provides a trait over the two sample engines so callers can
//! pick a layout for their access pattern while keeping one query API:
//!
//! - [`OrderedSamples`]: a growable, timestamp-sorted list for sparse or
//!   irregular arrivals.
//! - [`FixedSamples`]: a pre-allocated grid of fixed-width slots for dense,
//!   regular polling within a bounded horizon.
//!
//! Neither engine synchronizes internally. Mutation takes `&mut self`; share
//! a store across threads through an external lock (see `SyncStore` with the
//! `sync` feature).

pub mod fixed;
pub mod ordered;

pub use fixed::FixedSamples;
pub use ordered::OrderedSamples;

use crate::error::Result;
use crate::types::{Sample, StoreStats};
use std::time::SystemTime;

/// Boxed iterator of borrowed samples, in timestamp order.
pub type SampleIter<'a, V> = Box<dyn Iterator<Item = Sample<&'a V>> + 'a>;

/// Trait for sample store implementations
pub trait TimeStore {
    /// Payload carried alongside each timestamp
    type Value;

    /// Record `value` at `timestamp`
    fn insert(&mut self, timestamp: SystemTime, value: Self::Value) -> Result<()>;

    /// Number of addressable entries: samples for a list, slots for a grid
    fn len(&self) -> usize;

    /// Check if the store has no addressable entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Nearest sample at or before `t`
    fn closest_before(&self, t: SystemTime) -> Option<Sample<&Self::Value>>;

    /// Nearest sample at or after `t`
    fn closest_after(&self, t: SystemTime) -> Option<Sample<&Self::Value>>;

    /// Samples up to `t`, following the engine's boundary rules
    fn range_before(&self, t: SystemTime) -> SampleIter<'_, Self::Value>;

    /// Samples from `t` onwards, following the engine's boundary rules
    fn range_after(&self, t: SystemTime) -> SampleIter<'_, Self::Value>;

    /// Every stored sample
    fn iter(&self) -> SampleIter<'_, Self::Value>;

    /// Get store statistics
    fn stats(&self) -> StoreStats;
}
