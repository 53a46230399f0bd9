//! Growable sample list kept sorted by timestamp.
//!
//! Timestamps and values live in two co-indexed vectors so the boundary
//! search only ever touches the timestamps. Inserts append in O(1) when
//! samples arrive in order and fall back to a binary search plus a shift
//! otherwise. Samples sharing a timestamp keep their insertion order.

use super::{SampleIter, TimeStore};
use crate::compute::temporal::search::{index_at_or_after, index_at_or_before};
use crate::error::Result;
use crate::types::{Sample, StoreStats};
use std::time::SystemTime;

/// Timestamp-sorted list of samples.
///
/// # Examples
///
/// ```rust
/// use timestore::OrderedSamples;
/// use std::time::{Duration, UNIX_EPOCH};
///
/// let at = |s| UNIX_EPOCH + Duration::from_secs(s);
/// let mut samples = OrderedSamples::new();
/// samples.insert(at(30), "c");
/// samples.insert(at(10), "a");
/// samples.insert(at(20), "b");
///
/// let (values, _) = samples.all();
/// assert_eq!(values, ["a", "b", "c"]);
/// assert_eq!(samples.closest_before(at(25)).map(|s| *s.value), Some("b"));
/// assert_eq!(samples.closest_after(at(31)), None);
/// ```
#[derive(Debug, Clone)]
pub struct OrderedSamples<V> {
    times: Vec<SystemTime>,
    values: Vec<V>,
    inserts: u64,
}

impl<V> OrderedSamples<V> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create with room for `capacity` samples before reallocating
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            times: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
            inserts: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values and timestamps in order.
    ///
    /// The slices borrow the store, so they describe its state at the time
    /// of the call only.
    pub fn all(&self) -> (&[V], &[SystemTime]) {
        (&self.values, &self.times)
    }

    pub fn first(&self) -> Option<Sample<&V>> {
        self.sample_at(0)
    }

    pub fn last(&self) -> Option<Sample<&V>> {
        self.sample_at(self.len().checked_sub(1)?)
    }

    /// Insert a sample, keeping timestamps sorted.
    ///
    /// Any timestamp is accepted. A sample whose timestamp matches existing
    /// ones is placed after all of them.
    pub fn insert(&mut self, timestamp: SystemTime, value: V) {
        self.inserts += 1;

        match (self.times.first().copied(), self.times.last().copied()) {
            (Some(first), Some(last)) if last >= timestamp => {
                let index = if timestamp < first {
                    0
                } else {
                    self.times.partition_point(|t| *t <= timestamp)
                };
                self.times.insert(index, timestamp);
                self.values.insert(index, value);
            }
            // Empty, or the new latest sample
            _ => {
                self.times.push(timestamp);
                self.values.push(value);
            }
        }
    }

    /// Nearest sample at or before `t`, the latest inserted one on ties.
    pub fn closest_before(&self, t: SystemTime) -> Option<Sample<&V>> {
        self.sample_at(index_at_or_before(&self.times, t)?)
    }

    /// Nearest sample at or after `t`, the earliest inserted one on ties.
    pub fn closest_after(&self, t: SystemTime) -> Option<Sample<&V>> {
        self.sample_at(index_at_or_after(&self.times, t)?)
    }

    /// All samples with timestamps at or before `t`.
    pub fn all_before(&self, t: SystemTime) -> (&[V], &[SystemTime]) {
        match index_at_or_before(&self.times, t) {
            Some(i) => (&self.values[..=i], &self.times[..=i]),
            None => (&[], &[]),
        }
    }

    /// All samples with timestamps at or after `t`.
    pub fn all_after(&self, t: SystemTime) -> (&[V], &[SystemTime]) {
        match index_at_or_after(&self.times, t) {
            Some(i) => (&self.values[i..], &self.times[i..]),
            None => (&[], &[]),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Sample<&V>> + '_ {
        pair(&self.values, &self.times)
    }

    fn sample_at(&self, index: usize) -> Option<Sample<&V>> {
        Some(Sample::new(*self.times.get(index)?, self.values.get(index)?))
    }
}

fn pair<'a, V>(
    values: &'a [V],
    times: &'a [SystemTime],
) -> impl Iterator<Item = Sample<&'a V>> + 'a {
    times
        .iter()
        .zip(values)
        .map(|(t, v)| Sample::new(*t, v))
}

impl<V> Default for OrderedSamples<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Extend<Sample<V>> for OrderedSamples<V> {
    fn extend<I: IntoIterator<Item = Sample<V>>>(&mut self, iter: I) {
        for sample in iter {
            self.insert(sample.timestamp, sample.value);
        }
    }
}

impl<V> FromIterator<Sample<V>> for OrderedSamples<V> {
    fn from_iter<I: IntoIterator<Item = Sample<V>>>(iter: I) -> Self {
        let mut samples = Self::new();
        samples.extend(iter);
        samples
    }
}

impl<V> TimeStore for OrderedSamples<V> {
    type Value = V;

    fn insert(&mut self, timestamp: SystemTime, value: V) -> Result<()> {
        OrderedSamples::insert(self, timestamp, value);
        Ok(())
    }

    fn len(&self) -> usize {
        OrderedSamples::len(self)
    }

    fn closest_before(&self, t: SystemTime) -> Option<Sample<&V>> {
        OrderedSamples::closest_before(self, t)
    }

    fn closest_after(&self, t: SystemTime) -> Option<Sample<&V>> {
        OrderedSamples::closest_after(self, t)
    }

    fn range_before(&self, t: SystemTime) -> SampleIter<'_, V> {
        let (values, times) = self.all_before(t);
        Box::new(pair(values, times))
    }

    fn range_after(&self, t: SystemTime) -> SampleIter<'_, V> {
        let (values, times) = self.all_after(t);
        Box::new(pair(values, times))
    }

    fn iter(&self) -> SampleIter<'_, V> {
        Box::new(OrderedSamples::iter(self))
    }

    fn stats(&self) -> StoreStats {
        StoreStats {
            sample_count: self.len(),
            capacity: None,
            inserts: self.inserts,
            rejected: 0,
        }
    }
}
