//! Pre-allocated grid of fixed-width time slots.
//!
//! The grid covers `[since, since + retention)` in steps of `granularity`
//! and is fully allocated at construction. A timestamp is quantized to the
//! slot containing it; writing to a slot replaces whatever was there.
//! Memory use is `retention / granularity` slots regardless of how many are
//! written, so tiny granularities over long windows are expensive.

use super::{SampleIter, TimeStore};
use crate::compute::temporal::grid::{self, Position};
use crate::error::{Result, TimestoreError};
use crate::types::{GridConfig, GridEntry, Sample, StoreStats};
use std::time::{Duration, SystemTime};

/// Fixed-granularity sample grid.
///
/// Unwritten slots are `None`. Lookups that land on one report nothing.
///
/// # Examples
///
/// ```rust
/// use timestore::FixedSamples;
/// use std::time::{Duration, UNIX_EPOCH};
///
/// # fn main() -> Result<(), timestore::TimestoreError> {
/// let since = UNIX_EPOCH + Duration::from_secs(1);
/// let mut grid = FixedSamples::new(since, Duration::from_secs(1), Duration::from_secs(10))?;
///
/// grid.insert(since, "first")?;
/// assert_eq!(grid.len(), 10);
/// assert_eq!(grid.closest_before(since).map(|s| *s.value), Some("first"));
///
/// // Writes outside the window are refused
/// assert!(grid.insert(since + Duration::from_secs(11), "late").is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FixedSamples<V> {
    since: SystemTime,
    until: SystemTime,
    granularity: Duration,
    earliest: Option<usize>,
    latest: Option<usize>,
    slots: Vec<Option<V>>,
    times: Vec<SystemTime>,
    inserts: u64,
    rejected: u64,
}

impl<V> FixedSamples<V> {
    /// Create a grid covering `[since, since + retention)`.
    pub fn new(since: SystemTime, granularity: Duration, retention: Duration) -> Result<Self> {
        let config = GridConfig {
            granularity,
            retention,
            ..GridConfig::default()
        };
        Self::with_config(since, &config)
    }

    /// Create a grid from a validated configuration.
    pub fn with_config(since: SystemTime, config: &GridConfig) -> Result<Self> {
        config.validate().map_err(TimestoreError::InvalidConfig)?;

        let until = since.checked_add(config.retention).ok_or_else(|| {
            TimestoreError::InvalidConfig(format!(
                "retention of {:?} overflows the timestamp range",
                config.retention
            ))
        })?;

        let capacity = usize::try_from(grid::sample_offset(config.granularity, since, until))
            .map_err(|_| {
                TimestoreError::InvalidConfig("grid capacity does not fit in memory".to_string())
            })?;

        if capacity > config.capacity_warning_threshold {
            log::warn!(
                "Fixed grid of {} slots ({:?} at {:?} granularity) is very large and is allocated up front.",
                capacity,
                config.retention,
                config.granularity
            );
        }
        log::debug!(
            "allocating fixed grid: {} slots of {:?} from {:?}",
            capacity,
            config.granularity,
            since
        );

        Ok(Self {
            since,
            until,
            granularity: config.granularity,
            earliest: None,
            latest: None,
            slots: std::iter::repeat_with(|| None).take(capacity).collect(),
            times: grid::slot_times(since, config.granularity, capacity),
            inserts: 0,
            rejected: 0,
        })
    }

    pub fn since(&self) -> SystemTime {
        self.since
    }

    pub fn until(&self) -> SystemTime {
        self.until
    }

    pub fn granularity(&self) -> Duration {
        self.granularity
    }

    /// Slot count, fixed at construction.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Every slot, written or not, with its nominal timestamp.
    pub fn all(&self) -> (&[Option<V>], &[SystemTime]) {
        (&self.slots, &self.times)
    }

    /// Nominal timestamp of slot `index`.
    pub fn slot_time(&self, index: usize) -> Option<SystemTime> {
        self.times.get(index).copied()
    }

    /// Quantize `t` against this grid.
    pub fn position(&self, t: SystemTime) -> Position {
        grid::position(self.granularity, self.since, self.len(), t)
    }

    /// Write `value` into the slot containing `timestamp`.
    ///
    /// Fails with [`TimestoreError::OutOfRange`] when `timestamp` is before
    /// `since` or has no slot at or after `until`; the grid is not modified.
    pub fn insert(&mut self, timestamp: SystemTime, value: V) -> Result<()> {
        let index = if timestamp < self.since {
            None
        } else {
            self.position(timestamp).index(self.len())
        };

        let Some(index) = index else {
            self.rejected += 1;
            log::debug!(
                "rejecting write at {:?} outside grid window [{:?}, {:?})",
                timestamp,
                self.since,
                self.until
            );
            return Err(TimestoreError::OutOfRange {
                timestamp,
                since: self.since,
                until: self.until,
            });
        };

        self.slots[index] = Some(value);
        self.earliest = Some(self.earliest.map_or(index, |e| e.min(index)));
        self.latest = Some(self.latest.map_or(index, |l| l.max(index)));
        self.inserts += 1;
        Ok(())
    }

    /// Lowest written slot, or the first slot without a timestamp if
    /// nothing has been written yet.
    pub fn earliest(&self) -> GridEntry<'_, V> {
        match self.earliest {
            Some(index) => self.entry_at(index),
            None => GridEntry {
                value: self.slots.first().and_then(Option::as_ref),
                timestamp: None,
            },
        }
    }

    /// Highest written slot, or the last slot without a timestamp if
    /// nothing has been written yet.
    pub fn latest(&self) -> GridEntry<'_, V> {
        match self.latest {
            Some(index) => self.entry_at(index),
            None => GridEntry {
                value: self.slots.last().and_then(Option::as_ref),
                timestamp: None,
            },
        }
    }

    /// Slots strictly before the one containing `t`.
    pub fn all_before(&self, t: SystemTime) -> (&[Option<V>], &[SystemTime]) {
        match self.position(t) {
            Position::Offset(raw) if raw >= 0 => {
                let end = self.clamp(raw);
                (&self.slots[..end], &self.times[..end])
            }
            _ => (&[], &[]),
        }
    }

    /// The slot containing `t` and every slot after it.
    pub fn all_after(&self, t: SystemTime) -> (&[Option<V>], &[SystemTime]) {
        match self.position(t) {
            Position::Offset(raw) if raw >= 0 => {
                let start = self.clamp(raw);
                (&self.slots[start..], &self.times[start..])
            }
            _ => (&[], &[]),
        }
    }

    /// The slot containing `t`.
    pub fn closest_before(&self, t: SystemTime) -> Option<Sample<&V>> {
        self.sample_at(self.position(t).index(self.len())?)
    }

    /// The slot following the one containing `t`.
    ///
    /// Timestamps past the end of the grid report nothing rather than
    /// wrapping back onto the first slot.
    pub fn closest_after(&self, t: SystemTime) -> Option<Sample<&V>> {
        match self.position(t) {
            Position::TooLate => None,
            Position::Offset(raw) => {
                let next = usize::try_from(raw.checked_add(1)?).ok()?;
                self.sample_at(next)
            }
        }
    }

    /// Written slots in time order.
    pub fn iter(&self) -> impl Iterator<Item = Sample<&V>> + '_ {
        written(&self.slots, &self.times)
    }

    fn clamp(&self, raw: i64) -> usize {
        usize::try_from(raw).map_or(self.len(), |i| i.min(self.len()))
    }

    fn sample_at(&self, index: usize) -> Option<Sample<&V>> {
        let value = self.slots.get(index)?.as_ref()?;
        Some(Sample::new(*self.times.get(index)?, value))
    }

    fn entry_at(&self, index: usize) -> GridEntry<'_, V> {
        GridEntry {
            value: self.slots.get(index).and_then(Option::as_ref),
            timestamp: self.slot_time(index),
        }
    }
}

fn written<'a, V>(
    slots: &'a [Option<V>],
    times: &'a [SystemTime],
) -> impl Iterator<Item = Sample<&'a V>> + 'a {
    slots
        .iter()
        .zip(times)
        .filter_map(|(slot, t)| slot.as_ref().map(|v| Sample::new(*t, v)))
}

impl<V> TimeStore for FixedSamples<V> {
    type Value = V;

    fn insert(&mut self, timestamp: SystemTime, value: V) -> Result<()> {
        FixedSamples::insert(self, timestamp, value)
    }

    fn len(&self) -> usize {
        FixedSamples::len(self)
    }

    fn closest_before(&self, t: SystemTime) -> Option<Sample<&V>> {
        FixedSamples::closest_before(self, t)
    }

    fn closest_after(&self, t: SystemTime) -> Option<Sample<&V>> {
        FixedSamples::closest_after(self, t)
    }

    fn range_before(&self, t: SystemTime) -> SampleIter<'_, V> {
        let (slots, times) = self.all_before(t);
        Box::new(written(slots, times))
    }

    fn range_after(&self, t: SystemTime) -> SampleIter<'_, V> {
        let (slots, times) = self.all_after(t);
        Box::new(written(slots, times))
    }

    fn iter(&self) -> SampleIter<'_, V> {
        Box::new(FixedSamples::iter(self))
    }

    fn stats(&self) -> StoreStats {
        StoreStats {
            sample_count: self.slots.iter().filter(|slot| slot.is_some()).count(),
            capacity: Some(self.len()),
            inserts: self.inserts,
            rejected: self.rejected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::UNIX_EPOCH;

    fn secs(s: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(s)
    }

    /// Slots for seconds 1 through 10
    fn ten_seconds() -> FixedSamples<&'static str> {
        FixedSamples::new(secs(1), Duration::from_secs(1), Duration::from_secs(10)).unwrap()
    }

    #[test]
    fn test_construction_allocates_every_slot() {
        let grid = ten_seconds();
        assert_eq!(grid.len(), 10);
        assert_eq!(grid.until(), secs(11));
        assert_eq!(grid.slot_time(0), Some(secs(1)));
        assert_eq!(grid.slot_time(9), Some(secs(10)));
        assert_eq!(grid.slot_time(10), None);

        let (slots, times) = grid.all();
        assert!(slots.iter().all(Option::is_none));
        assert_eq!(times.len(), 10);
    }

    #[test]
    fn test_partial_trailing_slot_is_dropped() {
        let grid: FixedSamples<u8> =
            FixedSamples::new(secs(0), Duration::from_secs(3), Duration::from_secs(10)).unwrap();
        assert_eq!(grid.len(), 3);
    }

    #[test]
    fn test_zero_granularity_is_rejected() {
        let err = FixedSamples::<u8>::new(secs(0), Duration::ZERO, Duration::from_secs(10))
            .unwrap_err();
        assert!(matches!(err, TimestoreError::InvalidConfig(_)));
    }

    #[test]
    fn test_empty_grid_finds_nothing() {
        let grid = ten_seconds();
        assert_eq!(grid.closest_before(secs(1)), None);
        assert_eq!(grid.closest_after(secs(0)), None);
        assert_eq!(grid.closest_after(secs(5)), None);
    }

    #[test]
    fn test_earliest_and_latest_before_any_write() {
        let grid = ten_seconds();
        assert_eq!(
            grid.earliest(),
            GridEntry {
                value: None,
                timestamp: None
            }
        );
        assert_eq!(grid.latest().timestamp, None);
    }

    #[test]
    fn test_single_write() {
        let mut grid = ten_seconds();
        grid.insert(secs(1), "1").unwrap();

        let earliest = grid.earliest();
        assert_eq!(earliest.value, Some(&"1"));
        assert_eq!(earliest.timestamp, Some(secs(1)));

        let latest = grid.latest();
        assert_eq!(latest.value, Some(&"1"));
        assert_eq!(latest.timestamp, Some(secs(1)));

        assert_eq!(grid.closest_before(secs(1)), Some(Sample::new(secs(1), &"1")));
        // One slot before `since` steps forward onto slot 0
        assert_eq!(grid.closest_after(secs(0)), Some(Sample::new(secs(1), &"1")));
    }

    #[test]
    fn test_cursors_track_extremes() {
        let mut grid = ten_seconds();
        grid.insert(secs(5), "five").unwrap();
        grid.insert(secs(3), "three").unwrap();
        grid.insert(secs(8), "eight").unwrap();
        grid.insert(secs(4), "four").unwrap();

        assert_eq!(grid.earliest().sample(), Some(Sample::new(secs(3), &"three")));
        assert_eq!(grid.latest().sample(), Some(Sample::new(secs(8), &"eight")));
    }

    #[test]
    fn test_overwrite_keeps_last_value() {
        let mut grid = ten_seconds();
        grid.insert(secs(1), "1").unwrap();
        grid.insert(secs(1) + Duration::from_millis(900), "not1").unwrap();

        assert_eq!(grid.closest_before(secs(1)), Some(Sample::new(secs(1), &"not1")));
        assert_eq!(grid.len(), 10);
    }

    #[test]
    fn test_out_of_range_writes_fail_without_mutation() {
        let mut grid = ten_seconds();
        grid.insert(secs(4), "four").unwrap();

        for t in [
            secs(0),
            secs(1) - Duration::from_millis(500),
            secs(11),
            secs(12),
            secs(1_000),
        ] {
            let err = grid.insert(t, "nope").unwrap_err();
            assert!(err.is_out_of_range(), "write at {:?} should be refused", t);
        }

        assert_eq!(grid.earliest().timestamp, Some(secs(4)));
        assert_eq!(grid.latest().timestamp, Some(secs(4)));
        assert_eq!(grid.stats().rejected, 5);
        assert_eq!(grid.stats().sample_count, 1);
    }

    #[test]
    fn test_all_before_excludes_containing_slot() {
        let mut grid = ten_seconds();
        for s in 1..=10 {
            grid.insert(secs(s), "x").unwrap();
        }

        assert_eq!(grid.all_before(secs(1)).0.len(), 0);
        assert_eq!(grid.all_before(secs(4)).1, [secs(1), secs(2), secs(3)]);
        assert_eq!(grid.all_before(secs(11)).0.len(), 10);
        // Before the grid or far past it
        assert!(grid.all_before(secs(0)).0.is_empty());
        assert!(grid.all_before(secs(50)).0.is_empty());
    }

    #[test]
    fn test_all_after_includes_containing_slot() {
        let mut grid = ten_seconds();
        for s in 1..=10 {
            grid.insert(secs(s), "x").unwrap();
        }

        assert_eq!(grid.all_after(secs(1)).0.len(), 10);
        assert_eq!(grid.all_after(secs(8)).1, [secs(8), secs(9), secs(10)]);
        assert!(grid.all_after(secs(11)).0.is_empty());
        assert!(grid.all_after(secs(50)).0.is_empty());
    }

    #[test]
    fn test_closest_before_past_the_last_slot() {
        let mut grid = ten_seconds();
        grid.insert(secs(10), "last").unwrap();

        assert_eq!(grid.closest_before(secs(10)).map(|s| *s.value), Some("last"));
        // The instant the window closes has no slot of its own
        assert_eq!(grid.closest_before(secs(11)), None);
        assert_eq!(grid.closest_before(secs(60)), None);
    }

    #[test]
    fn test_closest_after_steps_to_next_slot() {
        let mut grid = ten_seconds();
        grid.insert(secs(5), "five").unwrap();
        grid.insert(secs(6), "six").unwrap();

        assert_eq!(grid.closest_after(secs(5)).map(|s| *s.value), Some("six"));
        assert_eq!(grid.closest_after(secs(4)).map(|s| *s.value), Some("five"));
        assert_eq!(grid.closest_after(secs(10)), None);
    }

    #[test]
    fn test_closest_after_far_future_does_not_wrap() {
        let mut grid = ten_seconds();
        grid.insert(secs(1), "first").unwrap();

        assert_eq!(grid.position(secs(100)), Position::TooLate);
        assert_eq!(grid.closest_after(secs(100)), None);
    }

    #[test]
    fn test_closest_after_well_before_since() {
        let mut grid =
            FixedSamples::new(secs(5), Duration::from_secs(1), Duration::from_secs(10)).unwrap();
        grid.insert(secs(5), "first").unwrap();

        assert_eq!(grid.closest_after(secs(4)).map(|s| *s.value), Some("first"));
        // More than one slot before `since` is not stepped over
        assert_eq!(grid.position(secs(0)), Position::Offset(-5));
        assert_eq!(grid.closest_after(secs(0)), None);
    }

    #[test]
    fn test_trait_ranges_skip_unwritten_slots() {
        let mut grid = ten_seconds();
        grid.insert(secs(2), "two").unwrap();
        grid.insert(secs(7), "seven").unwrap();

        let after: Vec<&str> = TimeStore::range_after(&grid, secs(1))
            .map(|s| *s.value)
            .collect();
        assert_eq!(after, vec!["two", "seven"]);

        let before: Vec<&str> = TimeStore::range_before(&grid, secs(7))
            .map(|s| *s.value)
            .collect();
        assert_eq!(before, vec!["two"]);

        assert_eq!(TimeStore::iter(&grid).count(), 2);
    }

    #[test]
    fn test_stats() {
        let mut grid = ten_seconds();
        grid.insert(secs(2), "a").unwrap();
        grid.insert(secs(2), "b").unwrap();
        let _ = grid.insert(secs(20), "c");

        let stats = grid.stats();
        assert_eq!(stats.capacity, Some(10));
        assert_eq!(stats.sample_count, 1);
        assert_eq!(stats.inserts, 2);
        assert_eq!(stats.rejected, 1);
    }
}
