//! Boundary search over sorted timestamp slices.
//!
//! Both functions assume `times` is non-decreasing and only ever compare
//! timestamps, never the values stored alongside them. `None` means no entry
//! qualifies, which covers the empty slice as well as queries that fall
//! entirely before or after the known range.

use std::time::SystemTime;

/// Index of the last entry whose timestamp is at or before `t`.
///
/// Among entries sharing the timestamp `t` this is the most recently
/// inserted one, since ties are stored in insertion order.
pub fn index_at_or_before(times: &[SystemTime], t: SystemTime) -> Option<usize> {
    let (first, last) = (times.first()?, times.last()?);

    // Query is beyond everything we know about
    if *last <= t {
        return Some(times.len() - 1);
    }
    if *first > t {
        return None;
    }
    if *first == t {
        return Some(0);
    }

    // Left-most entry strictly after t; the one before it is the answer.
    // first < t < last, so the partition point is in 1..len.
    let after = times.partition_point(|time| *time <= t);
    Some(after - 1)
}

/// Index of the first entry whose timestamp is at or after `t`.
pub fn index_at_or_after(times: &[SystemTime], t: SystemTime) -> Option<usize> {
    let (first, last) = (times.first()?, times.last()?);

    if *last < t {
        return None;
    }
    if *first >= t {
        return Some(0);
    }

    Some(times.partition_point(|time| *time < t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    fn secs(s: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(s)
    }

    fn series() -> Vec<SystemTime> {
        [10, 20, 20, 20, 30, 40].into_iter().map(secs).collect()
    }

    #[test]
    fn test_empty_slice_finds_nothing() {
        assert_eq!(index_at_or_before(&[], secs(5)), None);
        assert_eq!(index_at_or_after(&[], secs(5)), None);
    }

    #[test]
    fn test_at_or_before() {
        let times = series();
        assert_eq!(index_at_or_before(&times, secs(9)), None);
        assert_eq!(index_at_or_before(&times, secs(10)), Some(0));
        assert_eq!(index_at_or_before(&times, secs(15)), Some(0));
        // Last of the tied entries
        assert_eq!(index_at_or_before(&times, secs(20)), Some(3));
        assert_eq!(index_at_or_before(&times, secs(29)), Some(3));
        assert_eq!(index_at_or_before(&times, secs(40)), Some(5));
        assert_eq!(index_at_or_before(&times, secs(1_000)), Some(5));
    }

    #[test]
    fn test_at_or_after() {
        let times = series();
        assert_eq!(index_at_or_after(&times, secs(0)), Some(0));
        assert_eq!(index_at_or_after(&times, secs(10)), Some(0));
        assert_eq!(index_at_or_after(&times, secs(11)), Some(1));
        // First of the tied entries
        assert_eq!(index_at_or_after(&times, secs(20)), Some(1));
        assert_eq!(index_at_or_after(&times, secs(21)), Some(4));
        assert_eq!(index_at_or_after(&times, secs(40)), Some(5));
        assert_eq!(index_at_or_after(&times, secs(41)), None);
    }

    #[test]
    fn test_single_entry() {
        let times = vec![secs(100)];
        assert_eq!(index_at_or_before(&times, secs(99)), None);
        assert_eq!(index_at_or_before(&times, secs(100)), Some(0));
        assert_eq!(index_at_or_after(&times, secs(100)), Some(0));
        assert_eq!(index_at_or_after(&times, secs(101)), None);
    }
}
