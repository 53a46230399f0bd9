//! Quantization of time into fixed-width grid slots.

use std::time::{Duration, SystemTime};

/// Where a timestamp falls relative to a grid of `capacity` slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Raw slot offset from `since`. Negative when the timestamp precedes
    /// `since`; may equal `capacity` for the instant the window closes.
    Offset(i64),
    /// The timestamp lies more than one slot past the end of the grid.
    TooLate,
}

impl Position {
    /// The offset as a usable slot index, if it addresses a slot in `0..capacity`.
    pub fn index(self, capacity: usize) -> Option<usize> {
        match self {
            Position::Offset(raw) => usize::try_from(raw).ok().filter(|&i| i < capacity),
            Position::TooLate => None,
        }
    }
}

/// Signed nanoseconds from `since` to `t`.
fn signed_elapsed(since: SystemTime, t: SystemTime) -> i128 {
    match t.duration_since(since) {
        Ok(elapsed) => elapsed.as_nanos() as i128,
        Err(err) => -(err.duration().as_nanos() as i128),
    }
}

/// Number of whole `granularity` steps between `since` and `t`.
///
/// Division truncates toward zero, so a timestamp less than one step before
/// `since` yields `0` and earlier ones yield negative offsets. A zero
/// granularity quantizes everything to `0`; grids refuse it at construction.
pub fn sample_offset(granularity: Duration, since: SystemTime, t: SystemTime) -> i64 {
    let step = granularity.as_nanos() as i128;
    let raw = signed_elapsed(since, t).checked_div(step).unwrap_or(0);
    i64::try_from(raw).unwrap_or(if raw < 0 { i64::MIN } else { i64::MAX })
}

/// Classify `t` against a grid of `capacity` slots starting at `since`.
pub fn position(
    granularity: Duration,
    since: SystemTime,
    capacity: usize,
    t: SystemTime,
) -> Position {
    let raw = sample_offset(granularity, since, t);
    match i64::try_from(capacity) {
        Ok(cap) if raw > cap => Position::TooLate,
        _ => Position::Offset(raw),
    }
}

/// Nominal timestamps of `count` consecutive slots: `since + granularity * i`.
pub fn slot_times(since: SystemTime, granularity: Duration, count: usize) -> Vec<SystemTime> {
    std::iter::successors(Some(since), |t| t.checked_add(granularity))
        .take(count)
        .collect()
}
