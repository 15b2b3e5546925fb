//! Binary-search primitives over a time-sorted slice of samples.
//!
//! Every time lookup in the crate (insertion, floor lookup, interpolation bracketing and range
//! clamping) goes through [`locate`], so ties are broken the same way everywhere. A time that
//! matches a run of equal-time samples resolves to the last sample of that run.

use crate::types::{Timestamp, Value};

/// The run of samples whose time equals the located timestamp.
///
/// `start..end` is empty when no sample has exactly that time; `start` is then the insertion
/// point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// First index whose time is `>= time` (may equal the slice length).
    pub start: usize,
    /// First index whose time is `> time`.
    pub end: usize,
}

impl Position {
    /// Whether at least one sample has exactly the requested time.
    #[inline]
    pub fn exact(&self) -> bool {
        self.start < self.end
    }

    /// Index of the sample a point lookup at this time resolves to, if it is stored.
    #[inline]
    pub fn resolved(&self) -> Option<usize> {
        self.exact().then(|| self.end - 1)
    }
}

/// Locates `time` in `values`, which must be sorted ascending by time.
#[inline]
pub fn locate(values: &[Value], time: Timestamp) -> Position {
    let start = values.partition_point(|v| v.time < time);
    let end = start + values[start..].partition_point(|v| v.time == time);
    Position { start, end }
}

/// Index of the last sample whose time is `<= time`.
///
/// Saturates to 0 when `time` precedes every sample and to `len - 1` when it follows all of
/// them. Returns 0 for an empty slice.
#[inline]
pub fn floor_index(values: &[Value], time: Timestamp) -> usize {
    locate(values, time).end.saturating_sub(1)
}

/// First index whose time is `>= time`, or `len` when `time` is after every sample.
#[inline]
pub fn end_index(values: &[Value], time: Timestamp) -> usize {
    locate(values, time).start
}
