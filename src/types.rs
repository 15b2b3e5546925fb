use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp type (nanoseconds since epoch).
pub type Timestamp = u64;

/// A single observation: a timestamp and the scalar measured at that instant.
///
/// Equality is structural, both `time` and `data` are compared.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Value {
    pub time: Timestamp,
    pub data: f64,
}

impl Value {
    #[inline]
    pub fn new(time: Timestamp, data: f64) -> Self {
        Self { time, data }
    }

    /// Returns a copy of this sample moved to `time`, keeping its data.
    #[inline]
    pub fn at(self, time: Timestamp) -> Self {
        Self { time, data: self.data }
    }
}

impl From<(Timestamp, f64)> for Value {
    fn from((time, data): (Timestamp, f64)) -> Self {
        Value { time, data }
    }
}

impl From<Value> for (Timestamp, f64) {
    fn from(value: Value) -> Self {
        (value.time, value.data)
    }
}

/// A closed time range `[start, end]` used to query a store.
///
/// An interval whose `start` is after its `end` is empty: queries over it return no samples and
/// an empty index span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl Interval {
    #[inline]
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Interval { start, end }
    }

    /// An interval covering a single instant.
    #[inline]
    pub fn instant(time: Timestamp) -> Self {
        Interval { start: time, end: time }
    }

    #[inline]
    pub fn contains(&self, time: Timestamp) -> bool {
        self.start <= time && time <= self.end
    }

    /// Length of the interval in nanoseconds.
    #[inline]
    pub fn span(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// Restricts this interval to `[lower, upper]`.
    ///
    /// The result may have `start > end` when the two ranges do not overlap; callers check with
    /// [`Interval::is_empty`].
    #[inline]
    pub fn clamp_to(&self, lower: Timestamp, upper: Timestamp) -> Interval {
        Interval {
            start: self.start.max(lower),
            end: self.end.min(upper),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}
