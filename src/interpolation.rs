//! Interpolation policies used to resolve query times that fall between stored samples.

use crate::types::{Timestamp, Value};
use serde::{Deserialize, Serialize};

/// How a query time between two samples is resolved. Fixed when a store is constructed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationMode {
    /// Proportional blend of the bracketing samples by elapsed-time fraction.
    #[default]
    Linear,
    /// Hold the most recent sample at or before the query time.
    StepHold,
}

impl InterpolationMode {
    #[inline]
    pub fn is_step(self) -> bool {
        matches!(self, InterpolationMode::StepHold)
    }
}

/// Linear blend of `lo` and `hi` evaluated at `time`.
///
/// Also used for extrapolation past `hi`: the slope between the two samples is extended. When
/// both samples share a timestamp the slope is undefined and `hi` is held.
#[inline]
pub fn interpolate(lo: Value, hi: Value, time: Timestamp) -> f64 {
    let span = hi.time as i128 - lo.time as i128;
    if span == 0 {
        return hi.data;
    }
    let elapsed = time as i128 - lo.time as i128;
    lo.data + (hi.data - lo.data) * (elapsed as f64 / span as f64)
}

/// Resolves a value at `time` strictly inside `(lo.time, hi.time)` under `mode`.
#[inline]
pub fn resolve(mode: InterpolationMode, lo: Value, hi: Value, time: Timestamp) -> Value {
    match mode {
        InterpolationMode::Linear => Value::new(time, interpolate(lo, hi, time)),
        InterpolationMode::StepHold => lo.at(time),
    }
}
