use crate::error::StoreError;
use crate::interpolation::{interpolate, resolve, InterpolationMode};
use crate::search::{end_index, floor_index, locate};
use crate::types::{Interval, Timestamp, Value};
use rayon::prelude::*;
use std::ops::Range;

/// Resolves the value at `time` over a time-sorted slice.
///
/// * An exact match is returned unmodified. With several samples at `time`, the last of them
///   is returned, the same sample [`floor_index`] selects.
/// * Before the first sample, the first sample is returned (no backward extrapolation).
/// * After the last sample, `Linear` extends the slope of the last two samples and `StepHold`
///   holds the last value.
/// * Between two samples, the bracketing pair is resolved under `mode`.
///
/// # Errors
/// Returns [`StoreError::EmptySeries`] when `values` is empty.
pub fn value_at(
    values: &[Value],
    mode: InterpolationMode,
    time: Timestamp,
) -> Result<Value, StoreError> {
    let (first, last) = match (values.first(), values.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Err(StoreError::EmptySeries),
    };

    if time < first.time {
        return Ok(first);
    }

    let position = locate(values, time);
    if let Some(index) = position.resolved() {
        return Ok(values[index]);
    }

    let count = values.len();
    if position.start == count {
        // Past the tail: a single sample has no slope to extend.
        return Ok(match mode {
            InterpolationMode::Linear if count >= 2 => {
                Value::new(time, interpolate(values[count - 2], last, time))
            }
            _ => last.at(time),
        });
    }

    // `time > first.time`, so there is always a sample before `position.start`.
    Ok(resolve(
        mode,
        values[position.start - 1],
        values[position.start],
        time,
    ))
}

/// Extracts the samples covering `interval`, synthesizing values at its edges.
///
/// The interval is first clamped to `[first.time, last.time]`. Every stored sample inside the
/// clamped interval, edges included, is returned in order. An edge with no stored sample gets a
/// value resolved under `mode` at that time instead. An interval that does not overlap the data
/// yields an empty vector.
///
/// # Errors
/// Returns [`StoreError::EmptySeries`] when `values` is empty.
pub fn extract_range(
    values: &[Value],
    interval: Interval,
    mode: InterpolationMode,
) -> Result<Vec<Value>, StoreError> {
    let (first, last) = match (values.first(), values.last()) {
        (Some(first), Some(last)) => (first.time, last.time),
        _ => return Err(StoreError::EmptySeries),
    };

    let clamped = interval.clamp_to(first, last);
    if clamped.is_empty() {
        return Ok(Vec::new());
    }

    let start = locate(values, clamped.start);
    if clamped.start == clamped.end {
        return Ok(if start.exact() {
            values[start.start..start.end].to_vec()
        } else {
            vec![value_at(values, mode, clamped.start)?]
        });
    }

    // A missing edge has an empty run, so this slice is exactly the stored samples in range.
    let end = locate(values, clamped.end);
    let stored = &values[start.start..end.end];

    let mut results = Vec::with_capacity(stored.len() + 2);
    if !start.exact() {
        results.push(value_at(values, mode, clamped.start)?);
    }
    results.extend_from_slice(stored);
    if !end.exact() {
        results.push(value_at(values, mode, clamped.end)?);
    }

    Ok(results)
}

/// Computes the half-open index span of stored samples overlapping `interval`.
///
/// `start` is the floor index of `interval.start`; `end` is the first index whose time is
/// `>= interval.end`, or `values.len()` when the interval extends past the last sample.
///
/// # Errors
/// Returns [`StoreError::EmptySeries`] when `values` is empty.
pub fn index_range(values: &[Value], interval: Interval) -> Result<Range<usize>, StoreError> {
    if values.is_empty() {
        return Err(StoreError::EmptySeries);
    }
    let start = floor_index(values, interval.start);
    let end = end_index(values, interval.end).max(start);
    Ok(start..end)
}

/// Resolves many point queries in parallel.
pub fn execute_point_batch(
    values: &[Value],
    times: &[Timestamp],
    mode: InterpolationMode,
) -> Vec<Result<Value, StoreError>> {
    times
        .par_iter()
        .map(|&time| value_at(values, mode, time))
        .collect()
}

/// Extracts many ranges in parallel. Results are in the same order as `intervals`.
pub fn execute_range_batch(
    values: &[Value],
    intervals: &[Interval],
    mode: InterpolationMode,
) -> Vec<Result<Vec<Value>, StoreError>> {
    intervals
        .par_iter()
        .map(|&interval| extract_range(values, interval, mode))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Timestamp = 1_000_000_000;
    const MINUTE: Timestamp = 60 * SECOND;
    const T0: Timestamp = 1_700_000_000 * SECOND;

    // Samples one minute apart carrying their index as data.
    fn minutes(count: usize) -> Vec<Value> {
        (0..count)
            .map(|i| Value::new(T0 + i as Timestamp * MINUTE, i as f64))
            .collect()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_value_at_empty() {
        assert_eq!(
            value_at(&[], InterpolationMode::Linear, T0),
            Err(StoreError::EmptySeries)
        );
    }

    #[test]
    fn test_value_at_exact_before_and_between() {
        let values = minutes(3);
        let mode = InterpolationMode::Linear;

        assert_eq!(value_at(&values, mode, T0 + MINUTE).unwrap(), values[1]);
        assert_eq!(value_at(&values, mode, T0 - MINUTE).unwrap(), values[0]);

        let mid = value_at(&values, mode, T0 + 90 * SECOND).unwrap();
        assert_eq!(mid.time, T0 + 90 * SECOND);
        assert_close(mid.data, 1.5);
    }

    #[test]
    fn test_value_at_after_last() {
        let values = minutes(3);

        let linear = value_at(&values, InterpolationMode::Linear, T0 + 3 * MINUTE).unwrap();
        assert_eq!(linear.time, T0 + 3 * MINUTE);
        assert_close(linear.data, 3.0);

        let held = value_at(&values, InterpolationMode::StepHold, T0 + 3 * MINUTE).unwrap();
        assert_eq!(held, Value::new(T0 + 3 * MINUTE, 2.0));

        // One sample: nothing to extrapolate from.
        let single = [Value::new(T0, 4.0)];
        let held = value_at(&single, InterpolationMode::Linear, T0 + SECOND).unwrap();
        assert_eq!(held, Value::new(T0 + SECOND, 4.0));
    }

    #[test]
    fn test_extract_range_interior() {
        let values = minutes(3);
        let result = extract_range(
            &values,
            Interval::new(T0 + 30 * SECOND, T0 + 90 * SECOND),
            InterpolationMode::Linear,
        )
        .unwrap();

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].time, T0 + 30 * SECOND);
        assert_close(result[0].data, 0.5);
        assert_eq!(result[1], values[1]);
        assert_eq!(result[2].time, T0 + 90 * SECOND);
        assert_close(result[2].data, 1.5);
    }

    #[test]
    fn test_extract_range_aligned_edges_not_duplicated() {
        let values = minutes(4);
        let result = extract_range(
            &values,
            Interval::new(T0 + MINUTE, T0 + 3 * MINUTE),
            InterpolationMode::Linear,
        )
        .unwrap();
        assert_eq!(result, values[1..4].to_vec());
    }

    #[test]
    fn test_extract_range_outside_data() {
        let values = minutes(3);
        let mode = InterpolationMode::Linear;

        let before = extract_range(&values, Interval::new(0, T0 - SECOND), mode).unwrap();
        assert!(before.is_empty());

        let after = extract_range(
            &values,
            Interval::new(T0 + 5 * MINUTE, T0 + 6 * MINUTE),
            mode,
        )
        .unwrap();
        assert!(after.is_empty());

        // Ending exactly on the first sample collapses to that sample.
        let touching = extract_range(&values, Interval::new(0, T0), mode).unwrap();
        assert_eq!(touching, vec![values[0]]);
    }

    #[test]
    fn test_extract_range_inside_one_gap() {
        let values = minutes(3);
        let result = extract_range(
            &values,
            Interval::new(T0 + 10 * SECOND, T0 + 20 * SECOND),
            InterpolationMode::StepHold,
        )
        .unwrap();
        assert_eq!(
            result,
            vec![
                Value::new(T0 + 10 * SECOND, 0.0),
                Value::new(T0 + 20 * SECOND, 0.0)
            ]
        );
    }

    #[test]
    fn test_duplicate_run_resolves_to_last_sample() {
        let values = [
            Value::new(10, 1.0),
            Value::new(20, 9.0),
            Value::new(20, 2.0),
            Value::new(30, 3.0),
        ];

        for mode in [InterpolationMode::Linear, InterpolationMode::StepHold] {
            assert_eq!(value_at(&values, mode, 20).unwrap(), values[2]);
            assert_eq!(values[floor_index(&values, 20)], values[2]);
        }

        // The bracket after the run starts from its last sample.
        let held = value_at(&values, InterpolationMode::StepHold, 21).unwrap();
        assert_eq!(held, Value::new(21, 2.0));
        let blended = value_at(&values, InterpolationMode::Linear, 25).unwrap();
        assert_close(blended.data, 2.5);
    }

    #[test]
    fn test_extract_range_keeps_every_sample_at_an_edge() {
        let values = [
            Value::new(10, 1.0),
            Value::new(20, 9.0),
            Value::new(20, 2.0),
            Value::new(30, 3.0),
            Value::new(30, 4.0),
        ];
        let mode = InterpolationMode::Linear;

        let aligned = extract_range(&values, Interval::new(20, 30), mode).unwrap();
        assert_eq!(aligned, values[1..5].to_vec());

        let inner = extract_range(&values, Interval::new(15, 25), mode).unwrap();
        assert_eq!(inner.len(), 4);
        assert_eq!(inner[0].time, 15);
        assert_eq!(&inner[1..3], &values[1..3]);
        assert_eq!(inner[3].time, 25);
        assert_close(inner[3].data, 2.5);

        let instant = extract_range(&values, Interval::new(20, 20), mode).unwrap();
        assert_eq!(instant, values[1..3].to_vec());
    }

    #[test]
    fn test_index_range_boundaries() {
        let values = minutes(10);

        assert_eq!(
            index_range(&values, Interval::new(T0 - 90 * SECOND, T0)).unwrap(),
            0..0
        );
        assert_eq!(
            index_range(&values, Interval::new(T0 - 30 * SECOND, T0 + 30 * SECOND)).unwrap(),
            0..1
        );
        assert_eq!(
            index_range(&values, Interval::new(T0 + 10 * MINUTE, T0 + 11 * MINUTE)).unwrap(),
            9..10
        );
        assert_eq!(
            index_range(&values, Interval::new(T0 + 90 * SECOND, T0 + 3 * MINUTE)).unwrap(),
            1..3
        );
        assert_eq!(
            index_range(&[], Interval::new(T0, T0)),
            Err(StoreError::EmptySeries)
        );
    }

    #[test]
    fn test_batches_preserve_order() {
        let values = minutes(5);
        let times = [T0 + 4 * MINUTE, T0, T0 + 30 * SECOND];
        let points = execute_point_batch(&values, &times, InterpolationMode::Linear);
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].as_ref().unwrap(), &values[4]);
        assert_eq!(points[1].as_ref().unwrap(), &values[0]);
        assert_close(points[2].as_ref().unwrap().data, 0.5);

        let intervals = [
            Interval::new(T0, T0 + MINUTE),
            Interval::new(0, T0 - SECOND),
        ];
        let ranges = execute_range_batch(&values, &intervals, InterpolationMode::Linear);
        assert_eq!(ranges[0].as_ref().unwrap(), &values[0..2].to_vec());
        assert!(ranges[1].as_ref().unwrap().is_empty());

        let empty = execute_point_batch(&[], &times, InterpolationMode::Linear);
        assert!(empty.iter().all(|r| r == &Err(StoreError::EmptySeries)));
    }
}
