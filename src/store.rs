//! The irregular time-series store: a growable, time-sorted buffer of samples with point,
//! interpolated and range queries.

use crate::buffer::SampleBuffer;
use crate::capacity::DEFAULT_GROWTH_CHUNK;
use crate::config::{DuplicatePolicy, StoreConfig};
use crate::error::StoreError;
use crate::interpolation::InterpolationMode;
use crate::query::{execute_point_batch, execute_range_batch, extract_range, index_range, value_at};
use crate::search::{end_index, floor_index, locate};
use crate::telemetry::{noop_event_listener, store_metrics, StoreEvent, StoreEventListener};
use crate::types::{Interval, Timestamp, Value};

use std::ops::Range;
use std::sync::Arc;

/// A single, memory-resident series of samples kept in ascending time order.
///
/// The store is not internally synchronized. Share it across threads behind an
/// `RwLock` (one writer, many readers); every read method takes `&self`.
#[derive(Debug, Clone)]
pub struct TimeSeriesStore {
    buffer: SampleBuffer,
    mode: InterpolationMode,
    duplicate_policy: DuplicatePolicy,
    events: Arc<dyn StoreEventListener>,
}

impl Default for TimeSeriesStore {
    fn default() -> Self {
        TimeSeriesStore::new()
    }
}

impl TimeSeriesStore {
    /// Creates an empty store with linear interpolation. Nothing is allocated until the first
    /// `add`.
    pub fn new() -> Self {
        TimeSeriesStore::with_mode(InterpolationMode::Linear)
    }

    /// Creates an empty store using `mode` for interpolated reads.
    pub fn with_mode(mode: InterpolationMode) -> Self {
        TimeSeriesStore {
            buffer: SampleBuffer::new(DEFAULT_GROWTH_CHUNK),
            mode,
            duplicate_policy: DuplicatePolicy::KeepBoth,
            events: noop_event_listener(),
        }
    }

    /// Creates an empty store pre-sized for about `expected` samples.
    ///
    /// `expected` is a capacity hint, rounded up to a multiple of the growth chunk; the store's
    /// count stays 0.
    pub fn with_capacity(expected: usize, mode: InterpolationMode) -> Self {
        TimeSeriesStore {
            buffer: SampleBuffer::with_capacity(expected, DEFAULT_GROWTH_CHUNK),
            ..TimeSeriesStore::with_mode(mode)
        }
    }

    /// Creates a store from a full configuration.
    ///
    /// # Errors
    /// Returns [`StoreError::ConfigError`] if the configuration does not validate.
    pub fn with_config(config: StoreConfig) -> Result<Self, StoreError> {
        config.validate()?;
        Ok(TimeSeriesStore {
            buffer: SampleBuffer::with_capacity(config.initial_capacity, config.growth_chunk),
            mode: config.interpolation,
            duplicate_policy: config.duplicate_policy,
            events: config.event_listener,
        })
    }

    /// Creates a store holding `values`.
    ///
    /// Strictly ascending input is copied in one step. Any other input is inserted one sample at
    /// a time, so the result always matches feeding `values` through [`TimeSeriesStore::add`].
    pub fn from_values(values: &[Value], mode: InterpolationMode) -> Self {
        let mut store = TimeSeriesStore::with_mode(mode);
        store.load(values);
        store
    }

    /// Inserts `value`, keeping the samples sorted by time.
    ///
    /// A sample later than the current tail is appended directly. Otherwise its position is the
    /// first stored sample whose time is `>=` its own, and later samples are shifted right. A
    /// sample whose time is already stored is handled per the store's [`DuplicatePolicy`]; under
    /// `KeepBoth` it lands ahead of the stored ones, which point lookups keep resolving to.
    pub fn add(&mut self, value: Value) {
        let count = self.buffer.len();
        let append = self
            .buffer
            .as_slice()
            .last()
            .map_or(true, |last| last.time < value.time);

        if append {
            self.reserve_for_one();
            self.buffer.push(value);
            store_metrics::record_samples_added(1);
            return;
        }

        let position = locate(self.buffer.as_slice(), value.time);
        if let Some(existing) = position.resolved() {
            let replaced = self.duplicate_policy == DuplicatePolicy::Replace;
            self.events.on_event(StoreEvent::DuplicateTimestamp {
                time: value.time,
                index: existing,
                replaced,
            });
            if replaced {
                self.buffer.replace(existing, value);
                store_metrics::record_samples_added(1);
                return;
            }
        }

        // Ahead of any equal-time run.
        let index = position.start;
        self.reserve_for_one();
        self.buffer.insert(index, value);
        self.events.on_event(StoreEvent::OutOfOrderInsert {
            index,
            count: count + 1,
        });
        store_metrics::record_out_of_order_insert();
        store_metrics::record_samples_added(1);
    }

    /// Inserts every sample of `values` in order, as repeated [`TimeSeriesStore::add`] calls.
    ///
    /// The input may be unsorted; for distinct timestamps the final arrangement does not depend
    /// on the input order.
    pub fn add_many(&mut self, values: &[Value]) {
        for value in values {
            self.add(*value);
        }
    }

    /// Returns the sample at `index`.
    ///
    /// # Errors
    /// Returns [`StoreError::IndexOutOfBounds`] when `index >= count`.
    pub fn get(&self, index: usize) -> Result<Value, StoreError> {
        self.buffer
            .as_slice()
            .get(index)
            .copied()
            .ok_or(StoreError::IndexOutOfBounds {
                index,
                count: self.buffer.len(),
            })
    }

    /// Returns the value at `time`: the stored sample on an exact match, otherwise a value
    /// resolved under the store's interpolation mode.
    ///
    /// Times before the first sample return the first sample. Times after the last sample
    /// extend the trailing slope (`Linear`) or hold the last value (`StepHold`).
    ///
    /// # Errors
    /// Returns [`StoreError::EmptySeries`] when the store holds no samples.
    pub fn get_at(&self, time: Timestamp) -> Result<Value, StoreError> {
        value_at(self.buffer.as_slice(), self.mode, time)
    }

    /// Returns the samples and synthesized edge values covering `interval`.
    ///
    /// # Errors
    /// Returns [`StoreError::EmptySeries`] when the store holds no samples.
    pub fn get_values(&self, interval: Interval) -> Result<Vec<Value>, StoreError> {
        let values = extract_range(self.buffer.as_slice(), interval, self.mode)?;
        store_metrics::record_range_query(values.len());
        Ok(values)
    }

    /// Returns the half-open index span of stored samples overlapping `interval`.
    ///
    /// # Errors
    /// Returns [`StoreError::EmptySeries`] when the store holds no samples.
    pub fn to_range(&self, interval: Interval) -> Result<Range<usize>, StoreError> {
        index_range(self.buffer.as_slice(), interval)
    }

    /// Index of the last sample at or before `time`.
    ///
    /// Saturates to 0 before the first sample and to `count - 1` at or after the last one.
    ///
    /// # Errors
    /// Returns [`StoreError::EmptySeries`] when the store holds no samples.
    pub fn find_start_index(&self, time: Timestamp) -> Result<usize, StoreError> {
        self.find_start_index_from(0, time)
    }

    /// Like [`TimeSeriesStore::find_start_index`], searching only `[begin, count)`.
    ///
    /// A `begin` past the end is treated as the last index.
    pub fn find_start_index_from(
        &self,
        begin: usize,
        time: Timestamp,
    ) -> Result<usize, StoreError> {
        let values = self.non_empty()?;
        let begin = begin.min(values.len() - 1);
        Ok(begin + floor_index(&values[begin..], time))
    }

    /// First index whose time is `>= time`, or `count` when `time` is after every sample.
    ///
    /// # Errors
    /// Returns [`StoreError::EmptySeries`] when the store holds no samples.
    pub fn find_end_index(&self, time: Timestamp) -> Result<usize, StoreError> {
        self.find_end_index_from(0, time)
    }

    /// Like [`TimeSeriesStore::find_end_index`], searching only `[begin, count)`.
    pub fn find_end_index_from(&self, begin: usize, time: Timestamp) -> Result<usize, StoreError> {
        let values = self.non_empty()?;
        let begin = begin.min(values.len());
        Ok(begin + end_index(&values[begin..], time))
    }

    /// Resolves each of `times` as [`TimeSeriesStore::get_at`] would, in parallel.
    pub fn get_at_many(&self, times: &[Timestamp]) -> Vec<Result<Value, StoreError>> {
        execute_point_batch(self.buffer.as_slice(), times, self.mode)
    }

    /// Extracts each of `intervals` as [`TimeSeriesStore::get_values`] would, in parallel.
    pub fn get_values_many(&self, intervals: &[Interval]) -> Vec<Result<Vec<Value>, StoreError>> {
        execute_range_batch(self.buffer.as_slice(), intervals, self.mode)
    }

    pub fn first(&self) -> Result<Value, StoreError> {
        self.buffer.as_slice().first().copied().ok_or(StoreError::EmptySeries)
    }

    pub fn last(&self) -> Result<Value, StoreError> {
        self.buffer.as_slice().last().copied().ok_or(StoreError::EmptySeries)
    }

    /// Number of stored samples.
    #[inline]
    pub fn count(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Number of samples the buffer holds before it must grow.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    #[inline]
    pub fn growth_chunk(&self) -> usize {
        self.buffer.growth_chunk()
    }

    #[inline]
    pub fn mode(&self) -> InterpolationMode {
        self.mode
    }

    #[inline]
    pub fn is_step(&self) -> bool {
        self.mode.is_step()
    }

    #[inline]
    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicate_policy
    }

    /// The stored samples in time order.
    #[inline]
    pub fn as_slice(&self) -> &[Value] {
        self.buffer.as_slice()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.buffer.as_slice().iter()
    }

    /// Drops every sample and releases the buffer.
    pub fn clear(&mut self) {
        let count = self.buffer.release();
        self.events.on_event(StoreEvent::Cleared { count });
    }

    fn non_empty(&self) -> Result<&[Value], StoreError> {
        let values = self.buffer.as_slice();
        if values.is_empty() {
            return Err(StoreError::EmptySeries);
        }
        Ok(values)
    }

    fn reserve_for_one(&mut self) {
        if let Some((from, to)) = self.buffer.reserve_for_one() {
            self.events.on_event(StoreEvent::CapacityGrown { from, to });
            store_metrics::record_buffer_growth();
        }
    }

    fn load(&mut self, values: &[Value]) {
        let strictly_ascending = values.windows(2).all(|pair| pair[0].time < pair[1].time);
        if self.buffer.is_empty() && strictly_ascending {
            if let Some((from, to)) = self.buffer.fill_from(values) {
                self.events.on_event(StoreEvent::CapacityGrown { from, to });
                store_metrics::record_buffer_growth();
            }
            store_metrics::record_samples_added(values.len() as u64);
        } else {
            self.add_many(values);
        }
    }
}

impl<'a> IntoIterator for &'a TimeSeriesStore {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Extend<Value> for TimeSeriesStore {
    fn extend<I: IntoIterator<Item = Value>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl FromIterator<Value> for TimeSeriesStore {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let values: Vec<Value> = iter.into_iter().collect();
        TimeSeriesStore::from_values(&values, InterpolationMode::Linear)
    }
}
