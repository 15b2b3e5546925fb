use crate::capacity::grow_to_at_least;
use crate::types::Value;

/// Contiguous sample storage with an explicit logical capacity.
///
/// `len()` is the occupied prefix; `capacity()` only changes through
/// [`SampleBuffer::reserve_for_one`] (rounded up to a multiple of the growth chunk) or
/// [`SampleBuffer::release`]. A growth chunk of 0 behaves as 1.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    values: Vec<Value>,
    capacity: usize,
    growth_chunk: usize,
}

impl SampleBuffer {
    pub fn new(growth_chunk: usize) -> Self {
        SampleBuffer {
            values: Vec::new(),
            capacity: 0,
            growth_chunk: growth_chunk.max(1),
        }
    }

    /// Creates a buffer sized for `hint` samples. The hint is a capacity, not a length.
    ///
    /// The hint is advisory: when the allocation cannot be made the buffer starts empty and
    /// grows on demand.
    pub fn with_capacity(hint: usize, growth_chunk: usize) -> Self {
        let mut buffer = SampleBuffer::new(growth_chunk);
        let capacity = grow_to_at_least(hint, buffer.growth_chunk);
        if buffer.values.try_reserve_exact(capacity).is_ok() {
            buffer.capacity = capacity;
        }
        buffer
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn growth_chunk(&self) -> usize {
        self.growth_chunk
    }

    #[inline]
    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }

    /// Makes room for one more sample. Returns `(old, new)` capacity when the buffer grew.
    pub fn reserve_for_one(&mut self) -> Option<(usize, usize)> {
        let count = self.values.len();
        if count < self.capacity {
            return None;
        }
        let old = self.capacity;
        let new = grow_to_at_least(count + 1, self.growth_chunk);
        self.values.reserve_exact(new - count);
        self.capacity = new;
        Some((old, new))
    }

    /// Appends at the tail. Room must already be reserved.
    #[inline]
    pub fn push(&mut self, value: Value) {
        debug_assert!(self.values.len() < self.capacity);
        self.values.push(value);
    }

    /// Shifts `[index, len)` one slot right and writes `value` at `index`. Room must already be
    /// reserved.
    #[inline]
    pub fn insert(&mut self, index: usize, value: Value) {
        debug_assert!(self.values.len() < self.capacity);
        self.values.insert(index, value);
    }

    #[inline]
    pub fn replace(&mut self, index: usize, value: Value) {
        self.values[index] = value;
    }

    /// Copies a whole run of samples into an empty buffer, sizing it in one step.
    pub fn fill_from(&mut self, values: &[Value]) -> Option<(usize, usize)> {
        debug_assert!(self.values.is_empty());
        let needed = grow_to_at_least(values.len(), self.growth_chunk);
        let grown = if needed > self.capacity {
            let old = self.capacity;
            self.values.reserve_exact(needed);
            self.capacity = needed;
            Some((old, needed))
        } else {
            None
        };
        self.values.extend_from_slice(values);
        grown
    }

    /// Drops every sample and frees the allocation.
    pub fn release(&mut self) -> usize {
        let count = self.values.len();
        self.values = Vec::new();
        self.capacity = 0;
        count
    }
}
