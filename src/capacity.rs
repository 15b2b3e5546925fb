//! Capacity sizing for the sample buffer.

/// Default number of samples the buffer grows by when it runs out of room.
pub const DEFAULT_GROWTH_CHUNK: usize = 4096;

/// Returns the smallest multiple of `delta` that is `>= requested`.
///
/// A `requested` of 0 yields 0, so an empty store never allocates. A `delta` of 0 applies no
/// rounding, and a result past `usize::MAX` saturates there.
#[inline]
pub fn grow_to_at_least(requested: usize, delta: usize) -> usize {
    if requested == 0 || delta == 0 {
        return requested;
    }
    requested
        .div_ceil(delta)
        .checked_mul(delta)
        .unwrap_or(usize::MAX)
}
