//! Cursor boundary wrapping.
//!
//! Cursors are byte offsets into a region of `len` bytes split into slots of
//! `stride` bytes. `len` is a non-zero multiple of `stride` and every cursor
//! passed in sits on a slot boundary below `len`.

/// Moves `offset` one slot forward, wrapping past the last slot back to 0.
#[inline]
pub fn wrap_add(offset: usize, stride: usize, len: usize) -> usize {
    debug_assert!(stride <= len);
    debug_assert!(offset < len);
    (offset + stride) % len
}

/// Moves `offset` one slot back, wrapping below 0 to the last slot.
#[inline]
pub fn wrap_sub(offset: usize, stride: usize, len: usize) -> usize {
    debug_assert!(stride <= len);
    debug_assert!(offset < len);
    (offset + len - stride) % len
}
