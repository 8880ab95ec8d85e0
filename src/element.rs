//! Plain-data element types.

use core::mem;
use core::slice;

/// Trait for types that can be stored in a buffer as raw bytes.
///
/// # Safety
///
/// Implementors must have no padding bytes and must be valid for every bit
/// pattern of their size, including all zeroes. Integers, floats and arrays of
/// them qualify; `bool`, `char`, references and most enums do not.
///
/// A `#[repr(C)]` struct whose fields are all `Element` and leave no padding
/// can implement it:
///
/// ```
/// use bytering::Element;
///
/// #[derive(Clone, Copy)]
/// #[repr(C)]
/// struct Reading {
///     humidity: f32,
///     temperature: f32,
/// }
///
/// unsafe impl Element for Reading {}
/// ```
pub unsafe trait Element: Copy + 'static {}

macro_rules! impl_element {
    ($($t:ty),*) => {
        $(unsafe impl Element for $t {})*
    }
}

impl_element!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);

unsafe impl<T: Element, const N: usize> Element for [T; N] {}

/// Views `value` as its bytes.
#[inline]
pub(crate) fn as_bytes<T: Element>(value: &T) -> &[u8] {
    // Safety: `Element` guarantees there are no padding bytes to read.
    unsafe { slice::from_raw_parts(value as *const T as *const u8, mem::size_of::<T>()) }
}

/// Views `value` as mutable bytes.
#[inline]
pub(crate) fn as_bytes_mut<T: Element>(value: &mut T) -> &mut [u8] {
    // Safety: every bit pattern written through the slice is a valid `T`.
    unsafe { slice::from_raw_parts_mut(value as *mut T as *mut u8, mem::size_of::<T>()) }
}

/// An all-zero `T`.
#[inline]
pub(crate) fn zeroed<T: Element>() -> T {
    // Safety: `Element` types are valid for the all-zero pattern.
    unsafe { mem::zeroed() }
}
