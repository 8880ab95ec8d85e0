//! A strongly typed facade over `RawBuffer`.

use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::mem;

use crate::behavior::Behavior;
use crate::buffer::RawBuffer;
use crate::config::BufferConfig;
use crate::element::{self, Element};
use crate::error::{BufferError, Result};

/// A fixed capacity buffer of `T`, accessed with behavior `B`.
///
/// Each element is stored as its `size_of::<T>()` raw bytes in a
/// [`RawBuffer`].
///
/// # Examples
///
/// ```
/// use bytering::{Circular, TypedBuffer};
///
/// let mut readings: TypedBuffer<f32, Circular> = TypedBuffer::new(2).unwrap();
/// readings.push(20.5).unwrap();
/// readings.push(21.0).unwrap();
/// readings.push(21.5).unwrap();
///
/// assert_eq!(readings.overflow_count(), 1);
/// assert_eq!(readings.pop(), Ok(21.5));
/// assert_eq!(readings.pop(), Ok(21.0));
/// assert!(readings.pop().is_err());
/// ```
pub struct TypedBuffer<T: Element, B: Behavior> {
    raw: RawBuffer,
    phantom: PhantomData<(T, B)>,
}

/// A draining `TypedBuffer` iterator.
///
/// Elements are yielded in pop order. Whatever is not consumed is removed
/// when the iterator is dropped.
pub struct Drain<'a, T: Element, B: Behavior> {
    buffer: &'a mut TypedBuffer<T, B>,
}

impl<T: Element, B: Behavior> TypedBuffer<T, B> {
    /// Allocates room for `capacity` elements.
    ///
    /// Zero `capacity` or a zero-sized `T` is rejected with `InvalidArgument`.
    pub fn new(capacity: usize) -> Result<Self> {
        let config = BufferConfig::for_element::<T>(B::DISCIPLINE).with_capacity(capacity);
        let raw = RawBuffer::from_config(config)?;
        Ok(TypedBuffer {
            raw,
            phantom: PhantomData,
        })
    }

    /// Wraps an existing raw buffer.
    ///
    /// Its element size must equal `size_of::<T>()` and its discipline must be
    /// `B::DISCIPLINE`; otherwise `InvalidArgument` is returned.
    pub fn from_raw(raw: RawBuffer) -> Result<Self> {
        let size = mem::size_of::<T>();
        if raw.element_size() != size {
            return Err(BufferError::width("element_size", size, raw.element_size()));
        }
        if raw.discipline() != B::DISCIPLINE {
            return Err(BufferError::width(
                "discipline",
                B::DISCIPLINE.tag() as usize,
                raw.discipline().tag() as usize,
            ));
        }
        Ok(TypedBuffer {
            raw,
            phantom: PhantomData,
        })
    }

    /// Unwraps the underlying raw buffer.
    pub fn into_raw(self) -> RawBuffer {
        self.raw
    }

    /// The underlying raw buffer.
    pub fn as_raw(&self) -> &RawBuffer {
        &self.raw
    }

    /// Maximum number of live elements.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns true if there is nothing to pop.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns true if the buffer is at capacity.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.raw.is_full()
    }

    /// See [`RawBuffer::overflow_count`].
    #[inline]
    pub fn overflow_count(&self) -> usize {
        self.raw.overflow_count()
    }

    /// Stores `value`. See [`RawBuffer::push`].
    pub fn push(&mut self, value: T) -> Result<()> {
        self.raw.push(element::as_bytes(&value))
    }

    /// Takes the next value. See [`RawBuffer::pop`].
    pub fn pop(&mut self) -> Result<T> {
        let mut value = element::zeroed::<T>();
        self.raw.pop(element::as_bytes_mut(&mut value))?;
        Ok(value)
    }

    /// Drops the next value. See [`RawBuffer::remove`].
    pub fn remove(&mut self) -> Result<()> {
        self.raw.remove()
    }

    /// See [`RawBuffer::flush`].
    pub fn flush(&mut self) {
        self.raw.flush()
    }

    /// Creates a draining iterator that pops every element in turn.
    ///
    /// ```
    /// use bytering::{Lifo, TypedBuffer};
    ///
    /// let mut stack: TypedBuffer<u16, Lifo> = TypedBuffer::new(4).unwrap();
    /// stack.extend(vec![1, 2, 3]);
    ///
    /// let drained: Vec<_> = stack.drain().collect();
    /// assert_eq!(drained, vec![3, 2, 1]);
    /// assert!(stack.is_empty());
    /// ```
    pub fn drain(&mut self) -> Drain<'_, T, B> {
        Drain { buffer: self }
    }
}

impl<T: Element, B: Behavior> Extend<T> for TypedBuffer<T, B> {
    /// Pushes every value; values rejected as `Full` only bump the overflow
    /// count.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            let _ = self.push(value);
        }
    }
}

impl<T: Element, B: Behavior> fmt::Debug for TypedBuffer<T, B> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TypedBuffer")
            .field("raw", &self.raw)
            .finish()
    }
}

impl<'a, T: Element, B: Behavior> Iterator for Drain<'a, T, B> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.buffer.pop().ok()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.buffer.len();
        (len, Some(len))
    }
}

impl<'a, T: Element, B: Behavior> ExactSizeIterator for Drain<'a, T, B> {}

impl<'a, T: Element, B: Behavior> FusedIterator for Drain<'a, T, B> {}

impl<'a, T: Element, B: Behavior> Drop for Drain<'a, T, B> {
    fn drop(&mut self) {
        while self.buffer.remove().is_ok() {}
    }
}
