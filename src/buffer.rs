//! Type-erased fixed capacity storage.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

#[cfg(feature = "tracing")]
use tracing::{debug, trace, warn};

use crate::config::BufferConfig;
use crate::discipline::Discipline;
use crate::error::{BufferError, Result};
use crate::utils::{wrap_add, wrap_sub};

/// A fixed capacity buffer of equally sized, untyped elements.
///
/// Storage is one zero-initialized block of `capacity * element_size` bytes,
/// allocated once at creation and never resized. Elements go in and come out
/// as byte slices of exactly `element_size` bytes; the order they come out in
/// depends on the [`Discipline`].
///
/// # Examples
///
/// ```
/// use bytering::{BufferError, Discipline, RawBuffer};
///
/// let mut buf = RawBuffer::new(2, 2, Discipline::Queue).unwrap();
/// buf.push(b"ab").unwrap();
/// buf.push(b"cd").unwrap();
/// assert_eq!(buf.push(b"ef"), Err(BufferError::Full));
///
/// let mut out = [0u8; 2];
/// buf.pop(&mut out).unwrap();
/// assert_eq!(&out, b"ab");
/// ```
pub struct RawBuffer {
    storage: Box<[u8]>,
    element_size: usize,
    capacity: usize,
    len: usize,
    write: usize,
    read: Option<usize>,
    overflow: usize,
    discipline: Discipline,
}

impl RawBuffer {
    /// Allocates a buffer for `capacity` elements of `element_size` bytes.
    ///
    /// Fails with `InvalidArgument` if either dimension is zero and with
    /// `Allocation` if the storage cannot be obtained.
    pub fn new(capacity: usize, element_size: usize, discipline: Discipline) -> Result<Self> {
        RawBuffer::from_config(BufferConfig {
            capacity,
            element_size,
            discipline,
        })
    }

    /// Like [`new`](#method.new), taking the discipline as a raw tag.
    ///
    /// ```
    /// use bytering::{BufferError, RawBuffer};
    ///
    /// assert!(RawBuffer::with_tag(4, 1, 1).is_ok());
    /// assert_eq!(
    ///     RawBuffer::with_tag(4, 1, 5).err(),
    ///     Some(BufferError::UnknownDiscipline { tag: 5 })
    /// );
    /// ```
    pub fn with_tag(capacity: usize, element_size: usize, tag: u8) -> Result<Self> {
        RawBuffer::new(capacity, element_size, Discipline::from_tag(tag)?)
    }

    /// Allocates a buffer shaped by `config`.
    pub fn from_config(config: BufferConfig) -> Result<Self> {
        config.validate()?;
        let bytes = config.storage_bytes()?;
        let storage = allocate(bytes)?;

        #[cfg(feature = "tracing")]
        debug!(
            capacity = config.capacity,
            element_size = config.element_size,
            discipline = config.discipline.name(),
            "created buffer"
        );

        Ok(RawBuffer {
            storage,
            element_size: config.element_size,
            capacity: config.capacity,
            len: 0,
            write: 0,
            read: None,
            overflow: 0,
            discipline: config.discipline,
        })
    }

    /// Maximum number of live elements.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Width of one element in bytes.
    #[inline]
    pub fn element_size(&self) -> usize {
        self.element_size
    }

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if there is nothing to pop.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if the next push would be rejected (`Queue`, `Stack`) or
    /// would overwrite (`Ring`).
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    /// Number of elements lost to capacity exhaustion since creation or the
    /// last flush, either rejected or overwritten.
    ///
    /// This is the only signal of data loss for the `Ring` discipline, which
    /// never reports `Full`.
    #[inline]
    pub fn overflow_count(&self) -> usize {
        self.overflow
    }

    /// The access discipline chosen at creation.
    #[inline]
    pub fn discipline(&self) -> Discipline {
        self.discipline
    }

    /// The shape this buffer was created with.
    pub fn config(&self) -> BufferConfig {
        BufferConfig {
            capacity: self.capacity,
            element_size: self.element_size,
            discipline: self.discipline,
        }
    }

    /// Copies `element` into the buffer.
    ///
    /// `element` must be exactly `element_size` bytes long, otherwise
    /// `InvalidArgument` is returned and nothing changes.
    ///
    /// When the buffer is full, `Queue` and `Stack` reject the element with
    /// `Full`; `Ring` overwrites the oldest slot. Both count as an overflow.
    pub fn push(&mut self, element: &[u8]) -> Result<()> {
        self.check_width("element", element.len())?;

        if self.is_full() {
            self.overflow = self.overflow.saturating_add(1);
            if self.discipline.is_saturating() {
                #[cfg(feature = "tracing")]
                trace!(
                    discipline = self.discipline.name(),
                    overflow = self.overflow,
                    "push rejected, buffer full"
                );
                return Err(BufferError::Full);
            }

            #[cfg(feature = "tracing")]
            trace!(overflow = self.overflow, "ring overwrote oldest element");
        }

        let at = self.write;
        self.storage[at..at + self.element_size].copy_from_slice(element);

        match self.discipline {
            #[cfg(feature = "queue")]
            Discipline::Queue => {
                // keep pointing at the oldest element
                if self.read.is_none() {
                    self.read = Some(at);
                }
            }
            #[cfg(feature = "stack")]
            Discipline::Stack => self.read = Some(at),
            #[cfg(feature = "ring")]
            Discipline::Ring => self.read = Some(at),
        }

        self.write = self.wrap_add(at);
        if self.len < self.capacity {
            self.len += 1;
        }
        Ok(())
    }

    /// Copies the next element into `out` and removes it.
    ///
    /// `out` must be exactly `element_size` bytes long, otherwise
    /// `InvalidArgument` is returned. On `Empty` the contents of `out` are
    /// left as they were.
    ///
    /// `Queue` yields the oldest element; `Stack` and `Ring` yield the most
    /// recently pushed one and rewind the write cursor over it.
    pub fn pop(&mut self, out: &mut [u8]) -> Result<()> {
        self.check_width("out", out.len())?;
        let at = self.take()?;
        out.copy_from_slice(&self.storage[at..at + self.element_size]);
        Ok(())
    }

    /// Removes the next element without copying it out.
    ///
    /// Cursors and counters move exactly as for [`pop`](#method.pop).
    pub fn remove(&mut self) -> Result<()> {
        self.take().map(|_| ())
    }

    /// Forgets every element and resets the overflow count.
    ///
    /// The storage bytes themselves are left as they are.
    pub fn flush(&mut self) {
        self.write = 0;
        self.read = None;
        self.len = 0;
        self.overflow = 0;

        #[cfg(feature = "tracing")]
        debug!(discipline = self.discipline.name(), "flushed buffer");
    }

    /// Unlinks the next element and returns the offset it lives at.
    fn take(&mut self) -> Result<usize> {
        let at = match self.read {
            Some(at) if self.len > 0 => at,
            _ => return Err(BufferError::Empty),
        };
        self.len -= 1;

        match self.discipline {
            #[cfg(feature = "queue")]
            Discipline::Queue => self.read = Some(self.wrap_add(at)),
            #[cfg(feature = "stack")]
            Discipline::Stack => self.rewind(at),
            #[cfg(feature = "ring")]
            Discipline::Ring => self.rewind(at),
        }
        Ok(at)
    }

    /// Undoes the most recent write.
    #[allow(dead_code)]
    #[inline]
    fn rewind(&mut self, read: usize) {
        self.read = Some(self.wrap_sub(read));
        self.write = self.wrap_sub(self.write);
    }

    #[inline]
    fn wrap_add(&self, offset: usize) -> usize {
        wrap_add(offset, self.element_size, self.storage.len())
    }

    #[allow(dead_code)]
    #[inline]
    fn wrap_sub(&self, offset: usize) -> usize {
        wrap_sub(offset, self.element_size, self.storage.len())
    }

    #[inline]
    fn check_width(&self, parameter: &'static str, actual: usize) -> Result<()> {
        if actual == self.element_size {
            Ok(())
        } else {
            Err(BufferError::width(parameter, self.element_size, actual))
        }
    }
}

impl fmt::Debug for RawBuffer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("RawBuffer")
            .field("discipline", &self.discipline)
            .field("capacity", &self.capacity)
            .field("element_size", &self.element_size)
            .field("len", &self.len)
            .field("overflow_count", &self.overflow)
            .finish()
    }
}

/// Obtains `bytes` zeroed bytes, reporting allocator failure instead of
/// aborting.
fn allocate(bytes: usize) -> Result<Box<[u8]>> {
    let mut storage = Vec::new();
    if storage.try_reserve_exact(bytes).is_err() {
        #[cfg(feature = "tracing")]
        warn!(requested = bytes, "buffer allocation failed");
        return Err(BufferError::Allocation { requested: bytes });
    }
    storage.resize(bytes, 0u8);
    Ok(storage.into_boxed_slice())
}

#[cfg(test)]
#[cfg(all(feature = "queue", feature = "stack", feature = "ring"))]
mod tests {
    use super::*;

    fn drain(buf: &mut RawBuffer) -> Vec<[u8; 2]> {
        let mut out = Vec::new();
        let mut element = [0u8; 2];
        while buf.pop(&mut element).is_ok() {
            out.push(element);
        }
        out
    }

    #[test]
    fn any_initial_state() {
        macro_rules! test {
            ($discipline:ident) => ({
                let mut buf = RawBuffer::new(4, 2, Discipline::$discipline).unwrap();
                assert_eq!(buf.capacity(), 4);
                assert_eq!(buf.element_size(), 2);
                assert_eq!(buf.len(), 0);
                assert_eq!(buf.overflow_count(), 0);
                assert_eq!(buf.discipline(), Discipline::$discipline);
                assert!(buf.is_empty());
                assert!(!buf.is_full());
                assert_eq!(&*buf.storage, &[0u8; 8][..]);
                assert_eq!(buf.pop(&mut [0u8; 2]), Err(BufferError::Empty));
                assert_eq!(buf.remove(), Err(BufferError::Empty));
            })
        }

        test!(Queue);
        test!(Stack);
        test!(Ring);
    }

    #[test]
    fn any_zero_dimensions() {
        macro_rules! test {
            ($discipline:ident) => ({
                assert_eq!(
                    RawBuffer::new(0, 2, Discipline::$discipline).err(),
                    Some(BufferError::width("capacity", 1, 0))
                );
                assert_eq!(
                    RawBuffer::new(2, 0, Discipline::$discipline).err(),
                    Some(BufferError::width("element_size", 1, 0))
                );
            })
        }

        test!(Queue);
        test!(Stack);
        test!(Ring);
    }

    #[test]
    fn allocation_failure() {
        assert_eq!(
            RawBuffer::new(usize::MAX, 2, Discipline::Queue).err(),
            Some(BufferError::Allocation {
                requested: usize::MAX
            })
        );

        let too_big = isize::MAX as usize + 1;
        assert_eq!(
            RawBuffer::new(too_big, 1, Discipline::Ring).err(),
            Some(BufferError::Allocation { requested: too_big })
        );
    }

    #[test]
    fn with_tag() {
        assert_eq!(
            RawBuffer::with_tag(2, 2, 0).unwrap().discipline(),
            Discipline::Queue
        );
        assert_eq!(
            RawBuffer::with_tag(2, 2, 1).unwrap().discipline(),
            Discipline::Stack
        );
        assert_eq!(
            RawBuffer::with_tag(2, 2, 2).unwrap().discipline(),
            Discipline::Ring
        );
        assert_eq!(
            RawBuffer::with_tag(2, 2, 3).err(),
            Some(BufferError::UnknownDiscipline { tag: 3 })
        );
    }

    #[test]
    fn any_width_checks() {
        macro_rules! test {
            ($discipline:ident) => ({
                let mut buf = RawBuffer::new(2, 2, Discipline::$discipline).unwrap();
                assert_eq!(buf.push(b"abc"), Err(BufferError::width("element", 2, 3)));
                assert_eq!(buf.push(b""), Err(BufferError::width("element", 2, 0)));
                assert_eq!(buf.len(), 0);

                // width is checked before emptiness
                let mut out = [0u8; 1];
                assert_eq!(buf.pop(&mut out), Err(BufferError::width("out", 2, 1)));

                buf.push(b"ab").unwrap();
                assert_eq!(buf.pop(&mut [0u8; 3]), Err(BufferError::width("out", 2, 3)));
                assert_eq!(buf.len(), 1);
            })
        }

        test!(Queue);
        test!(Stack);
        test!(Ring);
    }

    #[test]
    fn any_pop_empty_leaves_out_untouched() {
        macro_rules! test {
            ($discipline:ident) => ({
                let mut buf = RawBuffer::new(2, 2, Discipline::$discipline).unwrap();
                let mut out = *b"zz";
                assert_eq!(buf.pop(&mut out), Err(BufferError::Empty));
                assert_eq!(&out, b"zz");

                buf.push(b"ab").unwrap();
                buf.pop(&mut out).unwrap();
                assert_eq!(&out, b"ab");

                out = *b"zz";
                assert_eq!(buf.pop(&mut out), Err(BufferError::Empty));
                assert_eq!(&out, b"zz");
            })
        }

        test!(Queue);
        test!(Stack);
        test!(Ring);
    }

    #[test]
    fn saturating_full_keeps_data() {
        macro_rules! test {
            ($discipline:ident, $expected:expr) => ({
                let mut buf = RawBuffer::new(2, 2, Discipline::$discipline).unwrap();
                buf.push(b"a1").unwrap();
                buf.push(b"b2").unwrap();
                assert!(buf.is_full());

                assert_eq!(buf.push(b"c3"), Err(BufferError::Full));
                assert_eq!(buf.push(b"d4"), Err(BufferError::Full));
                assert_eq!(buf.overflow_count(), 2);
                assert_eq!(buf.len(), 2);
                assert_eq!(drain(&mut buf), $expected);
            })
        }

        test!(Queue, vec![*b"a1", *b"b2"]);
        test!(Stack, vec![*b"b2", *b"a1"]);
    }

    #[test]
    fn queue_wraps_around() {
        let mut buf = RawBuffer::new(3, 2, Discipline::Queue).unwrap();
        let mut out = [0u8; 2];

        for round in 0..10u8 {
            buf.push(&[round, 0]).unwrap();
            buf.push(&[round, 1]).unwrap();
            buf.pop(&mut out).unwrap();
            assert_eq!(out, [round, 0]);
            buf.pop(&mut out).unwrap();
            assert_eq!(out, [round, 1]);
            assert!(buf.is_empty());
        }
        assert_eq!(buf.overflow_count(), 0);
    }

    #[test]
    fn queue_interleaved() {
        let mut buf = RawBuffer::new(3, 2, Discipline::Queue).unwrap();
        let mut out = [0u8; 2];

        buf.push(b"a1").unwrap();
        buf.push(b"b2").unwrap();
        buf.pop(&mut out).unwrap();
        assert_eq!(&out, b"a1");
        buf.push(b"c3").unwrap();
        buf.push(b"d4").unwrap();
        assert_eq!(buf.push(b"e5"), Err(BufferError::Full));
        assert_eq!(drain(&mut buf), vec![*b"b2", *b"c3", *b"d4"]);
    }

    #[test]
    fn stack_push_after_pop_reuses_slot() {
        let mut buf = RawBuffer::new(3, 2, Discipline::Stack).unwrap();
        let mut out = [0u8; 2];

        buf.push(b"a1").unwrap();
        buf.push(b"b2").unwrap();
        buf.pop(&mut out).unwrap();
        assert_eq!(&out, b"b2");
        buf.push(b"c3").unwrap();
        buf.push(b"d4").unwrap();
        assert!(buf.is_full());
        assert_eq!(drain(&mut buf), vec![*b"d4", *b"c3", *b"a1"]);
    }

    #[test]
    fn ring_overwrites_oldest() {
        let mut buf = RawBuffer::new(3, 2, Discipline::Ring).unwrap();
        for i in 1..=5u8 {
            buf.push(&[i, i]).unwrap();
        }
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.overflow_count(), 2);
        assert_eq!(drain(&mut buf), vec![[5, 5], [4, 4], [3, 3]]);
        assert_eq!(buf.overflow_count(), 2);
    }

    #[test]
    fn ring_interleaved() {
        let mut buf = RawBuffer::new(3, 2, Discipline::Ring).unwrap();
        let mut out = [0u8; 2];

        buf.push(b"a1").unwrap();
        buf.push(b"b2").unwrap();
        buf.pop(&mut out).unwrap();
        assert_eq!(&out, b"b2");

        buf.push(b"c3").unwrap();
        buf.push(b"d4").unwrap();
        buf.push(b"e5").unwrap();
        assert_eq!(buf.overflow_count(), 1);
        assert_eq!(drain(&mut buf), vec![*b"e5", *b"d4", *b"c3"]);
    }

    #[test]
    fn any_remove_matches_pop() {
        macro_rules! test {
            ($discipline:ident) => ({
                let mut popped = RawBuffer::new(3, 2, Discipline::$discipline).unwrap();
                let mut removed = RawBuffer::new(3, 2, Discipline::$discipline).unwrap();
                for buf in [&mut popped, &mut removed] {
                    buf.push(b"a1").unwrap();
                    buf.push(b"b2").unwrap();
                    buf.push(b"c3").unwrap();
                }

                popped.pop(&mut [0u8; 2]).unwrap();
                removed.remove().unwrap();
                assert_eq!(popped.len(), removed.len());
                assert_eq!(drain(&mut popped), drain(&mut removed));
            })
        }

        test!(Queue);
        test!(Stack);
        test!(Ring);
    }

    #[test]
    fn any_flush() {
        macro_rules! test {
            ($discipline:ident) => ({
                let mut buf = RawBuffer::new(2, 2, Discipline::$discipline).unwrap();
                buf.push(b"a1").unwrap();
                buf.push(b"b2").unwrap();
                let _ = buf.push(b"c3");
                assert_eq!(buf.overflow_count(), 1);

                buf.flush();
                assert_eq!(buf.len(), 0);
                assert_eq!(buf.overflow_count(), 0);
                assert_eq!(buf.pop(&mut [0u8; 2]), Err(BufferError::Empty));

                buf.push(b"d4").unwrap();
                assert_eq!(drain(&mut buf), vec![*b"d4"]);
            })
        }

        test!(Queue);
        test!(Stack);
        test!(Ring);
    }

    #[test]
    fn flush_keeps_bytes() {
        let mut buf = RawBuffer::new(2, 2, Discipline::Queue).unwrap();
        buf.push(b"a1").unwrap();
        buf.flush();
        assert_eq!(&buf.storage[..2], b"a1");
    }

    #[test]
    fn debug() {
        let buf = RawBuffer::new(2, 4, Discipline::Stack).unwrap();
        assert_eq!(
            format!("{:?}", buf),
            "RawBuffer { discipline: Stack, capacity: 2, element_size: 4, len: 0, overflow_count: 0 }"
        );
    }
}
