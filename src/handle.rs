//! Nullable buffer handles with explicit destruction.

#[cfg(feature = "tracing")]
use tracing::debug;

use crate::buffer::RawBuffer;
use crate::config::BufferConfig;
use crate::discipline::Discipline;
use crate::error::{BufferError, Result};

/// An owner slot that either holds a live [`RawBuffer`] or nothing.
///
/// Destroying releases the storage right away and leaves the handle empty;
/// every later operation on it, including a second destroy, fails with
/// `InvalidHandle`.
///
/// ```
/// use bytering::{BufferError, BufferHandle, Discipline};
///
/// let mut handle = BufferHandle::create(4, 1, Discipline::Stack).unwrap();
/// handle.push(&[7]).unwrap();
/// handle.destroy().unwrap();
///
/// assert_eq!(handle.push(&[8]), Err(BufferError::InvalidHandle));
/// assert_eq!(handle.destroy(), Err(BufferError::InvalidHandle));
/// ```
#[derive(Debug, Default)]
pub struct BufferHandle {
    buffer: Option<RawBuffer>,
}

impl BufferHandle {
    /// A handle that owns nothing.
    pub const fn null() -> Self {
        BufferHandle { buffer: None }
    }

    /// Allocates a buffer and returns a live handle to it.
    pub fn create(capacity: usize, element_size: usize, discipline: Discipline) -> Result<Self> {
        RawBuffer::new(capacity, element_size, discipline).map(BufferHandle::from)
    }

    /// Like [`create`](#method.create), taking the discipline as a raw tag.
    pub fn create_with_tag(capacity: usize, element_size: usize, tag: u8) -> Result<Self> {
        RawBuffer::with_tag(capacity, element_size, tag).map(BufferHandle::from)
    }

    /// Allocates a buffer shaped by `config` into this handle, releasing any
    /// buffer it held before.
    ///
    /// On failure the handle is left exactly as it was.
    pub fn init(&mut self, config: BufferConfig) -> Result<()> {
        let buffer = RawBuffer::from_config(config)?;
        self.buffer = Some(buffer);
        Ok(())
    }

    /// Returns true if the handle owns a buffer.
    #[inline]
    pub fn is_live(&self) -> bool {
        self.buffer.is_some()
    }

    /// Releases the buffer.
    pub fn destroy(&mut self) -> Result<()> {
        match self.buffer.take() {
            Some(_buffer) => {
                #[cfg(feature = "tracing")]
                debug!(discipline = _buffer.discipline().name(), "destroyed buffer");
                Ok(())
            }
            None => Err(BufferError::InvalidHandle),
        }
    }

    /// Moves the buffer out, leaving the handle empty.
    pub fn take(&mut self) -> Option<RawBuffer> {
        self.buffer.take()
    }

    /// The live buffer.
    pub fn get(&self) -> Result<&RawBuffer> {
        self.buffer.as_ref().ok_or(BufferError::InvalidHandle)
    }

    /// The live buffer, mutably.
    pub fn get_mut(&mut self) -> Result<&mut RawBuffer> {
        self.buffer.as_mut().ok_or(BufferError::InvalidHandle)
    }

    /// See [`RawBuffer::push`].
    pub fn push(&mut self, element: &[u8]) -> Result<()> {
        self.get_mut()?.push(element)
    }

    /// See [`RawBuffer::pop`].
    pub fn pop(&mut self, out: &mut [u8]) -> Result<()> {
        self.get_mut()?.pop(out)
    }

    /// See [`RawBuffer::remove`].
    pub fn remove(&mut self) -> Result<()> {
        self.get_mut()?.remove()
    }

    /// See [`RawBuffer::flush`].
    pub fn flush(&mut self) -> Result<()> {
        self.get_mut()?.flush();
        Ok(())
    }

    /// See [`RawBuffer::len`].
    pub fn len(&self) -> Result<usize> {
        self.get().map(RawBuffer::len)
    }

    /// See [`RawBuffer::is_empty`].
    pub fn is_empty(&self) -> Result<bool> {
        self.get().map(RawBuffer::is_empty)
    }

    /// See [`RawBuffer::overflow_count`].
    pub fn overflow_count(&self) -> Result<usize> {
        self.get().map(RawBuffer::overflow_count)
    }
}

impl From<RawBuffer> for BufferHandle {
    fn from(buffer: RawBuffer) -> Self {
        BufferHandle {
            buffer: Some(buffer),
        }
    }
}
