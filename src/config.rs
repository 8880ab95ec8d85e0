//! Buffer configuration

use core::mem;

use crate::discipline::Discipline;
use crate::element::Element;
use crate::error::{BufferError, Result};

/// Capacity used by [`BufferConfig::new`] until one is set.
pub const DEFAULT_CAPACITY: usize = 16;

/// Shape of a buffer: how many elements, how wide each one is, and how they
/// are accessed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BufferConfig {
    /// Maximum number of live elements
    pub capacity: usize,
    /// Width of one element in bytes
    pub element_size: usize,
    /// Access discipline
    pub discipline: Discipline,
}

impl BufferConfig {
    /// A configuration for one-byte elements and [`DEFAULT_CAPACITY`] slots.
    pub fn new(discipline: Discipline) -> Self {
        BufferConfig {
            capacity: DEFAULT_CAPACITY,
            element_size: 1,
            discipline,
        }
    }

    /// A configuration sized for elements of type `T`.
    pub fn for_element<T: Element>(discipline: Discipline) -> Self {
        BufferConfig::new(discipline).with_element_size(mem::size_of::<T>())
    }

    /// Set capacity
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set element size
    pub fn with_element_size(mut self, element_size: usize) -> Self {
        self.element_size = element_size;
        self
    }

    /// Checks that both dimensions are non-zero and that the storage size is
    /// representable.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(BufferError::width("capacity", 1, 0));
        }
        if self.element_size == 0 {
            return Err(BufferError::width("element_size", 1, 0));
        }
        self.storage_bytes().map(|_| ())
    }

    /// Total bytes of storage, `capacity * element_size`.
    ///
    /// Fails with `Allocation` when the product overflows `usize`.
    pub fn storage_bytes(&self) -> Result<usize> {
        self.capacity
            .checked_mul(self.element_size)
            .ok_or(BufferError::Allocation {
                requested: usize::MAX,
            })
    }
}

#[cfg(test)]
#[cfg(feature = "queue")]
mod tests {
    use super::*;

    #[test]
    fn builder() {
        let config = BufferConfig::new(Discipline::Queue)
            .with_capacity(8)
            .with_element_size(4);
        assert_eq!(config.capacity, 8);
        assert_eq!(config.element_size, 4);
        assert_eq!(config.storage_bytes(), Ok(32));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn for_element() {
        let config = BufferConfig::for_element::<[f32; 2]>(Discipline::Queue);
        assert_eq!(config.element_size, 8);
        assert_eq!(config.capacity, DEFAULT_CAPACITY);
    }

    #[test]
    fn rejects_zero_dimensions() {
        let config = BufferConfig::new(Discipline::Queue).with_capacity(0);
        assert_eq!(
            config.validate(),
            Err(BufferError::InvalidArgument {
                parameter: "capacity",
                expected: 1,
                actual: 0,
            })
        );

        let config = BufferConfig::new(Discipline::Queue).with_element_size(0);
        assert_eq!(
            config.validate(),
            Err(BufferError::InvalidArgument {
                parameter: "element_size",
                expected: 1,
                actual: 0,
            })
        );
    }

    #[test]
    fn rejects_overflowing_size() {
        let config = BufferConfig::new(Discipline::Queue)
            .with_capacity(usize::MAX)
            .with_element_size(2);
        assert_eq!(
            config.validate(),
            Err(BufferError::Allocation {
                requested: usize::MAX
            })
        );
    }
}
