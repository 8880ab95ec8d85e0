//! Error values reported by buffer operations.

/// Result type alias for buffer operations.
pub type Result<T> = core::result::Result<T, BufferError>;

/// Every way a buffer operation can fail.
///
/// No operation panics on caller input; each returns one of these instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    /// Storage for the buffer could not be obtained.
    #[error("failed to allocate {requested} bytes of buffer storage")]
    Allocation {
        /// Number of bytes asked of the allocator, saturated at `usize::MAX`
        /// when `capacity * element_size` itself overflowed.
        requested: usize,
    },

    /// The handle does not own a live buffer.
    #[error("buffer handle is not live")]
    InvalidHandle,

    /// A saturating discipline rejected the write.
    #[error("insufficient capacity")]
    Full,

    /// No element is available to read.
    #[error("buffer is empty")]
    Empty,

    /// An argument had the wrong width or was zero.
    #[error("invalid argument `{parameter}`: expected {expected}, got {actual}")]
    InvalidArgument {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// The width or size the buffer requires.
        expected: usize,
        /// What was supplied.
        actual: usize,
    },

    /// A raw discipline tag names nothing this build supports.
    #[error("unknown buffer discipline tag {tag}")]
    UnknownDiscipline {
        /// The rejected tag.
        tag: u8,
    },
}

impl BufferError {
    /// Returns `true` for conditions a caller may retry or work around
    /// (`Allocation`, `Full`, `Empty`); the rest indicate a programming error.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            BufferError::Allocation { .. } | BufferError::Full | BufferError::Empty
        )
    }

    pub(crate) fn width(parameter: &'static str, expected: usize, actual: usize) -> Self {
        BufferError::InvalidArgument {
            parameter,
            expected,
            actual,
        }
    }
}
