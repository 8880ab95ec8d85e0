//! Access disciplines.

use core::fmt;

use crate::error::{BufferError, Result};

/// Access policy of a buffer, fixed at creation.
///
/// Each variant exists only when its cargo feature (`queue`, `stack`, `ring`)
/// is enabled. Raw tags are `Queue = 0`, `Stack = 1`, `Ring = 2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Discipline {
    /// First in, first out. Pushing to a full buffer is rejected.
    #[cfg(feature = "queue")]
    Queue = 0,

    /// Last in, first out. Pushing to a full buffer is rejected.
    #[cfg(feature = "stack")]
    Stack = 1,

    /// Last in, first out, and pushing to a full buffer overwrites the oldest
    /// slot instead of failing. Overwritten elements are gone for good.
    #[cfg(feature = "ring")]
    Ring = 2,
}

impl Discipline {
    /// Decodes a raw tag.
    ///
    /// Fails with `UnknownDiscipline` when the tag is out of range or names
    /// a discipline compiled out of this build.
    ///
    /// ```
    /// use bytering::{BufferError, Discipline};
    ///
    /// assert_eq!(Discipline::from_tag(2), Ok(Discipline::Ring));
    /// assert_eq!(Discipline::from_tag(9), Err(BufferError::UnknownDiscipline { tag: 9 }));
    /// ```
    pub fn from_tag(tag: u8) -> Result<Self> {
        match tag {
            #[cfg(feature = "queue")]
            0 => Ok(Discipline::Queue),
            #[cfg(feature = "stack")]
            1 => Ok(Discipline::Stack),
            #[cfg(feature = "ring")]
            2 => Ok(Discipline::Ring),
            _ => Err(BufferError::UnknownDiscipline { tag }),
        }
    }

    /// The raw tag of this discipline.
    #[inline]
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Whether a push into a full buffer is rejected with `Full` rather than
    /// overwriting.
    #[inline]
    pub fn is_saturating(self) -> bool {
        match self {
            #[cfg(feature = "queue")]
            Discipline::Queue => true,
            #[cfg(feature = "stack")]
            Discipline::Stack => true,
            #[cfg(feature = "ring")]
            Discipline::Ring => false,
        }
    }

    /// Short lowercase name, as used in log output.
    pub fn name(self) -> &'static str {
        match self {
            #[cfg(feature = "queue")]
            Discipline::Queue => "queue",
            #[cfg(feature = "stack")]
            Discipline::Stack => "stack",
            #[cfg(feature = "ring")]
            Discipline::Ring => "ring",
        }
    }
}

impl TryFrom<u8> for Discipline {
    type Error = BufferError;

    fn try_from(tag: u8) -> Result<Self> {
        Discipline::from_tag(tag)
    }
}

impl From<Discipline> for u8 {
    fn from(discipline: Discipline) -> u8 {
        discipline.tag()
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
