//! Behavior semantics for `TypedBuffer`.

use crate::discipline::Discipline;

/// Tagging trait for providing a discipline to `TypedBuffer`.
pub trait Behavior {
    /// The discipline buffers of this behavior are created with.
    const DISCIPLINE: Discipline;
}

/// Behavior for `TypedBuffer` that specifies first-in, first-out semantics.
///
/// ### Popping:
///
/// Pops return elements **oldest first**.
///
/// ### Pushing to a full buffer:
///
/// Causes it to **exit early, without performing any mutation** other than
/// counting the overflow.
#[cfg(feature = "queue")]
#[derive(Clone, Copy, Debug)]
pub struct Fifo;

#[cfg(feature = "queue")]
impl Behavior for Fifo {
    const DISCIPLINE: Discipline = Discipline::Queue;
}

/// Behavior for `TypedBuffer` that specifies last-in, first-out semantics.
///
/// ### Popping:
///
/// Pops return elements **newest first**.
///
/// ### Pushing to a full buffer:
///
/// Causes it to **exit early, without performing any mutation** other than
/// counting the overflow.
#[cfg(feature = "stack")]
#[derive(Clone, Copy, Debug)]
pub struct Lifo;

#[cfg(feature = "stack")]
impl Behavior for Lifo {
    const DISCIPLINE: Discipline = Discipline::Stack;
}

/// Behavior for `TypedBuffer` that specifies circular overwrite semantics.
///
/// ### Popping:
///
/// Pops return elements **newest first**.
///
/// ### Pushing to a full buffer:
///
/// Causes it to **overwrite** the **oldest** element, which can never be
/// popped again.
#[cfg(feature = "ring")]
#[derive(Clone, Copy, Debug)]
pub struct Circular;

#[cfg(feature = "ring")]
impl Behavior for Circular {
    const DISCIPLINE: Discipline = Discipline::Ring;
}
