//! A fixed capacity buffer of untyped, equally sized elements.
//!
//! One block of memory, allocated once, is shared by three access
//! disciplines:
//!
//! - **Queue**: first in, first out; pushing into a full buffer fails.
//! - **Stack**: last in, first out; pushing into a full buffer fails.
//! - **Ring**: last in, first out; pushing into a full buffer overwrites the
//!   oldest element.
//!
//! Elements are copied in and out as byte slices of the width fixed at
//! creation, so the buffer never needs to know what it stores. Every
//! operation returns a [`Result`]; nothing blocks, allocates after creation,
//! or panics on caller input.
//!
//! # Feature Flags
//! The **bytering** crate has the following cargo feature flags:
//!
//! - `std`
//!   - Optional, enabled by default
//!   - Use libstd; without it the crate is `no_std` and needs `alloc`
//!
//!
//! - `queue`, `stack`, `ring`
//!   - Optional, all enabled by default
//!   - Compile in the matching [`Discipline`]; at least one is required
//!
//!
//! - `tracing`
//!   - Optional
//!   - Emit `tracing` events on creation, flush, destruction, rejected
//!     pushes and ring overwrites
//!
//!
//! - `serde`
//!   - Optional
//!   - Derive `Serialize` and `Deserialize` for [`BufferConfig`] and
//!     [`Discipline`]
//!
//! # Usage
//!
//! First, add the following to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! bytering = "0.1"
//! ```
//!
//! To use it in a `#![no_std]` crate:
//!
//! ```toml
//! [dependencies]
//! bytering = { version = "0.1", default-features = false, features = ["queue"] }
//! ```
//!
//! # Examples
//! ```
//! use bytering::{BufferError, Discipline, RawBuffer};
//!
//! let mut queue = RawBuffer::new(3, 1, Discipline::Queue).unwrap();
//! queue.push(b"A").unwrap();
//! queue.push(b"B").unwrap();
//! queue.push(b"C").unwrap();
//! assert_eq!(queue.push(b"D"), Err(BufferError::Full));
//! assert_eq!(queue.overflow_count(), 1);
//!
//! let mut out = [0u8; 1];
//! queue.pop(&mut out).unwrap();
//! assert_eq!(&out, b"A");
//! ```
//!
//! # Ring
//!
//! A ring never refuses a push. Once full, each push replaces the oldest
//! element and bumps [`overflow_count`](RawBuffer::overflow_count), which is
//! the only way to notice the loss. Pops walk back from the newest element.
//!
//! ```
//! use bytering::{BufferError, Discipline, RawBuffer};
//!
//! let mut ring = RawBuffer::new(2, 1, Discipline::Ring).unwrap();
//! ring.push(b"A").unwrap();
//! ring.push(b"B").unwrap();
//! ring.push(b"C").unwrap();
//! assert_eq!(ring.overflow_count(), 1);
//!
//! let mut out = [0u8; 1];
//! ring.pop(&mut out).unwrap();
//! assert_eq!(&out, b"C");
//! ring.pop(&mut out).unwrap();
//! assert_eq!(&out, b"B");
//! assert_eq!(ring.pop(&mut out), Err(BufferError::Empty));
//! ```
//!
//! # Typed elements
//!
//! [`TypedBuffer`] stores any [`Element`] and picks its discipline from a
//! [`Behavior`] marker.
//!
//! ```
//! use bytering::{Fifo, TypedBuffer};
//!
//! let mut temps: TypedBuffer<f32, Fifo> = TypedBuffer::new(8).unwrap();
//! temps.push(21.5).unwrap();
//! temps.push(22.0).unwrap();
//! assert_eq!(temps.pop(), Ok(21.5));
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![deny(missing_docs)]

extern crate alloc;

#[cfg(not(any(feature = "queue", feature = "stack", feature = "ring")))]
compile_error!("at least one of the `queue`, `stack` or `ring` features must be enabled");

mod behavior;
mod buffer;
mod config;
mod discipline;
mod element;
pub mod error;
mod handle;
mod typed;
mod utils;

pub use behavior::Behavior;
#[cfg(feature = "ring")]
pub use behavior::Circular;
#[cfg(feature = "queue")]
pub use behavior::Fifo;
#[cfg(feature = "stack")]
pub use behavior::Lifo;
pub use buffer::RawBuffer;
pub use config::{BufferConfig, DEFAULT_CAPACITY};
pub use discipline::Discipline;
pub use element::Element;
pub use error::{BufferError, Result};
pub use handle::BufferHandle;
pub use typed::{Drain, TypedBuffer};

/// A first-in, first-out `TypedBuffer`.
#[cfg(feature = "queue")]
pub type TypedQueue<T> = TypedBuffer<T, Fifo>;

/// A last-in, first-out `TypedBuffer`.
#[cfg(feature = "stack")]
pub type TypedStack<T> = TypedBuffer<T, Lifo>;

/// An overwriting, last-in, first-out `TypedBuffer`.
#[cfg(feature = "ring")]
pub type TypedRing<T> = TypedBuffer<T, Circular>;
