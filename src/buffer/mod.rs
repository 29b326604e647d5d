// src/buffer/mod.rs
//! Raw, typed-but-uninitialized storage.
//!
//! A [`Buffer`] owns one contiguous allocation of `capacity` slots of `T`.
//! It never constructs or drops elements; that is the job of the owning
//! [`Sequence`](crate::Sequence).

mod core;
mod unsafe_ops;

pub use self::core::{Buffer, MAX_ALLOC_BYTES};
