// src/sequence/mod.rs
//! Growable contiguous sequence built on [`Buffer`](crate::Buffer).

mod config;
mod core;
mod guard;
mod iter;
mod ops;
mod unsafe_ops;

pub use self::config::SequenceConfig;
pub use self::core::Sequence;
pub use self::iter::IntoIter;
