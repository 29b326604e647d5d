// src/sequence/config.rs
//! Construction options for a [`Sequence`](crate::Sequence).

/// Configuration applied when a sequence is created.
///
/// # Examples
///
/// ```
/// use secvec::prelude::*;
///
/// let config = SequenceConfig::new()
///     .with_initial_capacity(64)
///     .with_burn_on_drop(true);
/// let seq: Sequence<u8> = Sequence::with_config(config)?;
/// assert_eq!(seq.capacity(), 64);
/// assert!(seq.burns_on_drop());
/// # Ok::<(), SequenceError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequenceConfig {
    /// Number of slots to allocate up front (exactly; 0 means no allocation)
    pub initial_capacity: usize,
    /// Securely zero the storage when the sequence is dropped
    pub burn_on_drop: bool,
}

impl SequenceConfig {
    /// Default configuration: no preallocation, no zeroing on drop.
    pub const fn new() -> Self {
        Self {
            initial_capacity: 0,
            burn_on_drop: false,
        }
    }

    /// Sets the initial capacity.
    pub const fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Enables or disables zeroing the storage on drop.
    pub const fn with_burn_on_drop(mut self, burn: bool) -> Self {
        self.burn_on_drop = burn;
        self
    }
}
