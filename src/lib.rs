// src/lib.rs
//! # Manually Managed Growable Sequence
//!
//! A contiguous, growable sequence container built from scratch on top of a
//! raw storage layer, with explicit control over when each element's lifetime
//! begins and ends.
//!
//! Features:
//! - [`Buffer`]: raw, uninitialized storage for `capacity` slots of `T`
//! - [`Sequence`]: live elements placed in a buffer it exclusively owns
//! - Construct-then-swap reallocation: a failed allocation or a panicking
//!   constructor never corrupts the sequence, leaks, or double-drops
//! - Typed, recoverable errors for allocation failures and bad positions
//! - Optional secure erasure of storage using the `zeroize` crate
//!
//! ```
//! use secvec::prelude::*;
//!
//! let mut seq = Sequence::new();
//! seq.push_back(1)?;
//! seq.push_back(2)?;
//! seq.push_back(3)?;
//! seq.erase(1)?;
//! seq.insert(1, 5)?;
//! assert_eq!(seq, [1, 5, 3]);
//! # Ok::<(), SequenceError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::missing_safety_doc)]

pub mod buffer;
pub mod error;
pub mod sequence;

// Re-export main types
pub use buffer::{Buffer, MAX_ALLOC_BYTES};
pub use error::{Result, ResultExt, SequenceError};
pub use sequence::{IntoIter, Sequence, SequenceConfig};

/// Commonly used imports.
pub mod prelude {
    pub use crate::buffer::Buffer;
    pub use crate::error::{Result, ResultExt, SequenceError};
    pub use crate::sequence::{Sequence, SequenceConfig};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_basic_sequence() {
        let mut seq = Sequence::new();
        seq.push_back(42u32).unwrap();
        seq.push_back(7).unwrap();

        assert_eq!(seq.len(), 2);
        assert_eq!(seq[0], 42);
        assert_eq!(seq.last(), Some(&7));
    }

    #[test]
    fn test_raw_buffer() {
        let mut buf = Buffer::<u64>::allocate(2).unwrap();
        buf.slot_mut(1).write(9);
        assert_eq!(unsafe { buf.slot(1).assume_init_read() }, 9);
    }

    #[test]
    fn test_burning_sequence() {
        let mut seq: Sequence<u8> =
            Sequence::with_config(SequenceConfig::new().with_burn_on_drop(true)).unwrap();
        seq.extend_from_slice(b"secret").unwrap();
        seq.push_back(b'!').unwrap();
        assert_eq!(seq.as_slice(), b"secret!");
    }

    #[test]
    fn test_io_conversion() {
        let mut seq: Sequence<u8> = Sequence::new();
        let err = seq.erase(0).into_io().unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    }
}
