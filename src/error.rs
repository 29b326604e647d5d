// src/error.rs
//! Error types for sequence operations with conversion support

use std::fmt;

/// Errors that can occur during buffer and sequence operations.
///
/// Out-of-range indexing through the unchecked accessors is a programmer
/// error guarded by assertions, never one of these variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// A positional argument to insert/emplace/erase lies outside the valid range
    PositionOutOfRange {
        /// The position that was supplied
        index: usize,
        /// Sequence length at the time of the call
        len: usize,
    },
    /// Requested capacity cannot be represented as an allocation layout
    CapacityOverflow {
        /// Number of element slots requested
        requested: usize,
    },
    /// The global allocator could not satisfy the request
    AllocationFailed {
        /// Number of element slots requested
        capacity: usize,
        /// Size of the failed allocation in bytes
        bytes: usize,
    },
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PositionOutOfRange { index, len } => {
                write!(f, "Position {} out of range for sequence of length {}", index, len)
            }
            Self::CapacityOverflow { requested } => {
                write!(f, "Capacity overflow: {} slots requested", requested)
            }
            Self::AllocationFailed { capacity, bytes } => write!(
                f,
                "Allocation failed: {} slots ({} bytes)",
                capacity, bytes
            ),
        }
    }
}

impl std::error::Error for SequenceError {}

impl SequenceError {
    /// Returns `true` if the error came from the allocation layer.
    #[inline]
    pub fn is_allocation(&self) -> bool {
        matches!(
            self,
            Self::CapacityOverflow { .. } | Self::AllocationFailed { .. }
        )
    }

    /// Escalates the error into a panic for infallible trait impls
    /// (`Clone`, `FromIterator`, `Extend`).
    #[cold]
    #[track_caller]
    pub(crate) fn escalate(self) -> ! {
        panic!("{}", self)
    }
}

// ============================================================================
// ERROR CONVERSION
// ============================================================================

/// Convert SequenceError to std::io::Error
impl From<SequenceError> for std::io::Error {
    fn from(err: SequenceError) -> Self {
        use std::io::ErrorKind;
        match err {
            SequenceError::PositionOutOfRange { .. } => {
                std::io::Error::new(ErrorKind::InvalidInput, err)
            }
            SequenceError::AllocationFailed { .. } => {
                std::io::Error::new(ErrorKind::OutOfMemory, err)
            }
            SequenceError::CapacityOverflow { .. } => {
                std::io::Error::new(ErrorKind::InvalidInput, err)
            }
        }
    }
}

/// Convert SequenceError to anyhow::Error
#[cfg(feature = "anyhow")]
impl From<SequenceError> for anyhow::Error {
    fn from(err: SequenceError) -> Self {
        anyhow::anyhow!("{}", err)
    }
}

// ============================================================================
// RESULT TYPE ALIASES
// ============================================================================

/// Result type alias for sequence operations
///
/// Note: When using with other Result types (like anyhow::Result),
/// either qualify the type (`secvec::Result<T>`) or use the conversion traits.
pub type Result<T> = std::result::Result<T, SequenceError>;

// ============================================================================
// EXTENSION TRAIT FOR EASY CONVERSION
// ============================================================================

/// Extension trait for converting Results between different error types
pub trait ResultExt<T> {
    /// Convert to anyhow::Result
    #[cfg(feature = "anyhow")]
    fn into_anyhow(self) -> anyhow::Result<T>;

    /// Convert to io::Result
    fn into_io(self) -> std::io::Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    #[cfg(feature = "anyhow")]
    fn into_anyhow(self) -> anyhow::Result<T> {
        self.map_err(|e| e.into())
    }

    fn into_io(self) -> std::io::Result<T> {
        self.map_err(|e| e.into())
    }
}

// ============================================================================
// HELPER MACROS FOR ERROR HANDLING
// ============================================================================

/// Convenience macro for converting sequence operations to any Result type.
///
/// The second argument names the target error type explicitly, since types
/// like `anyhow::Error` have overlapping `From` impls.
///
/// # Example
/// ```ignore
/// use secvec::prelude::*;
/// use secvec::sequence_op;
///
/// fn handler_function() -> anyhow::Result<()> {
///     let mut seq = Sequence::new();
///     sequence_op!(seq.push_back(42), anyhow::Error)?;
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! sequence_op {
    ($expr:expr, $target:ty) => {
        $expr.map_err(|e: $crate::SequenceError| -> $target { e.into() })
    };
    // Defaults to std::io::Error
    ($expr:expr) => {
        $expr.map_err(|e: $crate::SequenceError| -> std::io::Error { e.into() })
    };
}

/// Try a sequence operation with automatic error conversion
#[macro_export]
macro_rules! sequence_try {
    ($expr:expr) => {
        match $expr {
            Ok(val) => val,
            Err(e) => return Err(e.into()),
        }
    };
}
