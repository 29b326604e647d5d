// src/buffer/core.rs
//! Core buffer structure: allocation, release, slot access and swap
//!
//! This module provides the [`Buffer`] type, which owns raw storage for a fixed
//! number of `T` slots and knows nothing about which of them are initialized.

use crate::error::{Result, SequenceError};
use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::mem::{self, MaybeUninit};
use std::ptr::NonNull;
use tracing::trace;
use zeroize::Zeroize;

/// Maximum size of a single allocation in bytes (the `Layout` limit).
pub const MAX_ALLOC_BYTES: usize = isize::MAX as usize;

/// Exclusive owner of an uninitialized region of `capacity` slots of `T`.
///
/// A zero-capacity buffer holds no allocation. Zero-sized types never
/// allocate either, but still record the requested capacity.
///
/// Dropping a `Buffer` releases the memory **without** dropping any element:
/// the owner must have already ended the lifetime of everything it placed
/// in the slots. `Buffer` is move-only; it does not implement `Clone`.
///
/// # Examples
///
/// ```
/// use secvec::Buffer;
/// # use secvec::SequenceError;
///
/// let mut buf = Buffer::<u64>::allocate(4)?;
/// assert_eq!(buf.capacity(), 4);
///
/// buf.slot_mut(0).write(7);
/// assert_eq!(unsafe { buf.slot(0).assume_init_read() }, 7);
/// # Ok::<(), SequenceError>(())
/// ```
pub struct Buffer<T> {
    /// Start of the allocation, dangling when nothing is allocated
    ptr: NonNull<T>,
    /// Number of `T`-sized slots
    capacity: usize,
    _marker: PhantomData<T>,
}

// SAFETY: `Buffer<T>` owns its allocation exclusively, like `Box<[T]>`.
unsafe impl<T: Send> Send for Buffer<T> {}
// SAFETY: shared access only hands out shared slot references.
unsafe impl<T: Sync> Sync for Buffer<T> {}

impl<T> Buffer<T> {
    /// Creates an empty buffer with zero capacity. Does not allocate.
    #[inline]
    pub const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            capacity: 0,
            _marker: PhantomData,
        }
    }

    /// Requests raw storage for `capacity` slots of `T`.
    ///
    /// Returns an unallocated buffer when `capacity == 0` or `T` is
    /// zero-sized.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::CapacityOverflow`] if the byte size exceeds
    /// [`MAX_ALLOC_BYTES`], and [`SequenceError::AllocationFailed`] if the
    /// global allocator returns null.
    ///
    /// # Examples
    ///
    /// ```
    /// use secvec::{Buffer, SequenceError};
    ///
    /// let buf = Buffer::<u32>::allocate(0)?;
    /// assert!(!buf.is_allocated());
    ///
    /// let err = Buffer::<u64>::allocate(usize::MAX).unwrap_err();
    /// assert_eq!(err, SequenceError::CapacityOverflow { requested: usize::MAX });
    /// # Ok::<(), SequenceError>(())
    /// ```
    pub fn allocate(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Ok(Self::new());
        }
        if mem::size_of::<T>() == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                capacity,
                _marker: PhantomData,
            });
        }

        let layout = Self::layout_for(capacity)?;
        // SAFETY: layout has non-zero size (capacity > 0, T not zero-sized).
        let raw = unsafe { alloc::alloc(layout) };
        let ptr = NonNull::new(raw.cast::<T>()).ok_or(SequenceError::AllocationFailed {
            capacity,
            bytes: layout.size(),
        })?;

        trace!(capacity, bytes = layout.size(), "buffer allocated");
        Ok(Self {
            ptr,
            capacity,
            _marker: PhantomData,
        })
    }

    fn layout_for(capacity: usize) -> Result<Layout> {
        let overflow = SequenceError::CapacityOverflow {
            requested: capacity,
        };
        let bytes = capacity
            .checked_mul(mem::size_of::<T>())
            .filter(|&bytes| bytes <= MAX_ALLOC_BYTES)
            .ok_or_else(|| overflow.clone())?;
        Layout::from_size_align(bytes, mem::align_of::<T>()).map_err(|_| overflow)
    }

    /// Returns the number of slots in the buffer.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if the buffer owns a heap allocation.
    #[inline(always)]
    pub fn is_allocated(&self) -> bool {
        self.capacity != 0 && mem::size_of::<T>() != 0
    }

    /// Returns a raw pointer to the first slot.
    ///
    /// The pointer is dangling (but aligned) when nothing is allocated.
    #[inline(always)]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Returns a mutable raw pointer to the first slot.
    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Returns a pointer `n` slots past the start.
    ///
    /// # Panics
    ///
    /// Panics if `n > capacity`.
    #[inline]
    pub fn offset(&self, n: usize) -> *const T {
        assert!(
            n <= self.capacity,
            "offset {} past capacity {}",
            n,
            self.capacity
        );
        // SAFETY: n is within (or one past) the allocation.
        unsafe { self.ptr.as_ptr().add(n) }
    }

    /// Returns a mutable pointer `n` slots past the start.
    ///
    /// # Panics
    ///
    /// Panics if `n > capacity`.
    #[inline]
    pub fn offset_mut(&mut self, n: usize) -> *mut T {
        assert!(
            n <= self.capacity,
            "offset {} past capacity {}",
            n,
            self.capacity
        );
        // SAFETY: n is within (or one past) the allocation.
        unsafe { self.ptr.as_ptr().add(n) }
    }

    /// Returns the slot at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity`.
    #[inline]
    pub fn slot(&self, index: usize) -> &MaybeUninit<T> {
        assert!(
            index < self.capacity,
            "slot {} out of bounds for capacity {}",
            index,
            self.capacity
        );
        // SAFETY: index is in bounds; MaybeUninit tolerates any slot state.
        unsafe { &*self.ptr.as_ptr().add(index).cast::<MaybeUninit<T>>() }
    }

    /// Returns the slot at `index` mutably.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity`.
    #[inline]
    pub fn slot_mut(&mut self, index: usize) -> &mut MaybeUninit<T> {
        assert!(
            index < self.capacity,
            "slot {} out of bounds for capacity {}",
            index,
            self.capacity
        );
        // SAFETY: index is in bounds and we hold the only reference.
        unsafe { &mut *self.ptr.as_ptr().add(index).cast::<MaybeUninit<T>>() }
    }

    /// Exchanges storage with `other` in constant time.
    ///
    /// Never touches slot contents.
    #[inline]
    pub fn swap(&mut self, other: &mut Buffer<T>) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.capacity, &mut other.capacity);
    }

    /// Securely zeros every byte of the region using the [`zeroize`] crate.
    ///
    /// Slots are treated as raw bytes: any element still living in the
    /// buffer is overwritten without being dropped, so the owner must end
    /// element lifetimes first.
    ///
    /// # Examples
    ///
    /// ```
    /// use secvec::Buffer;
    /// # use secvec::SequenceError;
    ///
    /// let mut buf = Buffer::<u32>::allocate(2)?;
    /// buf.slot_mut(0).write(0xDEAD_BEEF);
    /// buf.burn();
    /// assert_eq!(unsafe { buf.slot(0).assume_init_read() }, 0);
    /// # Ok::<(), SequenceError>(())
    /// ```
    pub fn burn(&mut self) {
        if !self.is_allocated() {
            return;
        }
        // SAFETY: the region is `capacity` slots long and MaybeUninit<T> is
        // valid for any bit pattern.
        let slots = unsafe {
            std::slice::from_raw_parts_mut(
                self.ptr.as_ptr().cast::<MaybeUninit<T>>(),
                self.capacity,
            )
        };
        slots.zeroize();
    }
}

impl<T> Default for Buffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Buffer<T> {
    fn drop(&mut self) {
        if !self.is_allocated() {
            return;
        }
        // SAFETY: the same layout was validated when the buffer was allocated.
        unsafe {
            let layout = Layout::from_size_align_unchecked(
                self.capacity * mem::size_of::<T>(),
                mem::align_of::<T>(),
            );
            alloc::dealloc(self.ptr.as_ptr().cast::<u8>(), layout);
        }
        trace!(capacity = self.capacity, "buffer released");
    }
}

impl<T> std::fmt::Debug for Buffer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("ptr", &self.ptr)
            .field("capacity", &self.capacity)
            .finish()
    }
}
