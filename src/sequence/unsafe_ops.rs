// src/sequence/unsafe_ops.rs
//! Unchecked (unsafe) element access for maximum performance

use super::core::Sequence;
use std::mem::MaybeUninit;
use std::slice;

impl<T> Sequence<T> {
    /// Returns the element at `index` without bounds checking.
    ///
    /// The bound is verified only in debug builds.
    ///
    /// # Safety
    ///
    /// Caller MUST guarantee: `index < self.len()`.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(
            index < self.len,
            "get_unchecked: index {} >= len {}",
            index,
            self.len
        );
        unsafe { self.buf.slot_unchecked(index).assume_init_ref() }
    }

    /// Returns the element at `index` mutably without bounds checking.
    ///
    /// # Safety
    ///
    /// Caller MUST guarantee: `index < self.len()`.
    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(
            index < self.len,
            "get_unchecked_mut: index {} >= len {}",
            index,
            self.len
        );
        unsafe { self.buf.slot_unchecked_mut(index).assume_init_mut() }
    }

    /// Sets the length without constructing or dropping anything.
    ///
    /// # Safety
    ///
    /// Caller MUST guarantee: `new_len <= self.capacity()`, slots
    /// `[0, new_len)` are initialized, and any slot leaving the tracked
    /// range has already been dropped or moved out.
    #[inline]
    pub unsafe fn set_len(&mut self, new_len: usize) {
        debug_assert!(new_len <= self.capacity());
        self.len = new_len;
    }

    /// Returns the free slots after the last element.
    ///
    /// Values written here become live only after [`set_len`](Self::set_len).
    ///
    /// # Examples
    ///
    /// ```
    /// use secvec::Sequence;
    /// # use secvec::SequenceError;
    ///
    /// let mut seq: Sequence<u16> = Sequence::with_capacity(4)?;
    /// for (i, slot) in seq.spare_capacity_mut().iter_mut().enumerate() {
    ///     slot.write(i as u16);
    /// }
    /// unsafe { seq.set_len(4) };
    /// assert_eq!(seq, [0, 1, 2, 3]);
    /// # Ok::<(), SequenceError>(())
    /// ```
    #[inline]
    pub fn spare_capacity_mut(&mut self) -> &mut [MaybeUninit<T>] {
        let spare = self.spare_capacity();
        let len = self.len;
        // SAFETY: slots [len, capacity) are in bounds and not aliased by the
        // live slice; MaybeUninit tolerates their uninitialized state.
        unsafe {
            slice::from_raw_parts_mut(
                self.buf.as_mut_ptr().add(len).cast::<MaybeUninit<T>>(),
                spare,
            )
        }
    }

    /// Returns a mutable raw pointer to the first slot.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.as_mut_ptr()
    }
}
