// src/sequence/guard.rs
//! Drop guards that clean up partially completed construction on unwind.

use std::mem;
use std::ptr;

/// Tracks values written one by one into a run of fresh slots.
///
/// If dropped before [`finish`](Self::finish), every value written so far is
/// dropped in place. Used when filling a buffer the sequence does not yet
/// own, so a panic mid-fill neither leaks nor publishes half a result.
pub(crate) struct InitGuard<T> {
    start: *mut T,
    initialized: usize,
}

impl<T> InitGuard<T> {
    /// # Safety
    ///
    /// `start` must point to enough free slots for every later `push`.
    #[inline]
    pub(crate) unsafe fn new(start: *mut T) -> Self {
        Self {
            start,
            initialized: 0,
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, value: T) {
        // SAFETY: guaranteed by the contract of `new`.
        unsafe { self.start.add(self.initialized).write(value) };
        self.initialized += 1;
    }

    /// Disarms the guard, handing ownership of the values to the caller.
    #[inline]
    pub(crate) fn finish(self) -> usize {
        let initialized = self.initialized;
        mem::forget(self);
        initialized
    }
}

impl<T> Drop for InitGuard<T> {
    fn drop(&mut self) {
        // SAFETY: exactly `initialized` slots from `start` were written.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.start,
                self.initialized,
            ))
        };
    }
}

/// Writes a locally tracked length back to the sequence on drop.
///
/// Lets in-place construction keep every fully built element even when a
/// later constructor panics.
pub(crate) struct SetLenOnDrop<'a> {
    len: &'a mut usize,
    local_len: usize,
}

impl<'a> SetLenOnDrop<'a> {
    #[inline]
    pub(crate) fn new(len: &'a mut usize) -> Self {
        let local_len = *len;
        Self { len, local_len }
    }

    #[inline]
    pub(crate) fn current(&self) -> usize {
        self.local_len
    }

    #[inline]
    pub(crate) fn increment(&mut self) {
        self.local_len += 1;
    }
}

impl Drop for SetLenOnDrop<'_> {
    #[inline]
    fn drop(&mut self) {
        *self.len = self.local_len;
    }
}
