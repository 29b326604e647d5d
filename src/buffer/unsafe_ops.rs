// src/buffer/unsafe_ops.rs
//! Unchecked (unsafe) slot operations used by the sequence layer

use super::core::Buffer;
use std::mem::MaybeUninit;
use std::ptr;

impl<T> Buffer<T> {
    /// Returns the slot at `index` without bounds checking.
    ///
    /// # Safety
    ///
    /// Caller MUST guarantee: `index < self.capacity()`.
    #[inline(always)]
    pub unsafe fn slot_unchecked(&self, index: usize) -> &MaybeUninit<T> {
        debug_assert!(
            index < self.capacity(),
            "slot_unchecked: index {} >= capacity {}",
            index,
            self.capacity()
        );
        unsafe { &*self.as_ptr().add(index).cast::<MaybeUninit<T>>() }
    }

    /// Returns the slot at `index` mutably without bounds checking.
    ///
    /// # Safety
    ///
    /// Caller MUST guarantee: `index < self.capacity()`.
    #[inline(always)]
    pub unsafe fn slot_unchecked_mut(&mut self, index: usize) -> &mut MaybeUninit<T> {
        debug_assert!(
            index < self.capacity(),
            "slot_unchecked_mut: index {} >= capacity {}",
            index,
            self.capacity()
        );
        unsafe { &mut *self.as_mut_ptr().add(index).cast::<MaybeUninit<T>>() }
    }

    /// Moves the value out of slot `index`, leaving it logically uninitialized.
    ///
    /// # Safety
    ///
    /// Caller MUST guarantee: `index < self.capacity()` and the slot holds a
    /// live value that is not read again.
    #[inline(always)]
    pub(crate) unsafe fn take_unchecked(&mut self, index: usize) -> T {
        debug_assert!(index < self.capacity());
        unsafe { self.as_mut_ptr().add(index).read() }
    }

    /// Drops the live values in slots `[start, start + count)` in place.
    ///
    /// # Safety
    ///
    /// Caller MUST guarantee: the range is within capacity and every slot in
    /// it holds a live value. The slots are uninitialized afterwards.
    #[inline]
    pub(crate) unsafe fn drop_range(&mut self, start: usize, count: usize) {
        debug_assert!(start + count <= self.capacity());
        let tail = ptr::slice_from_raw_parts_mut(unsafe { self.as_mut_ptr().add(start) }, count);
        unsafe { ptr::drop_in_place(tail) };
    }

    /// Shifts the `count` values starting at `from` so they start at `to`.
    ///
    /// # Safety
    ///
    /// Caller MUST guarantee: both ranges are within capacity. The source
    /// slots not covered by the destination become logically uninitialized.
    #[inline]
    pub(crate) unsafe fn shift(&mut self, from: usize, to: usize, count: usize) {
        debug_assert!(from + count <= self.capacity() && to + count <= self.capacity());
        let base = self.as_mut_ptr();
        unsafe { ptr::copy(base.add(from), base.add(to), count) };
    }

    /// Moves `count` live values from `self[from..]` into `dst[to..]`.
    ///
    /// Relocation is a bitwise move and cannot fail. The source slots are
    /// logically uninitialized afterwards and must not be dropped.
    ///
    /// # Safety
    ///
    /// Caller MUST guarantee: both ranges are within their buffers' capacity,
    /// the source slots hold live values, and the destination slots are free.
    #[inline]
    pub(crate) unsafe fn relocate_into(
        &mut self,
        from: usize,
        dst: &mut Buffer<T>,
        to: usize,
        count: usize,
    ) {
        debug_assert!(from + count <= self.capacity());
        debug_assert!(to + count <= dst.capacity());
        unsafe {
            ptr::copy_nonoverlapping(self.as_ptr().add(from), dst.as_mut_ptr().add(to), count)
        };
    }
}
