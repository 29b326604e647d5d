// src/sequence/core.rs
//! Core sequence structure: construction, assignment, growth and teardown
//!
//! A [`Sequence`] owns exactly one [`Buffer`] and tracks how many of its
//! leading slots hold live elements. Every operation that needs a larger
//! buffer builds the new state completely before releasing the old one.

use super::config::SequenceConfig;
use super::guard::{InitGuard, SetLenOnDrop};
use crate::buffer::Buffer;
use crate::error::{Result, SequenceError};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::{Deref, DerefMut};
use std::slice;
use tracing::debug;
use zeroize::Zeroize;

/// A growable, contiguous, ordered sequence of `T`.
///
/// Slots `[0, len)` of the owned buffer hold live elements and slots
/// `[len, capacity)` are uninitialized. Capacity grows by at least doubling
/// and never shrinks unless [`shrink_to_fit`](Self::shrink_to_fit) is called.
///
/// Operations that may allocate return [`Result`]; a failed allocation leaves
/// the sequence exactly as it was. A panic raised by an element constructor
/// (`Default`, `Clone`, or a user closure) never leaks memory and never drops
/// an element twice.
///
/// # Examples
///
/// ```
/// use secvec::Sequence;
/// # use secvec::SequenceError;
///
/// let mut seq = Sequence::new();
/// seq.push_back(1)?;
/// seq.push_back(2)?;
/// seq.push_back(3)?;
/// assert_eq!(seq.as_slice(), &[1, 2, 3]);
///
/// seq.erase(1)?;
/// seq.insert(1, 5)?;
/// assert_eq!(seq, [1, 5, 3]);
/// # Ok::<(), SequenceError>(())
/// ```
pub struct Sequence<T> {
    /// Owned storage
    pub(super) buf: Buffer<T>,
    /// Number of live elements at the front of `buf`
    pub(super) len: usize,
    /// Securely zero the storage before releasing it
    pub(super) burn_on_drop: bool,
}

impl<T> Sequence<T> {
    /// Creates an empty sequence. Does not allocate.
    ///
    /// # Examples
    ///
    /// ```
    /// use secvec::Sequence;
    ///
    /// let seq: Sequence<String> = Sequence::new();
    /// assert_eq!(seq.len(), 0);
    /// assert_eq!(seq.capacity(), 0);
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Self {
            buf: Buffer::new(),
            len: 0,
            burn_on_drop: false,
        }
    }

    /// Creates an empty sequence with exactly `capacity` slots.
    ///
    /// # Errors
    ///
    /// Propagates allocation failures from [`Buffer::allocate`].
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Ok(Self {
            buf: Buffer::allocate(capacity)?,
            len: 0,
            burn_on_drop: false,
        })
    }

    /// Creates an empty sequence from a [`SequenceConfig`].
    ///
    /// # Errors
    ///
    /// Propagates allocation failures from [`Buffer::allocate`].
    pub fn with_config(config: SequenceConfig) -> Result<Self> {
        Ok(Self {
            buf: Buffer::allocate(config.initial_capacity)?,
            len: 0,
            burn_on_drop: config.burn_on_drop,
        })
    }

    /// Returns the number of live elements.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the sequence holds no elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots in the owned buffer.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Returns the number of free slots after the last element.
    #[inline(always)]
    pub fn spare_capacity(&self) -> usize {
        self.buf.capacity() - self.len
    }

    /// Returns `true` if the storage is zeroed before it is released.
    #[inline]
    pub fn burns_on_drop(&self) -> bool {
        self.burn_on_drop
    }

    /// Enables or disables zeroing the storage when it is released.
    ///
    /// Applies to drop and to buffers discarded by reallocation.
    #[inline]
    pub fn set_burn_on_drop(&mut self, burn: bool) {
        self.burn_on_drop = burn;
    }

    /// Returns the live elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots [0, len) are initialized.
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }

    /// Returns the live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: slots [0, len) are initialized and uniquely borrowed.
        unsafe { slice::from_raw_parts_mut(self.buf.as_mut_ptr(), self.len) }
    }

    /// Returns a raw pointer to the first slot.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buf.as_ptr()
    }

    /// Exchanges the whole state (storage, length, burn flag) with `other`
    /// in constant time.
    ///
    /// Element-wise `seq.swap(a, b)` still reaches `<[T]>::swap` through
    /// `Deref`.
    ///
    /// # Examples
    ///
    /// ```
    /// use secvec::Sequence;
    ///
    /// let mut a: Sequence<i32> = [1, 2].into_iter().collect();
    /// let mut b: Sequence<i32> = [3].into_iter().collect();
    /// a.swap_with(&mut b);
    /// assert_eq!(a, [3]);
    /// assert_eq!(b, [1, 2]);
    /// ```
    #[inline]
    pub fn swap_with(&mut self, other: &mut Sequence<T>) {
        self.buf.swap(&mut other.buf);
        mem::swap(&mut self.len, &mut other.len);
        mem::swap(&mut self.burn_on_drop, &mut other.burn_on_drop);
    }

    /// Moves the whole state out, leaving an empty, unallocated sequence.
    ///
    /// Equivalent to [`std::mem::take`].
    ///
    /// # Examples
    ///
    /// ```
    /// use secvec::Sequence;
    ///
    /// let mut src: Sequence<i32> = [1, 2, 3].into_iter().collect();
    /// let dst = src.take();
    /// assert_eq!(dst, [1, 2, 3]);
    /// assert_eq!(src.len(), 0);
    /// assert_eq!(src.capacity(), 0);
    /// ```
    #[inline]
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// Ensures capacity is at least `capacity` slots.
    ///
    /// Unlike [`Vec::reserve`], the argument is the total capacity, and the
    /// new buffer is sized exactly. No-op when capacity already suffices.
    ///
    /// # Errors
    ///
    /// Propagates allocation failures; the sequence is unchanged on error.
    ///
    /// # Examples
    ///
    /// ```
    /// use secvec::Sequence;
    /// # use secvec::SequenceError;
    ///
    /// let mut seq: Sequence<u8> = Sequence::new();
    /// seq.push_back(1)?;
    /// seq.reserve(10)?;
    /// assert_eq!(seq.capacity(), 10);
    /// assert_eq!(seq.len(), 1);
    /// # Ok::<(), SequenceError>(())
    /// ```
    pub fn reserve(&mut self, capacity: usize) -> Result<()> {
        if capacity <= self.capacity() {
            return Ok(());
        }
        let new_buf = Buffer::allocate(capacity)?;
        let len = self.len;
        self.install(new_buf, len, 0);
        Ok(())
    }

    /// Reallocates so that capacity equals the current length.
    ///
    /// # Errors
    ///
    /// Propagates allocation failures; the sequence is unchanged on error.
    pub fn shrink_to_fit(&mut self) -> Result<()> {
        if self.capacity() == self.len {
            return Ok(());
        }
        let new_buf = Buffer::allocate(self.len)?;
        let len = self.len;
        self.install(new_buf, len, 0);
        Ok(())
    }

    /// Drops trailing elements so that at most `len` remain.
    ///
    /// Capacity is unchanged. No-op if `len >= self.len()`.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let removed = self.len - len;
        self.len = len;
        // SAFETY: slots [len, len + removed) were live and are now outside
        // the tracked range, so they cannot be dropped twice.
        unsafe { self.buf.drop_range(len, removed) };
    }

    /// Drops every element, keeping the capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Drops every element and securely zeros the whole buffer.
    ///
    /// Capacity is kept, so the sequence can be refilled without
    /// reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use secvec::Sequence;
    ///
    /// let mut seq: Sequence<u64> = [0xAAAA, 0xBBBB].into_iter().collect();
    /// let capacity = seq.capacity();
    /// seq.burn();
    /// assert!(seq.is_empty());
    /// assert_eq!(seq.capacity(), capacity);
    /// ```
    pub fn burn(&mut self) {
        self.clear();
        self.buf.burn();
    }

    /// Resizes to `new_len`, filling new slots with values produced by `f`.
    ///
    /// Shrinking drops trailing elements and keeps capacity. Growing within
    /// capacity constructs in place; if `f` panics, every element built so
    /// far stays in the sequence. Growing past capacity builds the new tail
    /// in a fresh buffer first; if `f` panics the sequence is unchanged.
    ///
    /// # Errors
    ///
    /// Propagates allocation failures; the sequence is unchanged on error.
    pub fn resize_with<F>(&mut self, new_len: usize, mut f: F) -> Result<()>
    where
        F: FnMut() -> T,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return Ok(());
        }

        if new_len > self.capacity() {
            let mut new_buf = Buffer::allocate(self.grown_capacity(new_len))?;
            // SAFETY: slots [len, new_len) of the fresh buffer are free.
            let mut tail = unsafe { InitGuard::new(new_buf.offset_mut(self.len)) };
            for _ in self.len..new_len {
                tail.push(f());
            }
            tail.finish();

            let len = self.len;
            self.install(new_buf, len, 0);
            self.len = new_len;
            return Ok(());
        }

        let base = self.buf.as_mut_ptr();
        let mut len = SetLenOnDrop::new(&mut self.len);
        while len.current() < new_len {
            // SAFETY: current() < new_len <= capacity and the slot is free.
            unsafe { base.add(len.current()).write(f()) };
            len.increment();
        }
        Ok(())
    }

    /// Appends every item of `iter`, growing at most once up front for the
    /// iterator's lower size bound.
    ///
    /// # Errors
    ///
    /// Propagates allocation failures. Items appended before the failure
    /// stay in the sequence.
    pub fn try_extend<I>(&mut self, iter: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        if lower > self.spare_capacity() {
            let required = self.required_len(lower)?;
            self.reserve(self.grown_capacity(required))?;
        }
        for value in iter {
            self.push_back(value)?;
        }
        Ok(())
    }

    /// Length after adding `additional` elements, or an overflow error.
    #[inline]
    pub(super) fn required_len(&self, additional: usize) -> Result<usize> {
        self.len
            .checked_add(additional)
            .ok_or(SequenceError::CapacityOverflow {
                requested: additional,
            })
    }

    /// Growth policy: at least double (starting from 1), or exactly
    /// `required` if that is larger.
    #[inline]
    pub(super) fn grown_capacity(&self, required: usize) -> usize {
        let doubled = match self.capacity() {
            0 => 1,
            capacity => capacity.saturating_mul(2),
        };
        required.max(doubled)
    }

    /// Relocates the live elements into `new_buf`, leaving `gap` free slots
    /// at index `at`, then makes `new_buf` the owned storage.
    ///
    /// Relocation is a bitwise move, so once the new buffer exists this step
    /// cannot fail. The old storage is released without dropping anything
    /// (its slots were moved out), after zeroing when burn-on-drop is set.
    /// Does not change `len`.
    pub(super) fn install(&mut self, mut new_buf: Buffer<T>, at: usize, gap: usize) {
        debug_assert!(at <= self.len);
        debug_assert!(self.len + gap <= new_buf.capacity());

        let old_capacity = self.capacity();
        let len = self.len;
        // SAFETY: the source ranges are live, the destination ranges are
        // free and both fit in the fresh buffer.
        unsafe {
            self.buf.relocate_into(0, &mut new_buf, 0, at);
            self.buf.relocate_into(at, &mut new_buf, at + gap, len - at);
        }
        self.buf.swap(&mut new_buf);
        if self.burn_on_drop {
            new_buf.burn();
        }

        debug!(
            old_capacity,
            new_capacity = self.capacity(),
            len,
            "sequence reallocated"
        );
    }
}

impl<T: Default> Sequence<T> {
    /// Creates a sequence of `len` default-constructed elements with
    /// capacity exactly `len`.
    ///
    /// If `T::default()` panics partway, the elements already built are
    /// dropped and the buffer released before the panic continues.
    ///
    /// # Errors
    ///
    /// Propagates allocation failures from [`Buffer::allocate`].
    ///
    /// # Examples
    ///
    /// ```
    /// use secvec::Sequence;
    /// # use secvec::SequenceError;
    ///
    /// let seq: Sequence<u32> = Sequence::with_size(4)?;
    /// assert_eq!(seq, [0, 0, 0, 0]);
    /// assert_eq!(seq.capacity(), 4);
    /// # Ok::<(), SequenceError>(())
    /// ```
    pub fn with_size(len: usize) -> Result<Self> {
        let mut buf = Buffer::allocate(len)?;
        // SAFETY: a fresh buffer has `len` free slots.
        let mut guard = unsafe { InitGuard::new(buf.as_mut_ptr()) };
        for _ in 0..len {
            guard.push(T::default());
        }
        let len = guard.finish();
        Ok(Self {
            buf,
            len,
            burn_on_drop: false,
        })
    }

    /// Resizes to `new_len`, default-constructing any new elements.
    ///
    /// See [`resize_with`](Self::resize_with) for the failure behavior.
    ///
    /// # Errors
    ///
    /// Propagates allocation failures; the sequence is unchanged on error.
    #[inline]
    pub fn resize(&mut self, new_len: usize) -> Result<()> {
        self.resize_with(new_len, T::default)
    }
}

impl<T: Clone> Sequence<T> {
    /// Clones the sequence into a buffer sized exactly to its length.
    ///
    /// If cloning an element panics, the clones already made are dropped and
    /// the new buffer released; `self` is never modified.
    ///
    /// # Errors
    ///
    /// Propagates allocation failures from [`Buffer::allocate`].
    pub fn try_clone(&self) -> Result<Self> {
        let mut buf = Buffer::allocate(self.len)?;
        // SAFETY: a fresh buffer has `self.len` free slots.
        let mut guard = unsafe { InitGuard::new(buf.as_mut_ptr()) };
        for value in self.iter() {
            guard.push(value.clone());
        }
        let len = guard.finish();
        Ok(Self {
            buf,
            len,
            burn_on_drop: self.burn_on_drop,
        })
    }

    /// Makes `self` an element-wise copy of `source`.
    ///
    /// When `source` does not fit in the current capacity, a full copy is
    /// built first and swapped in, so `self` is untouched if that fails.
    /// Otherwise the overlapping prefix is clone-assigned in place, then the
    /// surplus is dropped or the extra elements are cloned into spare
    /// capacity, without reallocating. The burn flag of `self` is kept.
    ///
    /// # Errors
    ///
    /// Propagates allocation failures; `self` is unchanged on error.
    ///
    /// # Examples
    ///
    /// ```
    /// use secvec::Sequence;
    /// # use secvec::SequenceError;
    ///
    /// let mut dst: Sequence<String> = Sequence::with_capacity(8)?;
    /// dst.push_back("old".to_string())?;
    /// let src: Sequence<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
    ///
    /// dst.try_clone_from(&src)?;
    /// assert_eq!(dst, src);
    /// assert_eq!(dst.capacity(), 8);
    /// # Ok::<(), SequenceError>(())
    /// ```
    pub fn try_clone_from(&mut self, source: &Self) -> Result<()> {
        if source.len > self.capacity() {
            let mut fresh = source.try_clone()?;
            fresh.burn_on_drop = self.burn_on_drop;
            self.buf.swap(&mut fresh.buf);
            mem::swap(&mut self.len, &mut fresh.len);
            return Ok(());
        }

        let common = self.len.min(source.len);
        for (dst, src) in self.as_mut_slice()[..common]
            .iter_mut()
            .zip(&source.as_slice()[..common])
        {
            dst.clone_from(src);
        }

        if source.len > self.len {
            let base = self.buf.as_mut_ptr();
            let mut len = SetLenOnDrop::new(&mut self.len);
            for value in &source.as_slice()[common..] {
                // SAFETY: source.len <= capacity, so the slot is free and in bounds.
                unsafe { base.add(len.current()).write(value.clone()) };
                len.increment();
            }
        } else {
            self.truncate(source.len);
        }
        Ok(())
    }

    /// Creates a sequence by cloning every element of `values`.
    ///
    /// # Errors
    ///
    /// Propagates allocation failures from [`Buffer::allocate`].
    pub fn from_slice(values: &[T]) -> Result<Self> {
        let mut seq = Self::with_capacity(values.len())?;
        seq.extend_from_slice(values)?;
        Ok(seq)
    }

    /// Appends a clone of every element of `values`.
    ///
    /// # Errors
    ///
    /// Propagates allocation failures.
    pub fn extend_from_slice(&mut self, values: &[T]) -> Result<()> {
        self.try_extend(values.iter().cloned())
    }
}

impl<T> Drop for Sequence<T> {
    fn drop(&mut self) {
        self.clear();
        if self.burn_on_drop {
            self.buf.burn();
        }
    }
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Sequence<T> {
    fn clone(&self) -> Self {
        self.try_clone().unwrap_or_else(|err| err.escalate())
    }

    fn clone_from(&mut self, source: &Self) {
        if let Err(err) = self.try_clone_from(source) {
            err.escalate();
        }
    }
}

impl<T> Deref for Sequence<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for Sequence<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for Sequence<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for Sequence<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Sequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for Sequence<T> {}

impl<T: PartialEq> PartialEq<[T]> for Sequence<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for Sequence<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Hash> Hash for Sequence<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    /// # Panics
    ///
    /// Panics if allocation fails.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut seq = Self::new();
        seq.extend(iter);
        seq
    }
}

impl<T> Extend<T> for Sequence<T> {
    /// # Panics
    ///
    /// Panics if allocation fails; use [`Sequence::try_extend`] to handle it.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        if let Err(err) = self.try_extend(iter) {
            err.escalate();
        }
    }
}

/// Zeroizes every element, then drops them and zeros the whole buffer.
impl<T: Zeroize> Zeroize for Sequence<T> {
    fn zeroize(&mut self) {
        for value in self.iter_mut() {
            value.zeroize();
        }
        self.burn();
    }
}
