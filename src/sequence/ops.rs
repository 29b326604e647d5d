// src/sequence/ops.rs
//! Sequence mutation: append, positional insert, removal

use super::core::Sequence;
use crate::buffer::Buffer;
use crate::error::{Result, SequenceError};

impl<T> Sequence<T> {
    /// Appends `value` to the end.
    ///
    /// # Errors
    ///
    /// Propagates allocation failures; the sequence is unchanged and `value`
    /// is dropped.
    #[inline]
    pub fn push_back(&mut self, value: T) -> Result<()> {
        self.emplace_back_with(|| value).map(|_| ())
    }

    /// Constructs a new element at the end from `f` and returns it.
    ///
    /// When the sequence is full, a grown buffer is allocated and the new
    /// element is constructed into it **before** the existing elements are
    /// relocated. If `f` panics, the new buffer is discarded and the sequence
    /// keeps its length, capacity and values.
    ///
    /// # Errors
    ///
    /// Propagates allocation failures; `f` is not called in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use secvec::Sequence;
    /// # use secvec::SequenceError;
    ///
    /// let mut seq: Sequence<String> = Sequence::new();
    /// let last = seq.emplace_back_with(|| "built in place".to_string())?;
    /// last.push('!');
    /// assert_eq!(seq[0], "built in place!");
    /// # Ok::<(), SequenceError>(())
    /// ```
    pub fn emplace_back_with<F>(&mut self, f: F) -> Result<&mut T>
    where
        F: FnOnce() -> T,
    {
        let index = self.len;
        if self.len < self.capacity() {
            let value = f();
            self.buf.slot_mut(index).write(value);
        } else {
            let required = self.required_len(1)?;
            let mut new_buf = Buffer::allocate(self.grown_capacity(required))?;
            new_buf.slot_mut(index).write(f());
            self.install(new_buf, index, 1);
        }
        self.len += 1;
        // SAFETY: the slot at `index` was initialized above.
        Ok(unsafe { self.buf.slot_unchecked_mut(index).assume_init_mut() })
    }

    /// Removes and returns the last element, or `None` if empty.
    #[inline]
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: the slot was live and is now outside the tracked range.
        Some(unsafe { self.buf.take_unchecked(self.len) })
    }

    /// Inserts `value` at `index`, shifting later elements right.
    ///
    /// Returns the index of the inserted element.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::PositionOutOfRange`] if `index > len`, and
    /// propagates allocation failures. The sequence is unchanged on error.
    #[inline]
    pub fn insert(&mut self, index: usize, value: T) -> Result<usize> {
        self.emplace_with(index, || value)
    }

    /// Constructs a new element from `f` at `index`, preserving the order of
    /// every other element. Returns the index of the new element.
    ///
    /// With spare capacity the value is built first, then the suffix is
    /// shifted right by one and the value written into the gap. When full,
    /// a grown buffer is allocated, the value is built into its final slot,
    /// and the prefix and suffix are relocated around it. In both paths a
    /// panic from `f` leaves the sequence unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::PositionOutOfRange`] if `index > len` (before
    /// calling `f`), and propagates allocation failures.
    ///
    /// # Examples
    ///
    /// ```
    /// use secvec::Sequence;
    /// # use secvec::SequenceError;
    ///
    /// let mut seq: Sequence<i32> = [1, 3].into_iter().collect();
    /// let at = seq.emplace_with(1, || 2)?;
    /// assert_eq!(at, 1);
    /// assert_eq!(seq, [1, 2, 3]);
    ///
    /// assert!(seq.emplace_with(9, || 0).is_err());
    /// # Ok::<(), SequenceError>(())
    /// ```
    pub fn emplace_with<F>(&mut self, index: usize, f: F) -> Result<usize>
    where
        F: FnOnce() -> T,
    {
        if index > self.len {
            return Err(SequenceError::PositionOutOfRange {
                index,
                len: self.len,
            });
        }

        if self.len < self.capacity() {
            let value = f();
            // SAFETY: len < capacity, so the shifted suffix still fits; the
            // gap left at `index` is filled immediately.
            unsafe {
                self.buf.shift(index, index + 1, self.len - index);
                self.buf.slot_unchecked_mut(index).write(value);
            }
        } else {
            let required = self.required_len(1)?;
            let mut new_buf = Buffer::allocate(self.grown_capacity(required))?;
            new_buf.slot_mut(index).write(f());
            self.install(new_buf, index, 1);
        }
        self.len += 1;
        Ok(index)
    }

    /// Removes and returns the element at `index`, shifting later elements
    /// left.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::PositionOutOfRange`] if `index >= len`.
    pub fn remove(&mut self, index: usize) -> Result<T> {
        if index >= self.len {
            return Err(SequenceError::PositionOutOfRange {
                index,
                len: self.len,
            });
        }
        // SAFETY: index < len; the vacated slot is overwritten by the shift
        // and the last slot leaves the tracked range.
        let value = unsafe {
            let value = self.buf.take_unchecked(index);
            self.buf.shift(index + 1, index, self.len - index - 1);
            value
        };
        self.len -= 1;
        Ok(value)
    }

    /// Removes and drops the element at `index`.
    ///
    /// Returns the index now occupied by the element that followed the
    /// removed one, which equals `len()` if the last element was removed.
    /// The length is updated before the element's `Drop` runs.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::PositionOutOfRange`] if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use secvec::Sequence;
    /// # use secvec::SequenceError;
    ///
    /// let mut seq: Sequence<i32> = [1, 2, 3].into_iter().collect();
    /// assert_eq!(seq.erase(1)?, 1);
    /// assert_eq!(seq, [1, 3]);
    /// assert_eq!(seq.erase(1)?, seq.len());
    /// # Ok::<(), SequenceError>(())
    /// ```
    pub fn erase(&mut self, index: usize) -> Result<usize> {
        drop(self.remove(index)?);
        Ok(index)
    }
}
