// src/sequence/iter.rs
//! Owning and borrowing iteration over a sequence

use super::core::Sequence;
use crate::buffer::Buffer;
use std::fmt;
use std::iter::FusedIterator;
use std::mem::{self, ManuallyDrop};
use std::slice;

/// Owning iterator returned by [`Sequence::into_iter`].
///
/// Takes over the sequence's buffer; elements not yet yielded are dropped
/// with the iterator.
pub struct IntoIter<T> {
    buf: Buffer<T>,
    start: usize,
    end: usize,
    burn_on_drop: bool,
}

impl<T> IntoIter<T> {
    /// Returns the elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots [start, end) are live.
        unsafe { slice::from_raw_parts(self.buf.as_ptr().add(self.start), self.end - self.start) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: the slot is live and leaves the tracked range right away.
        let value = unsafe { self.buf.take_unchecked(self.start) };
        self.start += 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.start;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        // SAFETY: the slot was live and is now outside the tracked range.
        Some(unsafe { self.buf.take_unchecked(self.end) })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let start = self.start;
        let remaining = self.end - self.start;
        self.start = self.end;
        // SAFETY: slots [start, start + remaining) were live.
        unsafe { self.buf.drop_range(start, remaining) };
        if self.burn_on_drop {
            self.buf.burn();
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T> IntoIterator for Sequence<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        let mut this = ManuallyDrop::new(self);
        let buf = mem::take(&mut this.buf);
        IntoIter {
            buf,
            start: 0,
            end: this.len,
            burn_on_drop: this.burn_on_drop,
        }
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Sequence<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
