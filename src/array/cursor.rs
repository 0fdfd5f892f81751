use crate::array::ArraySeq;
use crate::stamp::Stamp;
use crate::{Error, Result};

/// A fail-fast bidirectional cursor over an [`ArraySeq`].
///
/// The cursor is a handle: it holds positional bookkeeping and a captured
/// stamp, but no borrow of the container. Every call receives the container
/// explicitly, and every positional read, step, or mutation first compares
/// the captured stamp against the container's live one. A mismatch (the
/// container was structurally mutated through another path, or a different
/// container was passed) fails with [`Error::ConcurrentStructuralChange`].
///
/// In a container of length *n* there are *n* + 1 cursor positions,
/// `0..=n`: before the first element, between any two, and after the last.
/// [`next`] yields the element after the position and advances;
/// [`prev`] yields the element before it and retreats.
///
/// Mutating **through** the cursor ([`remove`], [`insert`]) refreshes the
/// captured stamp, so the same cursor remains usable and stays semantically
/// consistent with the shift: removing a just-yielded element leaves the
/// cursor at what is now the next element, with nothing skipped or
/// repeated. [`set`] is pure value replacement and moves no stamp at all.
///
/// # Examples
///
/// ```
/// use stamplist::ArraySeq;
/// use std::iter::FromIterator;
///
/// let mut seq = ArraySeq::from_iter([1, 2, 3, 4]);
/// let mut cursor = seq.cursor();
///
/// // Remove the even elements mid-traversal.
/// while let Some(n) = cursor.next(&seq).unwrap() {
///     if n % 2 == 0 {
///         cursor.remove(&mut seq).unwrap();
///     }
/// }
/// assert_eq!(seq.as_slice(), &[1, 3]);
/// ```
///
/// [`next`]: ArrayCursor::next
/// [`prev`]: ArrayCursor::prev
/// [`remove`]: ArrayCursor::remove
/// [`insert`]: ArrayCursor::insert
/// [`set`]: ArrayCursor::set
#[derive(Debug, Clone)]
pub struct ArrayCursor {
    /// Next position to yield, `0..=len`.
    index: usize,
    /// Index of the element most recently yielded by `next`/`prev`, if it
    /// has not been removed or displaced by a cursor insertion since.
    last: Option<usize>,
    stamp: Stamp,
}

impl ArrayCursor {
    pub(crate) fn new(index: usize, stamp: Stamp) -> Self {
        Self {
            index,
            last: None,
            stamp,
        }
    }

    /// Returns `true` if a forward step would yield an element.
    ///
    /// Like the position queries this does not check the stamp; only
    /// reads, steps, and mutations do.
    pub fn has_next<T>(&self, seq: &ArraySeq<T>) -> bool {
        self.index < seq.len()
    }

    /// Returns `true` if a backward step would yield an element.
    pub fn has_prev(&self) -> bool {
        self.index > 0
    }

    /// The index of the element a [`next`](ArrayCursor::next) call would
    /// yield (equal to the container length when at the end).
    pub fn next_index(&self) -> usize {
        self.index
    }

    /// The index of the element a [`prev`](ArrayCursor::prev) call would
    /// yield, or `None` when before the first element.
    pub fn prev_index(&self) -> Option<usize> {
        self.index.checked_sub(1)
    }

    /// Step forward, yielding the next element, or `Ok(None)` past the end.
    ///
    /// # Errors
    ///
    /// [`Error::ConcurrentStructuralChange`] if the container was
    /// structurally mutated since this cursor's stamp was captured.
    pub fn next<'a, T>(&mut self, seq: &'a ArraySeq<T>) -> Result<Option<&'a T>> {
        seq.guard(self.stamp)?;
        if self.index >= seq.len() {
            return Ok(None);
        }
        let element = &seq.slice()[self.index];
        self.last = Some(self.index);
        self.index += 1;
        Ok(Some(element))
    }

    /// Step backward, yielding the previous element, or `Ok(None)` before
    /// the first.
    ///
    /// # Errors
    ///
    /// [`Error::ConcurrentStructuralChange`] on stamp divergence.
    pub fn prev<'a, T>(&mut self, seq: &'a ArraySeq<T>) -> Result<Option<&'a T>> {
        seq.guard(self.stamp)?;
        if self.index == 0 {
            return Ok(None);
        }
        self.index -= 1;
        self.last = Some(self.index);
        Ok(Some(&seq.slice()[self.index]))
    }

    /// Remove the element most recently yielded by `next` or `prev`,
    /// returning it.
    ///
    /// The cursor adjusts with the shift and the captured stamp is
    /// refreshed, so the cursor remains usable: after a forward yield the
    /// cursor ends up pointing at what is now the next element.
    ///
    /// # Errors
    ///
    /// [`Error::ConcurrentStructuralChange`] on stamp divergence;
    /// [`Error::InvalidArgument`] if nothing was yielded since the last
    /// cursor mutation.
    pub fn remove<T>(&mut self, seq: &mut ArraySeq<T>) -> Result<T> {
        seq.guard(self.stamp)?;
        let at = self.last.take().ok_or(Error::InvalidArgument {
            reason: "cursor has no current element",
        })?;
        let value = seq.remove(at)?;
        if at < self.index {
            self.index -= 1;
        }
        self.stamp = seq.stamp();
        Ok(value)
    }

    /// Insert `value` at the cursor position; the cursor ends up after the
    /// new element, so a following [`next`](ArrayCursor::next) yields what
    /// it would have yielded anyway.
    ///
    /// # Errors
    ///
    /// [`Error::ConcurrentStructuralChange`] on stamp divergence;
    /// [`Error::Overflow`] on capacity exhaustion.
    pub fn insert<T>(&mut self, seq: &mut ArraySeq<T>, value: T) -> Result<()> {
        seq.guard(self.stamp)?;
        seq.insert(self.index, value)?;
        self.index += 1;
        self.last = None;
        self.stamp = seq.stamp();
        Ok(())
    }

    /// Replace the element most recently yielded by `next` or `prev`,
    /// returning the previous value.
    ///
    /// Pure value replacement: no stamp moves anywhere, and other open
    /// handles stay valid.
    ///
    /// # Errors
    ///
    /// [`Error::ConcurrentStructuralChange`] on stamp divergence;
    /// [`Error::InvalidArgument`] if nothing was yielded since the last
    /// cursor mutation.
    pub fn set<T>(&mut self, seq: &mut ArraySeq<T>, value: T) -> Result<T> {
        seq.guard(self.stamp)?;
        let at = self.last.ok_or(Error::InvalidArgument {
            reason: "cursor has no current element",
        })?;
        seq.set(at, value)
    }
}
