use crate::array::split::ArrayRange;
use crate::array::ArraySeq;
use crate::stamp::Stamp;
use crate::{Error, Result};

/// A non-owning, index-translating window over a slice `[offset,
/// offset + len)` of an [`ArraySeq`].
///
/// Like the cursor, a view is a handle: it stores only its offset, length,
/// and a mirrored stamp, and receives the backing container on every call.
/// Each operation checks freshness, translates the local index into the
/// parent's coordinate space, and delegates. After a structural mutation
/// through the view, the view re-synchronizes its own length and stamp
/// from the parent.
///
/// A stale view, one whose parent was mutated through any path other than
/// the view itself (directly, through a cursor, or through a subview),
/// signals [`Error::ConcurrentStructuralChange`] on its next use.
///
/// Subviews compose: [`subview`](ArrayView::subview) folds the offsets
/// together, so a view over a view delegates straight to the backing
/// container with one translation.
///
/// # Examples
///
/// ```
/// use stamplist::ArraySeq;
/// use std::iter::FromIterator;
///
/// let mut seq = ArraySeq::from_iter([10, 20, 30, 40]);
/// let mut view = seq.view(1, 3).unwrap();
/// assert_eq!(view.as_slice(&seq), Ok(&[20, 30][..]));
///
/// view.insert(&mut seq, 1, 99).unwrap();
/// assert_eq!(view.as_slice(&seq), Ok(&[20, 99, 30][..]));
/// assert_eq!(seq.as_slice(), &[10, 20, 99, 30, 40]);
/// ```
#[derive(Debug, Clone)]
pub struct ArrayView {
    offset: usize,
    len: usize,
    stamp: Stamp,
}

impl ArrayView {
    pub(crate) fn new(offset: usize, len: usize, stamp: Stamp) -> Self {
        Self { offset, len, stamp }
    }

    fn bad_index(&self, index: usize) -> Error {
        Error::IndexOutOfRange {
            index,
            len: self.len,
        }
    }

    /// The window length.
    ///
    /// # Errors
    ///
    /// [`Error::ConcurrentStructuralChange`] if the view is stale.
    pub fn len<T>(&self, seq: &ArraySeq<T>) -> Result<usize> {
        seq.guard(self.stamp)?;
        Ok(self.len)
    }

    /// Returns `true` if the window is empty.
    pub fn is_empty<T>(&self, seq: &ArraySeq<T>) -> Result<bool> {
        Ok(self.len(seq)? == 0)
    }

    /// Returns a reference to the element at local `index`.
    pub fn get<'a, T>(&self, seq: &'a ArraySeq<T>, index: usize) -> Result<&'a T> {
        seq.guard(self.stamp)?;
        if index >= self.len {
            return Err(self.bad_index(index));
        }
        seq.get(self.offset + index)
    }

    /// Replace the element at local `index`, returning the previous value.
    /// Not structural; neither the parent's stamp nor the view's moves.
    pub fn set<T>(&self, seq: &mut ArraySeq<T>, index: usize, value: T) -> Result<T> {
        seq.guard(self.stamp)?;
        if index >= self.len {
            return Err(self.bad_index(index));
        }
        seq.set(self.offset + index, value)
    }

    /// Insert at local `index` (up to and including the window length),
    /// growing both the window and the parent.
    pub fn insert<T>(&mut self, seq: &mut ArraySeq<T>, index: usize, value: T) -> Result<()> {
        seq.guard(self.stamp)?;
        if index > self.len {
            return Err(self.bad_index(index));
        }
        seq.insert(self.offset + index, value)?;
        self.len += 1;
        self.stamp = seq.stamp();
        Ok(())
    }

    /// Append at the end of the window.
    pub fn push<T>(&mut self, seq: &mut ArraySeq<T>, value: T) -> Result<()> {
        self.insert(seq, self.len, value)
    }

    /// Remove and return the element at local `index`, shrinking both the
    /// window and the parent.
    pub fn remove<T>(&mut self, seq: &mut ArraySeq<T>, index: usize) -> Result<T> {
        seq.guard(self.stamp)?;
        if index >= self.len {
            return Err(self.bad_index(index));
        }
        let value = seq.remove(self.offset + index)?;
        self.len -= 1;
        self.stamp = seq.stamp();
        Ok(value)
    }

    /// The window's elements as a slice of the parent.
    pub fn as_slice<'a, T>(&self, seq: &'a ArraySeq<T>) -> Result<&'a [T]> {
        seq.guard(self.stamp)?;
        Ok(&seq.slice()[self.offset..self.offset + self.len])
    }

    /// A window over `[from, to)` of this window. Offsets compose, so the
    /// subview delegates to the backing container directly.
    ///
    /// Mutating through the subview leaves **this** view stale, exactly as
    /// any other foreign path would.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `from > to`;
    /// [`Error::IndexOutOfRange`] if `to` exceeds the window length.
    pub fn subview<T>(&self, seq: &ArraySeq<T>, from: usize, to: usize) -> Result<ArrayView> {
        seq.guard(self.stamp)?;
        if from > to {
            return Err(Error::InvalidArgument {
                reason: "view range start exceeds its end",
            });
        }
        if to > self.len {
            return Err(self.bad_index(to));
        }
        Ok(ArrayView::new(self.offset + from, to - from, self.stamp))
    }

    /// A splittable range enumerator over the window, with the local range
    /// translated into parent space and the stamp captured eagerly.
    pub fn range<T>(&self, seq: &ArraySeq<T>) -> Result<ArrayRange> {
        seq.guard(self.stamp)?;
        Ok(ArrayRange::bound(
            self.offset,
            self.offset + self.len,
            self.stamp,
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::{ArraySeq, Error};
    use std::iter::FromIterator;

    #[test]
    fn window_presents_translated_range() {
        let seq = ArraySeq::from_iter([10, 20, 30, 40]);
        let view = seq.view(1, 3).unwrap();
        assert_eq!(view.len(&seq), Ok(2));
        assert_eq!(view.get(&seq, 0), Ok(&20));
        assert_eq!(view.get(&seq, 1), Ok(&30));
        assert_eq!(
            view.get(&seq, 2),
            Err(Error::IndexOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn insert_through_view_updates_parent_and_view() {
        let mut seq = ArraySeq::from_iter([10, 20, 30, 40]);
        let mut view = seq.view(1, 3).unwrap();
        view.insert(&mut seq, 1, 99).unwrap();
        assert_eq!(view.as_slice(&seq), Ok(&[20, 99, 30][..]));
        assert_eq!(seq.as_slice(), &[10, 20, 99, 30, 40]);

        assert_eq!(view.remove(&mut seq, 1), Ok(99));
        assert_eq!(seq.as_slice(), &[10, 20, 30, 40]);
    }

    #[test]
    fn foreign_mutation_makes_view_stale() {
        let mut seq = ArraySeq::from_iter([1, 2, 3]);
        let view = seq.view(0, 2).unwrap();
        seq.push(4).unwrap();
        assert_eq!(view.len(&seq), Err(Error::ConcurrentStructuralChange));
        assert_eq!(view.get(&seq, 0), Err(Error::ConcurrentStructuralChange));
    }

    #[test]
    fn set_keeps_every_handle_fresh() {
        let mut seq = ArraySeq::from_iter([1, 2, 3]);
        let view = seq.view(1, 3).unwrap();
        view.set(&mut seq, 0, 9).unwrap();
        assert_eq!(seq.as_slice(), &[1, 9, 3]);
        assert_eq!(view.get(&seq, 0), Ok(&9));
    }

    #[test]
    fn subview_offsets_compose() {
        let mut seq = ArraySeq::from_iter(0..10);
        let outer = seq.view(2, 8).unwrap(); // [2..8)
        let mut inner = outer.subview(&seq, 1, 4).unwrap(); // parent [3..6)
        assert_eq!(inner.as_slice(&seq), Ok(&[3, 4, 5][..]));

        // Mutating through the subview leaves the outer view stale.
        inner.remove(&mut seq, 0).unwrap();
        assert_eq!(inner.as_slice(&seq), Ok(&[4, 5][..]));
        assert_eq!(
            outer.as_slice(&seq),
            Err(Error::ConcurrentStructuralChange)
        );
    }

    #[test]
    fn degenerate_ranges() {
        let seq = ArraySeq::from_iter([1, 2, 3]);
        let empty = seq.view(2, 2).unwrap();
        assert_eq!(empty.is_empty(&seq), Ok(true));
        assert!(matches!(
            seq.view(2, 1),
            Err(Error::InvalidArgument { .. })
        ));
        assert_eq!(
            seq.view(0, 4).unwrap_err(),
            Error::IndexOutOfRange { index: 4, len: 3 }
        );
    }

    #[test]
    fn view_range_enumerates_window_only() {
        let seq = ArraySeq::from_iter([10, 20, 30, 40]);
        let view = seq.view(1, 3).unwrap();
        let mut range = view.range(&seq).unwrap();
        let mut seen = Vec::new();
        while let Some(n) = range.next(&seq).unwrap() {
            seen.push(*n);
        }
        assert_eq!(seen, vec![20, 30]);
    }
}
