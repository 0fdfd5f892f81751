use crate::array::ArraySeq;
use crate::stamp::Stamp;
use crate::Result;

/// A lazily bounded, recursively splittable range enumerator over an
/// [`ArraySeq`].
///
/// The enumerator covers a half-open index range `[lo, hi)` of contiguous
/// storage. A range obtained from [`ArraySeq::range`] starts *unbound*: its
/// upper bound and stamp are resolved from the container on first use
/// (late binding), so elements appended between creation and first use are
/// still covered. A range obtained from a view is bound eagerly to the
/// view's window.
///
/// [`try_split`] bisects the remaining range, handing back the lower half
/// as a new enumerator and narrowing this one to the upper half; splitting
/// is refused once fewer than two elements remain. Halves are intended to
/// be handed to independent consumers for read-only traversal;
/// recursively splitting down to unit ranges visits every element exactly
/// once, with no gaps or overlaps.
///
/// Every forward step checks the captured stamp and fails with
/// [`ConcurrentStructuralChange`] if the container was structurally
/// mutated after binding.
///
/// # Examples
///
/// ```
/// use stamplist::ArraySeq;
/// use std::iter::FromIterator;
///
/// let seq = ArraySeq::from_iter(0..100);
/// let mut upper = seq.range();
/// let mut lower = upper.try_split(&seq).unwrap();
///
/// assert_eq!(lower.remaining(&seq), 50);
/// assert_eq!(upper.remaining(&seq), 50);
/// assert_eq!(lower.next(&seq).unwrap(), Some(&0));
/// assert_eq!(upper.next(&seq).unwrap(), Some(&50));
/// ```
///
/// [`try_split`]: ArrayRange::try_split
/// [`ConcurrentStructuralChange`]: crate::Error::ConcurrentStructuralChange
#[derive(Debug, Clone)]
pub struct ArrayRange {
    lo: usize,
    /// Unresolved until first use for a whole-container range.
    hi: Option<usize>,
    /// Captured together with `hi`; `None` while unbound.
    stamp: Option<Stamp>,
}

impl ArrayRange {
    /// A range over the whole container, bounds resolved on first use.
    pub(crate) fn unbound() -> Self {
        Self {
            lo: 0,
            hi: None,
            stamp: None,
        }
    }

    /// A range with explicit bounds (view enumerators), stamp captured by
    /// the caller at translation time.
    pub(crate) fn bound(lo: usize, hi: usize, stamp: Stamp) -> Self {
        Self {
            lo,
            hi: Some(hi),
            stamp: Some(stamp),
        }
    }

    /// Resolve `hi` and the stamp against the container, once.
    fn bind<T>(&mut self, seq: &ArraySeq<T>) -> (usize, Stamp) {
        let stamp = *self.stamp.get_or_insert_with(|| seq.stamp());
        let hi = *self.hi.get_or_insert_with(|| seq.len());
        (hi, stamp)
    }

    /// The number of elements left to enumerate. Binds the range if it was
    /// still unbound.
    pub fn remaining<T>(&mut self, seq: &ArraySeq<T>) -> usize {
        let (hi, _) = self.bind(seq);
        hi.saturating_sub(self.lo)
    }

    /// Yield the next element of the range, or `Ok(None)` when exhausted.
    ///
    /// # Errors
    ///
    /// [`Error::ConcurrentStructuralChange`] if the container was
    /// structurally mutated since the range was bound.
    ///
    /// [`Error::ConcurrentStructuralChange`]: crate::Error::ConcurrentStructuralChange
    pub fn next<'a, T>(&mut self, seq: &'a ArraySeq<T>) -> Result<Option<&'a T>> {
        let (hi, stamp) = self.bind(seq);
        seq.guard(stamp)?;
        if self.lo >= hi {
            return Ok(None);
        }
        // A matching stamp proves `hi <= seq.len()` still holds.
        let element = &seq.slice()[self.lo];
        self.lo += 1;
        Ok(Some(element))
    }

    /// Apply `f` to every remaining element in one sweep.
    ///
    /// The stamp is checked once up front; the container is borrowed for
    /// the whole sweep, so no structural change can interleave.
    pub fn for_each<T, F>(&mut self, seq: &ArraySeq<T>, mut f: F) -> Result<()>
    where
        F: FnMut(&T),
    {
        let (hi, stamp) = self.bind(seq);
        seq.guard(stamp)?;
        for element in &seq.slice()[self.lo..hi] {
            f(element);
        }
        self.lo = hi;
        Ok(())
    }

    /// Bisect the remaining range: returns the lower half as a new
    /// enumerator and narrows this one to the upper half, or `None` once
    /// the remainder is too small to usefully divide.
    pub fn try_split<T>(&mut self, seq: &ArraySeq<T>) -> Option<ArrayRange> {
        let (hi, stamp) = self.bind(seq);
        let mid = self.lo + (hi.saturating_sub(self.lo)) / 2;
        if self.lo >= mid {
            return None;
        }
        let lower = ArrayRange::bound(self.lo, mid, stamp);
        self.lo = mid;
        Some(lower)
    }
}
