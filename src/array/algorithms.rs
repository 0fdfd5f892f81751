use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;

use crate::array::{ArraySeq, Sizing};
use crate::stamp::Stamp;
use crate::Result;

impl<T> ArraySeq<T> {
    /// Returns `true` if the container holds an element equal to `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.index_of(value).is_some()
    }

    /// Returns the index of the first element equal to `value`.
    ///
    /// Linear scan over the live range. With `Option`-typed elements an
    /// absent value is an ordinary matchable value.
    ///
    /// # Examples
    /// ```
    /// use stamplist::ArraySeq;
    /// use std::iter::FromIterator;
    ///
    /// let seq = ArraySeq::from_iter([Some(1), None, Some(1)]);
    /// assert_eq!(seq.index_of(&None), Some(1));
    /// assert_eq!(seq.index_of(&Some(2)), None);
    /// ```
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.slice().iter().position(|e| e == value)
    }

    /// Returns the index of the last element equal to `value`.
    pub fn last_index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.slice().iter().rposition(|e| e == value)
    }

    /// Remove every element matched by a fallible predicate.
    ///
    /// Two passes: the first evaluates `pred` over every live element and
    /// records matches in a bitmap; the second compacts the survivors
    /// leftward, preserving their relative order, and drops the removed
    /// values. The stamp moves once, after the compaction.
    ///
    /// If `pred` itself fails partway through the first pass, the scan
    /// aborts with that error and the container is left exactly as it was:
    /// elements already matched are **not** removed.
    ///
    /// Returns the number of removed elements.
    ///
    /// # Examples
    /// ```
    /// use stamplist::ArraySeq;
    /// use std::iter::FromIterator;
    ///
    /// let mut seq = ArraySeq::from_iter([1, 2, 3, 4, 5]);
    /// let removed = seq.try_remove_if(|n| {
    ///     if *n > 4 {
    ///         return Err("too big to judge");
    ///     }
    ///     Ok(n % 2 == 0)
    /// });
    /// assert_eq!(removed, Err("too big to judge"));
    /// assert_eq!(seq.as_slice(), &[1, 2, 3, 4, 5]); // untouched
    /// ```
    pub fn try_remove_if<E, F>(&mut self, mut pred: F) -> Result<usize, E>
    where
        F: FnMut(&T) -> Result<bool, E>,
    {
        let len = self.slice().len();
        let mut matched = vec![0u64; (len + 63) / 64];
        let mut count = 0usize;
        for (i, element) in self.slice().iter().enumerate() {
            if pred(element)? {
                matched[i >> 6] |= 1 << (i & 63);
                count += 1;
            }
        }
        if count == 0 {
            return Ok(0);
        }
        let mut i = 0;
        self.slice_vec().retain(|_| {
            let keep = matched[i >> 6] & (1 << (i & 63)) == 0;
            i += 1;
            keep
        });
        self.bump();
        Ok(count)
    }

    /// Remove every element matching `pred`, preserving survivor order.
    ///
    /// Returns the number of removed elements.
    ///
    /// # Examples
    /// ```
    /// use stamplist::ArraySeq;
    /// use std::iter::FromIterator;
    ///
    /// let mut seq = ArraySeq::from_iter([1, 2, 3, 4, 5]);
    /// assert_eq!(seq.remove_if(|n| n % 2 == 0), 2);
    /// assert_eq!(seq.as_slice(), &[1, 3, 5]);
    /// ```
    pub fn remove_if<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        match self.try_remove_if(|e| Ok::<_, std::convert::Infallible>(pred(e))) {
            Ok(count) => count,
            Err(never) => match never {},
        }
    }

    /// Keep only the elements matching `pred`; the bulk
    /// remove-by-membership of an external set is this with a membership
    /// test as the predicate.
    ///
    /// Returns the number of removed elements.
    pub fn retain_if<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        self.remove_if(|e| !pred(e))
    }

    /// Replace every element in place with `f(element)`.
    ///
    /// Like the sort below this counts as a structural mutation for
    /// fail-fast purposes and invalidates open handles, even though the
    /// length is unchanged.
    ///
    /// # Examples
    /// ```
    /// use stamplist::ArraySeq;
    /// use std::iter::FromIterator;
    ///
    /// let mut seq = ArraySeq::from_iter([1, 2, 3]);
    /// seq.replace_each(|n| n * 10);
    /// assert_eq!(seq.as_slice(), &[10, 20, 30]);
    /// ```
    pub fn replace_each<F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> T,
    {
        for slot in self.slice_mut() {
            *slot = f(slot);
        }
        self.bump();
    }

    /// Sort the live range in place by an injected total order.
    ///
    /// The sort is stable. The stamp moves even though the length is
    /// unchanged, because element positions did, and open handles must be
    /// invalidated.
    ///
    /// # Examples
    /// ```
    /// use stamplist::ArraySeq;
    /// use std::iter::FromIterator;
    ///
    /// let mut seq = ArraySeq::from_iter([3, 1, 2]);
    /// seq.sort_by(|a, b| a.cmp(b));
    /// assert_eq!(seq.as_slice(), &[1, 2, 3]);
    /// ```
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.slice_vec().sort_by(compare);
        self.bump();
    }
}

impl<T: PartialEq> PartialEq for ArraySeq<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for ArraySeq<T> {}

impl<T: PartialOrd> PartialOrd for ArraySeq<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord> Ord for ArraySeq<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash> Hash for ArraySeq<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T: Clone> Clone for ArraySeq<T> {
    /// The clone gets a fresh stamp identity: handles opened on the
    /// original never validate against the clone.
    fn clone(&self) -> Self {
        Self {
            buf: self.as_slice().to_vec(),
            sizing: self.sizing,
            stamp: Stamp::fresh(),
        }
    }
}

impl<T> FromIterator<T> for ArraySeq<T> {
    /// Build a container from a finite input sequence; the elements are
    /// moved into fresh backing storage, never aliased.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<T>>())
    }
}

impl<T> From<Vec<T>> for ArraySeq<T> {
    fn from(buf: Vec<T>) -> Self {
        Self {
            buf,
            sizing: Sizing::Explicit,
            stamp: Stamp::fresh(),
        }
    }
}

impl<T, const N: usize> From<[T; N]> for ArraySeq<T> {
    fn from(items: [T; N]) -> Self {
        Self::from_iter(items)
    }
}

impl<T> Extend<T> for ArraySeq<T> {
    /// Infallible counterpart of [`ArraySeq::append_all`]; growth past the
    /// slot ceiling is unreachable through allocation anyway.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            let _ = self.push(item);
        }
    }
}

impl<T> IntoIterator for ArraySeq<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ArraySeq<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut ArraySeq<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use crate::ArraySeq;
    use std::iter::FromIterator;

    #[test]
    fn remove_if_keeps_survivor_order() {
        let mut seq = ArraySeq::from_iter(0..20);
        let removed = seq.remove_if(|n| n % 3 == 0);
        assert_eq!(removed, 7);
        assert!(seq.iter().all(|n| n % 3 != 0));
        let mut sorted = seq.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, seq.to_vec(), "relative order preserved");
    }

    #[test]
    fn remove_if_drops_even_elements() {
        let mut seq = ArraySeq::from_iter([1, 2, 3, 4, 5]);
        seq.remove_if(|n| n % 2 == 0);
        assert_eq!(seq.as_slice(), &[1, 3, 5]);
    }

    #[test]
    fn failed_predicate_leaves_container_untouched() {
        let mut seq = ArraySeq::from_iter(0..10);
        let stamp = seq.stamp();
        let result = seq.try_remove_if(|n| if *n == 7 { Err(()) } else { Ok(n % 2 == 0) });
        assert_eq!(result, Err(()));
        assert_eq!(seq.to_vec(), (0..10).collect::<Vec<_>>());
        assert_eq!(seq.stamp(), stamp, "no structural change recorded");
    }

    #[test]
    fn retain_if_is_negated_removal() {
        let mut seq = ArraySeq::from_iter(0..10);
        let removed = seq.retain_if(|n| n % 2 == 0);
        assert_eq!(removed, 5);
        assert_eq!(seq.as_slice(), &[0, 2, 4, 6, 8]);
    }

    #[test]
    fn remove_if_nothing_matched_keeps_stamp() {
        let mut seq = ArraySeq::from_iter([1, 3, 5]);
        let stamp = seq.stamp();
        assert_eq!(seq.remove_if(|n| n % 2 == 0), 0);
        assert_eq!(seq.stamp(), stamp);
    }

    #[test]
    fn remove_if_spans_bitmap_words() {
        let mut seq = ArraySeq::from_iter(0..200);
        let removed = seq.remove_if(|n| n % 2 == 1);
        assert_eq!(removed, 100);
        assert_eq!(seq.to_vec(), (0..200).step_by(2).collect::<Vec<_>>());
    }

    #[test]
    fn sort_by_injected_comparator() {
        let mut seq = ArraySeq::from_iter([3, 1, 4, 1, 5]);
        seq.sort_by(|a, b| b.cmp(a));
        assert_eq!(seq.as_slice(), &[5, 4, 3, 1, 1]);
    }

    #[test]
    fn index_of_scans_forward_and_backward() {
        let seq = ArraySeq::from_iter([1, 2, 1, 3]);
        assert_eq!(seq.index_of(&1), Some(0));
        assert_eq!(seq.last_index_of(&1), Some(2));
        assert_eq!(seq.index_of(&9), None);
        assert!(seq.contains(&3));
    }

    #[test]
    fn clone_has_independent_stamp() {
        let seq = ArraySeq::from_iter([1, 2, 3]);
        let cursor = seq.cursor();
        let clone = seq.clone();
        assert_eq!(seq, clone);
        let mut cursor = cursor;
        assert!(cursor.next(&clone).is_err(), "handle does not transfer");
    }
}
