use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;

use crate::linked::iterator::IntoIter;
use crate::linked::LinkedSeq;

impl<T> LinkedSeq<T> {
    /// Returns `true` if an element equal to `value` is present.
    ///
    /// # Complexity
    ///
    /// *O*(*n*).
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|element| element == value)
    }

    /// The index of the first element equal to `value`, if any.
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|element| element == value)
    }

    /// The index of the last element equal to `value`, if any. Scans
    /// backward from the tail.
    pub fn last_index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter()
            .rev()
            .position(|element| element == value)
            .map(|from_back| self.len() - 1 - from_back)
    }

    /// Remove the first element equal to `value`, if any, unlinking its
    /// node in place.
    ///
    /// Returns the removed element, or `None` if no element matched; in
    /// that case nothing is structural and open handles stay fresh.
    ///
    /// # Examples
    /// ```
    /// use stamplist::LinkedSeq;
    /// use std::iter::FromIterator;
    ///
    /// let mut seq = LinkedSeq::from_iter([1, 2, 1]);
    /// assert_eq!(seq.remove_item(&1), Some(1));
    /// assert_eq!(seq.to_vec(), vec![2, 1]);
    /// assert_eq!(seq.remove_item(&7), None);
    /// ```
    pub fn remove_item(&mut self, value: &T) -> Option<T>
    where
        T: PartialEq,
    {
        let mut node = self.head_node();
        while let Some(n) = node {
            // SAFETY: walking the live links of this chain.
            unsafe {
                if (*n.as_ptr()).element == *value {
                    return Some(self.unlink_through_handle(n));
                }
                node = (*n.as_ptr()).next;
            }
        }
        None
    }

    /// Remove the last element equal to `value`, if any. Scans backward
    /// from the tail.
    pub fn remove_last_item(&mut self, value: &T) -> Option<T>
    where
        T: PartialEq,
    {
        let mut node = self.tail_node();
        while let Some(n) = node {
            // SAFETY: as in `remove_item`, walking backward.
            unsafe {
                if (*n.as_ptr()).element == *value {
                    return Some(self.unlink_through_handle(n));
                }
                node = (*n.as_ptr()).prev;
            }
        }
        None
    }
}

impl<T: PartialEq> PartialEq for LinkedSeq<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedSeq<T> {}

impl<T: PartialOrd> PartialOrd for LinkedSeq<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for LinkedSeq<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash> Hash for LinkedSeq<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for element in self.iter() {
            element.hash(state);
        }
    }
}

/// The clone is an independent container with a fresh identity; handles
/// captured against the original do not transfer.
impl<T: Clone> Clone for LinkedSeq<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T> FromIterator<T> for LinkedSeq<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut seq = LinkedSeq::new();
        seq.extend(iter);
        seq
    }
}

impl<T> Extend<T> for LinkedSeq<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T, const N: usize> From<[T; N]> for LinkedSeq<T> {
    fn from(array: [T; N]) -> Self {
        Self::from_iter(array)
    }
}

impl<T> From<Vec<T>> for LinkedSeq<T> {
    fn from(vec: Vec<T>) -> Self {
        Self::from_iter(vec)
    }
}

impl<T> IntoIterator for LinkedSeq<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a LinkedSeq<T> {
    type Item = &'a T;
    type IntoIter = crate::linked::iterator::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut LinkedSeq<T> {
    type Item = &'a mut T;
    type IntoIter = crate::linked::iterator::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
