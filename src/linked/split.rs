use std::collections::VecDeque;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::linked::{LinkedSeq, Node};
use crate::stamp::Stamp;
use crate::Result;

/// First batch size handed out by [`LinkedRange::try_split`].
pub(crate) const BATCH_UNIT: usize = 1024;
/// Batch sizes double per split up to this ceiling.
pub(crate) const MAX_BATCH: usize = 1 << 25;

/// A lazily bound, batch-splitting range enumerator over a
/// [`LinkedSeq`].
///
/// Bisecting a linked chain by index would cost a walk per split, so
/// splitting works by *batch extraction* instead: each
/// [`try_split`](LinkedRange::try_split) clones a prefix of the remaining
/// elements into a detached [`BatchRange`] and advances this enumerator
/// past them. Batch sizes start at 1024 and double per split up to a
/// fixed ceiling, so small containers split cheaply while large ones
/// amortize the cloning.
///
/// Like [`ArrayRange`](crate::ArrayRange), the enumerator is a late
/// binding handle: the head pointer, size estimate, and stamp are
/// captured from the container on first use, and every subsequent
/// operation checks the stamp before touching the cached pointer.
///
/// # Examples
///
/// ```
/// use stamplist::LinkedSeq;
/// use std::iter::FromIterator;
///
/// let seq = LinkedSeq::from_iter(0..10);
/// let mut range = seq.range();
/// let mut sum = 0;
/// range.for_each(&seq, |n| sum += n).unwrap();
/// assert_eq!(sum, 45);
/// ```
pub struct LinkedRange<T> {
    /// Next node to yield; absent when exhausted (or before binding).
    node: Option<NonNull<Node<T>>>,
    /// Remaining element count, exact after binding.
    est: usize,
    /// Size of the most recent batch, `0` before the first split.
    batch: usize,
    /// `None` while unbound.
    stamp: Option<Stamp>,
    _marker: PhantomData<*const T>,
}

impl<T> LinkedRange<T> {
    pub(crate) fn unbound() -> Self {
        Self {
            node: None,
            est: 0,
            batch: 0,
            stamp: None,
            _marker: PhantomData,
        }
    }

    /// Capture the head, length, and stamp from the container, once.
    fn bind(&mut self, seq: &LinkedSeq<T>) -> Stamp {
        match self.stamp {
            Some(stamp) => stamp,
            None => {
                let stamp = seq.stamp();
                self.node = seq.head_node();
                self.est = seq.len();
                self.stamp = Some(stamp);
                stamp
            }
        }
    }

    /// The number of elements left to enumerate. Binds the range if it
    /// was still unbound.
    pub fn remaining(&mut self, seq: &LinkedSeq<T>) -> usize {
        self.bind(seq);
        self.est
    }

    /// Yield the next element, or `Ok(None)` when exhausted.
    ///
    /// # Errors
    ///
    /// [`Error::ConcurrentStructuralChange`] if the container was
    /// structurally mutated since the range was bound.
    ///
    /// [`Error::ConcurrentStructuralChange`]: crate::Error::ConcurrentStructuralChange
    pub fn next<'a>(&mut self, seq: &'a LinkedSeq<T>) -> Result<Option<&'a T>> {
        let stamp = self.bind(seq);
        seq.guard(stamp)?;
        let node = match self.node {
            Some(node) => node,
            None => return Ok(None),
        };
        // SAFETY: the stamp matched, so the cached node is still a live
        // node of `seq`.
        let node_ref = unsafe { &*node.as_ptr() };
        self.node = node_ref.next;
        self.est -= 1;
        Ok(Some(&node_ref.element))
    }

    /// Apply `f` to every remaining element in one sweep.
    ///
    /// The stamp is checked once up front; the container is borrowed for
    /// the whole sweep, so no structural change can interleave.
    pub fn for_each<F>(&mut self, seq: &LinkedSeq<T>, mut f: F) -> Result<()>
    where
        F: FnMut(&T),
    {
        let stamp = self.bind(seq);
        seq.guard(stamp)?;
        let mut node = self.node;
        while let Some(n) = node {
            // SAFETY: the stamp matched; the walk stays within `seq`.
            let node_ref = unsafe { &*n.as_ptr() };
            f(&node_ref.element);
            node = node_ref.next;
        }
        self.node = None;
        self.est = 0;
        Ok(())
    }

    /// Split off the next batch of elements as a detached, independently
    /// consumable [`BatchRange`], or `Ok(None)` when exhausted.
    ///
    /// The batch is a clone of a prefix of the remainder; this enumerator
    /// advances past it. Sizes grow 1024, 2048, 4096, ... per split.
    ///
    /// # Errors
    ///
    /// [`Error::ConcurrentStructuralChange`] on stamp divergence.
    ///
    /// [`Error::ConcurrentStructuralChange`]: crate::Error::ConcurrentStructuralChange
    pub fn try_split(&mut self, seq: &LinkedSeq<T>) -> Result<Option<BatchRange<T>>>
    where
        T: Clone,
    {
        let stamp = self.bind(seq);
        seq.guard(stamp)?;
        if self.est == 0 || self.node.is_none() {
            return Ok(None);
        }
        let step = if self.batch == 0 {
            BATCH_UNIT
        } else {
            (self.batch * 2).min(MAX_BATCH)
        };
        let take = step.min(self.est);

        let mut items = VecDeque::with_capacity(take);
        let mut node = self.node;
        for _ in 0..take {
            // SAFETY: `take <= est` bounds the walk within the chain.
            let node_ref = unsafe { &*node.expect("chain shorter than estimate").as_ptr() };
            items.push_back(node_ref.element.clone());
            node = node_ref.next;
        }
        self.node = node;
        self.est -= take;
        self.batch = take;
        Ok(Some(BatchRange { items }))
    }
}

/// A detached batch of cloned elements split off a [`LinkedRange`].
///
/// Owns its elements, so it never fails and can outlive the container.
/// It iterates in container order and supports index-free bisection via
/// [`try_split`](BatchRange::try_split).
#[derive(Debug, Clone)]
pub struct BatchRange<T> {
    items: VecDeque<T>,
}

impl<T> BatchRange<T> {
    /// The number of elements left.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` when the batch is drained.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Bisect the remainder: returns the lower half and keeps the upper,
    /// or `None` once fewer than two elements remain.
    pub fn try_split(&mut self) -> Option<BatchRange<T>> {
        let mid = self.items.len() / 2;
        if mid == 0 {
            return None;
        }
        let upper = self.items.split_off(mid);
        let lower = std::mem::replace(&mut self.items, upper);
        Some(BatchRange { items: lower })
    }
}

impl<T> Iterator for BatchRange<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.items.len(), Some(self.items.len()))
    }
}

impl<T> ExactSizeIterator for BatchRange<T> {}

impl<T> FusedIterator for BatchRange<T> {}

#[cfg(test)]
mod tests {
    use super::{BATCH_UNIT, MAX_BATCH};
    use crate::{Error, LinkedSeq};
    use std::iter::FromIterator;

    #[test]
    fn batch_sizes_double_until_exhausted() {
        let seq = LinkedSeq::from_iter(0..4000);
        let mut range = seq.range();
        let mut sizes = Vec::new();
        let mut drained = Vec::new();
        while let Some(batch) = range.try_split(&seq).unwrap() {
            sizes.push(batch.len());
            drained.extend(batch);
        }
        assert_eq!(sizes, vec![1024, 2048, 928]);
        assert_eq!(drained, (0..4000).collect::<Vec<_>>());
        assert_eq!(range.next(&seq), Ok(None));
    }

    #[test]
    fn batches_and_remainder_cover_everything_once() {
        let seq = LinkedSeq::from_iter(0..1500);
        let mut range = seq.range();
        let batch = range.try_split(&seq).unwrap().unwrap();
        assert_eq!(batch.len(), BATCH_UNIT);

        let mut seen: Vec<i32> = batch.collect();
        while let Some(n) = range.next(&seq).unwrap() {
            seen.push(*n);
        }
        assert_eq!(seen, (0..1500).collect::<Vec<_>>());
    }

    #[test]
    fn doubling_is_capped() {
        // Exercise the schedule arithmetic without a gigantic container.
        assert_eq!((MAX_BATCH * 2).min(MAX_BATCH), MAX_BATCH);
    }

    #[test]
    fn late_binding_covers_elements_appended_before_first_use() {
        let mut seq = LinkedSeq::from_iter([1, 2]);
        let mut range = seq.range();
        seq.push_back(3);

        let mut seen = Vec::new();
        range.for_each(&seq, |n| seen.push(*n)).unwrap();
        assert_eq!(seen, vec![1, 2, 3]);
        assert_eq!(range.remaining(&seq), 0);
    }

    #[test]
    fn mutation_after_binding_fails_fast() {
        let mut seq = LinkedSeq::from_iter([1, 2, 3]);
        let mut range = seq.range();
        assert_eq!(range.next(&seq), Ok(Some(&1)));

        seq.pop_front();
        assert_eq!(range.next(&seq), Err(Error::ConcurrentStructuralChange));
        assert!(range.try_split(&seq).is_err());
    }

    #[test]
    fn detached_batch_outlives_mutation() {
        let mut seq = LinkedSeq::from_iter(0..2000);
        let mut range = seq.range();
        let batch = range.try_split(&seq).unwrap().unwrap();

        // The batch owns clones; mutating the container cannot stale it.
        seq.clear();
        assert_eq!(batch.count(), 1024);
    }

    #[test]
    fn batch_bisection_is_ordered_and_disjoint() {
        let seq = LinkedSeq::from_iter(0..1024);
        let mut range = seq.range();
        let mut upper = range.try_split(&seq).unwrap().unwrap();
        let lower = upper.try_split().unwrap();
        assert_eq!(lower.len(), 512);
        assert_eq!(upper.len(), 512);

        let mut seen: Vec<i32> = lower.collect();
        seen.extend(upper);
        assert_eq!(seen, (0..1024).collect::<Vec<_>>());

        let mut unit = batch_of_one();
        assert!(unit.try_split().is_none());
        assert_eq!(unit.next(), Some(7));
    }

    fn batch_of_one() -> super::BatchRange<i32> {
        let seq = LinkedSeq::from_iter([7]);
        let mut range = seq.range();
        range.try_split(&seq).unwrap().unwrap()
    }
}
