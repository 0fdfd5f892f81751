use std::fmt::{Debug, Formatter};
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::linked::{LinkedSeq, Node};

/// A borrowing forward iterator over a [`LinkedSeq`].
///
/// Double-ended and fused. The borrow on the container makes structural
/// interference impossible at compile time, so no stamp is consulted.
pub struct Iter<'a, T> {
    head: Option<NonNull<Node<T>>>,
    tail: Option<NonNull<Node<T>>>,
    remaining: usize,
    _marker: PhantomData<&'a LinkedSeq<T>>,
}

/// A borrowing forward iterator with mutable references over a
/// [`LinkedSeq`].
///
/// Value mutation only; the chain itself cannot be restructured through
/// it.
pub struct IterMut<'a, T> {
    head: Option<NonNull<Node<T>>>,
    tail: Option<NonNull<Node<T>>>,
    remaining: usize,
    _marker: PhantomData<&'a mut LinkedSeq<T>>,
}

/// An owning iterator over the elements of a [`LinkedSeq`].
pub struct IntoIter<T> {
    seq: LinkedSeq<T>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(seq: &'a LinkedSeq<T>) -> Self {
        Self {
            head: seq.head_node(),
            tail: seq.tail_node(),
            remaining: seq.len(),
            _marker: PhantomData,
        }
    }
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(seq: &'a mut LinkedSeq<T>) -> Self {
        Self {
            head: seq.head_node(),
            tail: seq.tail_node(),
            remaining: seq.len(),
            _marker: PhantomData,
        }
    }
}

impl<T> IntoIter<T> {
    pub(crate) fn new(seq: LinkedSeq<T>) -> Self {
        Self { seq }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.head?;
        self.remaining -= 1;
        // SAFETY: `remaining > 0` keeps the walk within the borrowed chain.
        unsafe {
            let node = &*node.as_ptr();
            self.head = node.next;
            Some(&node.element)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.tail?;
        self.remaining -= 1;
        // SAFETY: as in `next`, walking backward.
        unsafe {
            let node = &*node.as_ptr();
            self.tail = node.prev;
            Some(&node.element)
        }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.head?;
        self.remaining -= 1;
        // SAFETY: each node is yielded at most once, so the exclusive
        // references never alias.
        unsafe {
            let node = &mut *node.as_ptr();
            self.head = node.next;
            Some(&mut node.element)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.tail?;
        self.remaining -= 1;
        // SAFETY: as in `next`; the length counter keeps both ends apart.
        unsafe {
            let node = &mut *node.as_ptr();
            self.tail = node.prev;
            Some(&mut node.element)
        }
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.seq.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.seq.len(), Some(self.seq.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.seq.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: Debug> Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        let mut node = self.head;
        for _ in 0..self.remaining {
            match node {
                // SAFETY: within `remaining`, the links are live.
                Some(n) => unsafe {
                    list.entry(&n.as_ref().element);
                    node = n.as_ref().next;
                },
                None => break,
            }
        }
        list.finish()
    }
}

impl<T: Debug> Debug for IntoIter<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("IntoIter").field(&self.seq).finish()
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            head: self.head,
            tail: self.tail,
            remaining: self.remaining,
            _marker: PhantomData,
        }
    }
}

// SAFETY: the iterators hold the same access to `T` as the references
// they yield.
unsafe impl<T: Sync> Send for Iter<'_, T> {}
unsafe impl<T: Sync> Sync for Iter<'_, T> {}
unsafe impl<T: Send> Send for IterMut<'_, T> {}
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}
