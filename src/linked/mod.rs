use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::linked::cursor::LinkedCursor;
use crate::linked::iterator::{Iter, IterMut};
use crate::linked::split::LinkedRange;
use crate::stamp::Stamp;
use crate::{Error, Result};

pub mod cursor;
pub mod iterator;
pub mod split;

mod algorithms;

/// The `LinkedSeq` is an ordered, index-addressable container over a
/// doubly linked chain of heap-allocated nodes.
///
/// Insertion and removal at a known position splice exactly two boundary
/// links in *O*(1); in compromise, reaching an arbitrary index walks the
/// chain. Index lookup picks its direction by comparing the index against
/// `len / 2` (forward from the head or backward from the tail), so it
/// never follows more than ⌈`len` / 2⌉ links.
///
/// The chain is acyclic: `head.prev` and `tail.next` are always absent.
/// Each node is owned through its predecessor's forward link (the head
/// through the container); the backward link is a non-owning position
/// reference used only for *O*(1) predecessor access.
///
/// On top of the positional operations the container exposes the deque
/// access families of the front/back ends: a throwing family
/// ([`remove_first`], [`first`], ...) that fails with
/// [`Error::EmptyContainer`], and a peek/poll family ([`pop_front`],
/// [`peek_front`], ...) that returns `None`. Stack (`push`/`pop`)
/// and queue (`offer`/`poll`) aliases sit over the same primitives.
///
/// Structural mutations bump a modification stamp exactly as in
/// [`ArraySeq`](crate::ArraySeq); cursor and range handles fail fast when
/// it diverges.
///
/// # Examples
///
/// ```
/// use stamplist::LinkedSeq;
/// use std::iter::FromIterator;
///
/// let mut seq = LinkedSeq::from_iter([2, 3]);
/// seq.push_front(1);
/// seq.push_back(4);
/// assert_eq!(seq.to_vec(), vec![1, 2, 3, 4]);
///
/// assert_eq!(seq.pop_front(), Some(1));
/// assert_eq!(seq.remove_at(1), Ok(3));
/// assert_eq!(seq.to_vec(), vec![2, 4]);
/// ```
///
/// [`remove_first`]: LinkedSeq::remove_first
/// [`first`]: LinkedSeq::first
/// [`pop_front`]: LinkedSeq::pop_front
/// [`peek_front`]: LinkedSeq::peek_front
pub struct LinkedSeq<T> {
    head: Option<NonNull<Node<T>>>,
    tail: Option<NonNull<Node<T>>>,
    len: usize,
    stamp: Stamp,
    _marker: PhantomData<Box<Node<T>>>,
}

pub(crate) struct Node<T> {
    pub(crate) next: Option<NonNull<Node<T>>>,
    pub(crate) prev: Option<NonNull<Node<T>>>,
    pub(crate) element: T,
}

impl<T> Node<T> {
    /// Create a detached, heap-allocated node with no links.
    pub(crate) fn new_detached(element: T) -> NonNull<Node<T>> {
        NonNull::from(Box::leak(Box::new(Node {
            next: None,
            prev: None,
            element,
        })))
    }
}

/// A chain fragment detached from any container, used for bulk splicing.
///
/// While detached, `front.prev` and `back.next` are absent and the
/// fragment owns its nodes.
pub(crate) struct DetachedChain<T> {
    front: NonNull<Node<T>>,
    back: NonNull<Node<T>>,
    len: usize,
}

impl<T> DetachedChain<T> {
    /// Thread an input sequence into a detached chain, or `None` for an
    /// empty input. Each link costs *O*(1).
    fn collect<I: IntoIterator<Item = T>>(items: I) -> Option<Self> {
        let mut iter = items.into_iter();
        let front = Node::new_detached(iter.next()?);
        let mut chain = DetachedChain {
            front,
            back: front,
            len: 1,
        };
        for item in iter {
            let node = Node::new_detached(item);
            // SAFETY: `back` and `node` are live detached nodes owned here.
            unsafe {
                (*node.as_ptr()).prev = Some(chain.back);
                (*chain.back.as_ptr()).next = Some(node);
            }
            chain.back = node;
            chain.len += 1;
        }
        Some(chain)
    }
}

// Private link maintenance.
impl<T> LinkedSeq<T> {
    pub(crate) fn head_node(&self) -> Option<NonNull<Node<T>>> {
        self.head
    }

    pub(crate) fn tail_node(&self) -> Option<NonNull<Node<T>>> {
        self.tail
    }

    pub(crate) fn stamp(&self) -> Stamp {
        self.stamp
    }

    pub(crate) fn guard(&self, captured: Stamp) -> Result<()> {
        self.stamp.guard(captured)
    }

    /// Attach a detached `node` between `prev` and `next`, either of which
    /// may be absent to denote the container boundary.
    ///
    /// It is unsafe because it does not check that `prev` and `next` are
    /// adjacent links of this container; violating that leaves the chain
    /// ill-formed.
    pub(crate) unsafe fn attach_node(
        &mut self,
        prev: Option<NonNull<Node<T>>>,
        next: Option<NonNull<Node<T>>>,
        node: NonNull<Node<T>>,
    ) {
        (*node.as_ptr()).prev = prev;
        (*node.as_ptr()).next = next;
        match prev {
            Some(prev) => (*prev.as_ptr()).next = Some(node),
            None => self.head = Some(node),
        }
        match next {
            Some(next) => (*next.as_ptr()).prev = Some(node),
            None => self.tail = Some(node),
        }
        self.len += 1;
    }

    /// Detach `node` from the chain, reclaiming ownership of its
    /// allocation.
    ///
    /// It is unsafe because it does not check that `node` belongs to this
    /// container; detaching a foreign node leaves both chains ill-formed.
    pub(crate) unsafe fn detach_node(&mut self, node: NonNull<Node<T>>) -> Box<Node<T>> {
        let node = Box::from_raw(node.as_ptr());
        match node.prev {
            Some(prev) => (*prev.as_ptr()).next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => (*next.as_ptr()).prev = node.prev,
            None => self.tail = node.prev,
        }
        self.len -= 1;
        node
    }

    /// Attach a whole detached chain between `prev` and `next` with
    /// exactly two boundary relinks.
    unsafe fn attach_chain(
        &mut self,
        prev: Option<NonNull<Node<T>>>,
        next: Option<NonNull<Node<T>>>,
        chain: DetachedChain<T>,
    ) {
        (*chain.front.as_ptr()).prev = prev;
        (*chain.back.as_ptr()).next = next;
        match prev {
            Some(prev) => (*prev.as_ptr()).next = Some(chain.front),
            None => self.head = Some(chain.front),
        }
        match next {
            Some(next) => (*next.as_ptr()).prev = Some(chain.back),
            None => self.tail = Some(chain.back),
        }
        self.len += chain.len;
    }

    /// Detach `node` through a handle, bumping the stamp.
    ///
    /// Unsafe for the same reason as [`detach_node`](LinkedSeq::detach_node).
    pub(crate) unsafe fn unlink_through_handle(&mut self, node: NonNull<Node<T>>) -> T {
        let node = self.detach_node(node);
        self.stamp.bump();
        node.element
    }

    /// Attach `node` through a handle, bumping the stamp.
    ///
    /// Unsafe for the same reason as [`attach_node`](LinkedSeq::attach_node).
    pub(crate) unsafe fn splice_through_handle(
        &mut self,
        prev: Option<NonNull<Node<T>>>,
        next: Option<NonNull<Node<T>>>,
        node: NonNull<Node<T>>,
    ) {
        self.attach_node(prev, next, node);
        self.stamp.bump();
    }

    /// Resolve an index to its node, returning the number of links
    /// followed. Walks forward from the head when `index < len / 2`, else
    /// backward from the tail, so the count never exceeds ⌈`len` / 2⌉.
    ///
    /// The caller must have checked `index < len`.
    pub(crate) fn node_at_counted(&self, index: usize) -> (NonNull<Node<T>>, usize) {
        debug_assert!(index < self.len);
        if index < self.len / 2 {
            let mut node = self.head.expect("index in bounds implies a head node");
            for _ in 0..index {
                // SAFETY: `index < len` bounds the walk within the chain.
                node = unsafe { node.as_ref().next.expect("chain shorter than len") };
            }
            (node, index)
        } else {
            let mut node = self.tail.expect("index in bounds implies a tail node");
            let steps = self.len - 1 - index;
            for _ in 0..steps {
                // SAFETY: as above, walking backward.
                node = unsafe { node.as_ref().prev.expect("chain shorter than len") };
            }
            (node, steps)
        }
    }

    pub(crate) fn node_at(&self, index: usize) -> NonNull<Node<T>> {
        self.node_at_counted(index).0
    }

    fn bad_index(&self, index: usize) -> Error {
        Error::IndexOutOfRange {
            index,
            len: self.len,
        }
    }
}

impl<T> LinkedSeq<T> {
    /// Create an empty `LinkedSeq`.
    #[inline]
    pub fn new() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
            stamp: Stamp::fresh(),
            _marker: PhantomData,
        }
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the container holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Add an element at the front.
    ///
    /// # Complexity
    ///
    /// *O*(1).
    pub fn push_front(&mut self, value: T) {
        let node = Node::new_detached(value);
        // SAFETY: the boundary and the old head are adjacent by definition.
        unsafe { self.attach_node(None, self.head, node) };
        self.stamp.bump();
    }

    /// Add an element at the back.
    ///
    /// # Complexity
    ///
    /// *O*(1).
    pub fn push_back(&mut self, value: T) {
        let node = Node::new_detached(value);
        // SAFETY: the old tail and the boundary are adjacent by definition.
        unsafe { self.attach_node(self.tail, None, node) };
        self.stamp.bump();
    }

    /// Remove and return the first element, or `None` when empty.
    pub fn pop_front(&mut self) -> Option<T> {
        let head = self.head?;
        // SAFETY: the head is a live node owned by this container.
        let node = unsafe { self.detach_node(head) };
        self.stamp.bump();
        Some(node.element)
    }

    /// Remove and return the last element, or `None` when empty.
    pub fn pop_back(&mut self) -> Option<T> {
        let tail = self.tail?;
        // SAFETY: the tail is a live node owned by this container.
        let node = unsafe { self.detach_node(tail) };
        self.stamp.bump();
        Some(node.element)
    }

    /// Reference to the first element, or `None` when empty.
    #[inline]
    pub fn peek_front(&self) -> Option<&T> {
        // SAFETY: the head is live while the container is.
        self.head.map(|node| unsafe { &(*node.as_ptr()).element })
    }

    /// Mutable reference to the first element, or `None` when empty.
    #[inline]
    pub fn peek_front_mut(&mut self) -> Option<&mut T> {
        // SAFETY: exclusive through `&mut self`.
        self.head.map(|node| unsafe { &mut (*node.as_ptr()).element })
    }

    /// Reference to the last element, or `None` when empty.
    #[inline]
    pub fn peek_back(&self) -> Option<&T> {
        // SAFETY: the tail is live while the container is.
        self.tail.map(|node| unsafe { &(*node.as_ptr()).element })
    }

    /// Mutable reference to the last element, or `None` when empty.
    #[inline]
    pub fn peek_back_mut(&mut self) -> Option<&mut T> {
        // SAFETY: exclusive through `&mut self`.
        self.tail.map(|node| unsafe { &mut (*node.as_ptr()).element })
    }

    /// Remove and return the first element.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] when empty; [`pop_front`] is the
    /// non-failing counterpart.
    ///
    /// [`pop_front`]: LinkedSeq::pop_front
    pub fn remove_first(&mut self) -> Result<T> {
        self.pop_front().ok_or(Error::EmptyContainer)
    }

    /// Remove and return the last element.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] when empty.
    pub fn remove_last(&mut self) -> Result<T> {
        self.pop_back().ok_or(Error::EmptyContainer)
    }

    /// Reference to the first element.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] when empty.
    pub fn first(&self) -> Result<&T> {
        self.peek_front().ok_or(Error::EmptyContainer)
    }

    /// Reference to the last element.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] when empty.
    pub fn last(&self) -> Result<&T> {
        self.peek_back().ok_or(Error::EmptyContainer)
    }

    /// Stack alias: push onto the front.
    #[inline]
    pub fn push(&mut self, value: T) {
        self.push_front(value);
    }

    /// Stack alias: pop from the front.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] when empty.
    ///
    /// # Examples
    /// ```
    /// use stamplist::LinkedSeq;
    ///
    /// let mut stack = LinkedSeq::new();
    /// stack.push(1);
    /// stack.push(2);
    /// assert_eq!(stack.pop(), Ok(2));
    /// assert_eq!(stack.pop(), Ok(1));
    /// assert!(stack.pop().is_err());
    /// ```
    pub fn pop(&mut self) -> Result<T> {
        self.remove_first()
    }

    /// Queue alias: enqueue at the back.
    #[inline]
    pub fn offer(&mut self, value: T) {
        self.push_back(value);
    }

    /// Queue alias: dequeue from the front, `None` when empty.
    ///
    /// # Examples
    /// ```
    /// use stamplist::LinkedSeq;
    ///
    /// let mut queue = LinkedSeq::new();
    /// queue.offer('a');
    /// queue.offer('b');
    /// assert_eq!(queue.poll(), Some('a'));
    /// assert_eq!(queue.poll(), Some('b'));
    /// assert_eq!(queue.poll(), None);
    /// ```
    #[inline]
    pub fn poll(&mut self) -> Option<T> {
        self.pop_front()
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Complexity
    ///
    /// *O*(min(`index`, `len` − `index`)).
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn get(&self, index: usize) -> Result<&T> {
        if index >= self.len {
            return Err(self.bad_index(index));
        }
        let node = self.node_at(index);
        // SAFETY: the node was just resolved within this container.
        Ok(unsafe { &(*node.as_ptr()).element })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        if index >= self.len {
            return Err(self.bad_index(index));
        }
        let node = self.node_at(index);
        // SAFETY: exclusive through `&mut self`.
        Ok(unsafe { &mut (*node.as_ptr()).element })
    }

    /// Replace the element at `index`, returning the previous value. Pure
    /// value replacement; no stamp moves.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        if index >= self.len {
            return Err(self.bad_index(index));
        }
        let node = self.node_at(index);
        // SAFETY: exclusive through `&mut self`.
        Ok(unsafe { std::mem::replace(&mut (*node.as_ptr()).element, value) })
    }

    /// Insert `value` before the element at `index` (at the back when
    /// `index == len`), splicing two boundary links.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index > len`.
    ///
    /// # Examples
    /// ```
    /// use stamplist::LinkedSeq;
    /// use std::iter::FromIterator;
    ///
    /// let mut seq = LinkedSeq::from_iter([1, 3]);
    /// seq.insert(1, 2).unwrap();
    /// assert_eq!(seq.to_vec(), vec![1, 2, 3]);
    /// ```
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        if index > self.len {
            return Err(self.bad_index(index));
        }
        if index == self.len {
            self.push_back(value);
            return Ok(());
        }
        let next = self.node_at(index);
        // SAFETY: `next.prev` and `next` are adjacent links of this chain.
        let prev = unsafe { next.as_ref().prev };
        let node = Node::new_detached(value);
        unsafe { self.attach_node(prev, Some(next), node) };
        self.stamp.bump();
        Ok(())
    }

    /// Remove and return the element at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        if index >= self.len {
            return Err(self.bad_index(index));
        }
        let node = self.node_at(index);
        // SAFETY: the node was just resolved within this container.
        let node = unsafe { self.detach_node(node) };
        self.stamp.bump();
        Ok(node.element)
    }

    /// Insert every element of `items` before the element at `index`,
    /// preserving their order.
    ///
    /// The splice point is located once; each new node is threaded in
    /// *O*(1) and the boundary links are re-attached at the end, avoiding
    /// any per-element shifting.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index > len`.
    ///
    /// # Examples
    /// ```
    /// use stamplist::LinkedSeq;
    /// use std::iter::FromIterator;
    ///
    /// let mut seq = LinkedSeq::from_iter([1, 5]);
    /// seq.insert_all(1, [2, 3, 4]).unwrap();
    /// assert_eq!(seq.to_vec(), vec![1, 2, 3, 4, 5]);
    /// ```
    pub fn insert_all<I>(&mut self, index: usize, items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        if index > self.len {
            return Err(self.bad_index(index));
        }
        let next = if index == self.len {
            None
        } else {
            Some(self.node_at(index))
        };
        let prev = match next {
            // SAFETY: `next` is a live node of this chain.
            Some(next) => unsafe { next.as_ref().prev },
            None => self.tail,
        };
        // An empty batch splices nothing and is not structural.
        if let Some(chain) = DetachedChain::collect(items) {
            // SAFETY: `prev` and `next` are adjacent links of this chain.
            unsafe { self.attach_chain(prev, next, chain) };
            self.stamp.bump();
        }
        Ok(())
    }

    /// Remove all elements. Idempotent; always a structural mutation.
    ///
    /// # Complexity
    ///
    /// *O*(*n*).
    pub fn clear(&mut self) {
        let mut next = self.head;
        while let Some(node) = next {
            // SAFETY: walking the owning links; every node is reclaimed
            // exactly once.
            let node = unsafe { Box::from_raw(node.as_ptr()) };
            next = node.next;
        }
        self.head = None;
        self.tail = None;
        self.len = 0;
        self.stamp.bump();
    }

    /// Copy the current elements into a new `Vec`, in order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Fill `dst` with a snapshot of the current elements, reusing its
    /// buffer when the capacity suffices. See
    /// [`ArraySeq::snapshot_into`](crate::ArraySeq::snapshot_into).
    pub fn snapshot_into(&self, dst: &mut Vec<T>)
    where
        T: Clone,
    {
        dst.clear();
        dst.extend(self.iter().cloned());
    }

    /// Provides a forward iterator. Double-ended, so descending iteration
    /// is `seq.iter().rev()`.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Provides a forward iterator with mutable references. Value
    /// mutation only; the chain cannot be restructured through it.
    ///
    /// The exclusive borrow makes structural interference a compile
    /// error, with no stamp check needed:
    ///
    /// ```compile_fail
    /// use stamplist::LinkedSeq;
    /// use std::iter::FromIterator;
    ///
    /// let mut seq = LinkedSeq::from_iter([1, 2, 3]);
    /// let iter = seq.iter_mut();
    /// seq.push_back(4); // cannot borrow `seq` as mutable twice
    /// for n in iter {
    ///     *n += 1;
    /// }
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    /// Provides a fail-fast cursor positioned before the first element.
    /// See [`LinkedCursor`].
    pub fn cursor(&self) -> LinkedCursor<T> {
        LinkedCursor::new(self.head, 0, self.stamp)
    }

    /// Provides a fail-fast cursor whose first `next` yields the element
    /// at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index > len`.
    pub fn cursor_at(&self, index: usize) -> Result<LinkedCursor<T>> {
        if index > self.len {
            return Err(self.bad_index(index));
        }
        let next = if index == self.len {
            None
        } else {
            Some(self.node_at(index))
        };
        Ok(LinkedCursor::new(next, index, self.stamp))
    }

    /// Provides a lazily bound, batch-splitting range enumerator. See
    /// [`LinkedRange`].
    pub fn range(&self) -> LinkedRange<T> {
        LinkedRange::unbound()
    }
}

impl<T: Debug> Debug for LinkedSeq<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for LinkedSeq<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for LinkedSeq<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

unsafe impl<T: Send> Send for LinkedSeq<T> {}

unsafe impl<T: Sync> Sync for LinkedSeq<T> {}

// Ensure that `LinkedSeq` and its read-only iterator are covariant in
// their type parameters.
#[allow(dead_code)]
fn assert_covariance() {
    fn a<'a>(x: LinkedSeq<&'static str>) -> LinkedSeq<&'a str> {
        x
    }
    fn b<'i, 'a>(x: Iter<'i, &'static str>) -> Iter<'i, &'a str> {
        x
    }
}

#[cfg(test)]
mod tests {
    use super::LinkedSeq;
    use crate::Error;
    use std::cell::RefCell;
    use std::iter::FromIterator;

    #[test]
    fn push_and_pop_both_ends() {
        let mut seq = LinkedSeq::new();
        assert!(seq.is_empty());
        assert_eq!(seq.pop_front(), None);
        assert_eq!(seq.pop_back(), None);

        seq.push_front(2);
        seq.push_front(1);
        seq.push_back(3);
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.peek_front(), Some(&1));
        assert_eq!(seq.peek_back(), Some(&3));

        assert_eq!(seq.pop_front(), Some(1));
        assert_eq!(seq.pop_back(), Some(3));
        assert_eq!(seq.pop_back(), Some(2));
        assert!(seq.is_empty());
    }

    #[test]
    fn throwing_family_fails_on_empty() {
        let mut seq: LinkedSeq<i32> = LinkedSeq::new();
        assert_eq!(seq.remove_first(), Err(Error::EmptyContainer));
        assert_eq!(seq.remove_last(), Err(Error::EmptyContainer));
        assert_eq!(seq.first(), Err(Error::EmptyContainer));
        assert_eq!(seq.last(), Err(Error::EmptyContainer));
        // The peek/poll family never fails.
        assert_eq!(seq.peek_front(), None);
        assert_eq!(seq.poll(), None);
    }

    #[test]
    fn stack_and_queue_aliases() {
        let mut seq = LinkedSeq::new();
        seq.push(1);
        seq.push(2);
        assert_eq!(seq.pop(), Ok(2));

        seq.offer(9);
        assert_eq!(seq.to_vec(), vec![1, 9]);
        assert_eq!(seq.poll(), Some(1));
        assert_eq!(seq.poll(), Some(9));
        assert_eq!(seq.poll(), None);
    }

    #[test]
    fn positional_access_from_both_directions() {
        let mut seq = LinkedSeq::from_iter(0..10);
        for i in 0..10 {
            assert_eq!(seq.get(i), Ok(&i));
        }
        assert_eq!(seq.set(4, 40), Ok(4));
        assert_eq!(seq.get(4), Ok(&40));
        assert_eq!(
            seq.get(10),
            Err(Error::IndexOutOfRange { index: 10, len: 10 })
        );
    }

    #[test]
    fn lookup_walks_at_most_half_the_chain() {
        let seq = LinkedSeq::from_iter(0..11);
        for i in 0..11 {
            let (_, steps) = seq.node_at_counted(i);
            assert!(
                steps <= (seq.len() + 1) / 2,
                "index {} walked {} links",
                i,
                steps
            );
        }
        // Spot-check both directions.
        assert_eq!(seq.node_at_counted(1).1, 1);
        assert_eq!(seq.node_at_counted(9).1, 1);
    }

    #[test]
    fn insert_and_remove_at_index() {
        let mut seq = LinkedSeq::from_iter([1, 2, 4]);
        seq.insert(2, 3).unwrap();
        seq.insert(4, 5).unwrap();
        seq.insert(0, 0).unwrap();
        assert_eq!(seq.to_vec(), vec![0, 1, 2, 3, 4, 5]);

        assert_eq!(seq.remove_at(0), Ok(0));
        assert_eq!(seq.remove_at(4), Ok(5));
        assert_eq!(seq.remove_at(1), Ok(2));
        assert_eq!(seq.to_vec(), vec![1, 3, 4]);
        assert_eq!(
            seq.insert(5, 9),
            Err(Error::IndexOutOfRange { index: 5, len: 3 })
        );
    }

    #[test]
    fn insert_all_threads_a_chain_once() {
        let mut seq = LinkedSeq::from_iter([1, 5]);
        seq.insert_all(1, [2, 3, 4]).unwrap();
        assert_eq!(seq.to_vec(), vec![1, 2, 3, 4, 5]);

        seq.insert_all(0, [0]).unwrap();
        seq.insert_all(7, [6]).unwrap();
        assert_eq!(seq.to_vec(), vec![0, 1, 2, 3, 4, 5, 6]);

        let stamp = seq.stamp();
        seq.insert_all(0, Vec::new()).unwrap();
        assert_eq!(seq.stamp(), stamp, "empty batch splices nothing");
        assert!(matches!(
            seq.insert_all(99, Vec::new()),
            Err(Error::IndexOutOfRange { .. })
        ), "bounds are still checked before the batch is examined");
    }

    #[test]
    fn clear_is_idempotent() {
        let mut seq = LinkedSeq::from_iter(0..5);
        seq.clear();
        seq.clear();
        assert!(seq.is_empty());
        assert_eq!(seq.peek_front(), None);
        assert_eq!(seq.peek_back(), None);
    }

    #[test]
    fn drop_reclaims_every_node_in_order() {
        struct DropChecker<'a>(i32, &'a RefCell<Vec<i32>>);
        impl<'a> Drop for DropChecker<'a> {
            fn drop(&mut self) {
                self.1.borrow_mut().push(self.0);
            }
        }
        let dropped = RefCell::new(Vec::new());
        let mut seq = LinkedSeq::new();
        seq.push_back(DropChecker(1, &dropped));
        seq.push_back(DropChecker(2, &dropped));
        seq.push_back(DropChecker(3, &dropped));
        drop(seq);
        assert_eq!(*dropped.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn set_is_not_structural() {
        let mut seq = LinkedSeq::from_iter([1, 2, 3]);
        let stamp = seq.stamp();
        seq.set(1, 9).unwrap();
        assert_eq!(seq.stamp(), stamp);
        seq.push_back(4);
        assert_ne!(seq.stamp(), stamp);
    }

    #[test]
    fn snapshot_round_trip() {
        let seq = LinkedSeq::from_iter(0..6);
        assert_eq!(seq.to_vec(), (0..6).collect::<Vec<_>>());
        let mut buf = Vec::with_capacity(32);
        seq.snapshot_into(&mut buf);
        assert_eq!(buf, (0..6).collect::<Vec<_>>());
    }
}
