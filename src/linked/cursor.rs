use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::linked::{LinkedSeq, Node};
use crate::stamp::Stamp;
use crate::{Error, Result};

/// A fail-fast bidirectional cursor over a [`LinkedSeq`].
///
/// The contract mirrors [`ArrayCursor`](crate::ArrayCursor): the cursor is
/// a handle carrying a captured stamp, receives the container on every
/// call, and fails with [`Error::ConcurrentStructuralChange`] when the
/// stamps diverge. Here the stamp is also the safety gate for the cached
/// node pointer: it is dereferenced only after the stamp (with its
/// container identity) has matched, which proves no node was attached,
/// detached, or freed since it was cached.
///
/// Unlike the array cursor, every step is *O*(1): the cursor keeps a
/// pointer to the node its position precedes (absent at the end) instead
/// of re-walking the chain.
///
/// # Examples
///
/// ```
/// use stamplist::LinkedSeq;
/// use std::iter::FromIterator;
///
/// let mut seq = LinkedSeq::from_iter([1, 2, 3, 4]);
/// let mut cursor = seq.cursor();
/// while let Some(n) = cursor.next(&seq).unwrap() {
///     if n % 2 == 0 {
///         cursor.remove(&mut seq).unwrap();
///     }
/// }
/// assert_eq!(seq.to_vec(), vec![1, 3]);
/// ```
#[derive(Debug)]
pub struct LinkedCursor<T> {
    /// The node after the cursor position, absent at the end.
    next: Option<NonNull<Node<T>>>,
    /// Position in `0..=len`.
    index: usize,
    /// The node most recently yielded by `next`/`prev`, if it has not
    /// been removed or displaced by a cursor insertion since.
    last: Option<NonNull<Node<T>>>,
    stamp: Stamp,
    _marker: PhantomData<*const T>,
}

impl<T> LinkedCursor<T> {
    pub(crate) fn new(next: Option<NonNull<Node<T>>>, index: usize, stamp: Stamp) -> Self {
        Self {
            next,
            index,
            last: None,
            stamp,
            _marker: PhantomData,
        }
    }

    /// Returns `true` if a forward step would yield an element.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Returns `true` if a backward step would yield an element.
    pub fn has_prev(&self) -> bool {
        self.index > 0
    }

    /// The index a forward step would yield (the container length when at
    /// the end).
    pub fn next_index(&self) -> usize {
        self.index
    }

    /// The index a backward step would yield, or `None` at the front.
    pub fn prev_index(&self) -> Option<usize> {
        self.index.checked_sub(1)
    }

    /// Step forward, yielding the next element, or `Ok(None)` past the
    /// end.
    ///
    /// # Errors
    ///
    /// [`Error::ConcurrentStructuralChange`] if the container was
    /// structurally mutated since this cursor's stamp was captured.
    pub fn next<'a>(&mut self, seq: &'a LinkedSeq<T>) -> Result<Option<&'a T>> {
        seq.guard(self.stamp)?;
        let node = match self.next {
            Some(node) => node,
            None => return Ok(None),
        };
        self.last = Some(node);
        // SAFETY: the stamp matched, so the cached node is still a live
        // node of `seq`.
        let node_ref = unsafe { &*node.as_ptr() };
        self.next = node_ref.next;
        self.index += 1;
        Ok(Some(&node_ref.element))
    }

    /// Step backward, yielding the previous element, or `Ok(None)` before
    /// the first.
    ///
    /// # Errors
    ///
    /// [`Error::ConcurrentStructuralChange`] on stamp divergence.
    pub fn prev<'a>(&mut self, seq: &'a LinkedSeq<T>) -> Result<Option<&'a T>> {
        seq.guard(self.stamp)?;
        let node = match self.next {
            // SAFETY: the stamp matched; `next` is a live node of `seq`.
            Some(next) => unsafe { next.as_ref().prev },
            None => seq.tail_node(),
        };
        let node = match node {
            Some(node) => node,
            None => return Ok(None),
        };
        self.next = Some(node);
        self.index -= 1;
        self.last = Some(node);
        // SAFETY: as above.
        Ok(Some(unsafe { &(*node.as_ptr()).element }))
    }

    /// Remove the element most recently yielded by `next` or `prev`,
    /// returning it. The captured stamp is refreshed, so the cursor
    /// remains usable with nothing skipped or repeated.
    ///
    /// # Errors
    ///
    /// [`Error::ConcurrentStructuralChange`] on stamp divergence;
    /// [`Error::InvalidArgument`] if nothing was yielded since the last
    /// cursor mutation.
    pub fn remove(&mut self, seq: &mut LinkedSeq<T>) -> Result<T> {
        seq.guard(self.stamp)?;
        let node = self.last.take().ok_or(Error::InvalidArgument {
            reason: "cursor has no current element",
        })?;
        if self.next == Some(node) {
            // Yielded by `prev`: the position moves to the successor.
            // SAFETY: the stamp matched; `node` is a live node of `seq`.
            self.next = unsafe { node.as_ref().next };
        } else {
            // Yielded by `next`: the position index shifts back with it.
            self.index -= 1;
        }
        // SAFETY: as above; `node` still belongs to `seq`.
        let value = unsafe { seq.unlink_through_handle(node) };
        self.stamp = seq.stamp();
        Ok(value)
    }

    /// Insert `value` at the cursor position; the cursor ends up after
    /// the new element.
    ///
    /// # Errors
    ///
    /// [`Error::ConcurrentStructuralChange`] on stamp divergence.
    pub fn insert(&mut self, seq: &mut LinkedSeq<T>, value: T) -> Result<()> {
        seq.guard(self.stamp)?;
        let prev = match self.next {
            // SAFETY: the stamp matched; `next` is a live node of `seq`.
            Some(next) => unsafe { next.as_ref().prev },
            None => seq.tail_node(),
        };
        let node = Node::new_detached(value);
        // SAFETY: `prev` and `self.next` are adjacent links of `seq`.
        unsafe { seq.splice_through_handle(prev, self.next, node) };
        self.index += 1;
        self.last = None;
        self.stamp = seq.stamp();
        Ok(())
    }

    /// Replace the element most recently yielded by `next` or `prev`,
    /// returning the previous value. Pure value replacement; no stamp
    /// moves, and other open handles stay valid.
    ///
    /// # Errors
    ///
    /// [`Error::ConcurrentStructuralChange`] on stamp divergence;
    /// [`Error::InvalidArgument`] if nothing was yielded since the last
    /// cursor mutation.
    pub fn set(&mut self, seq: &mut LinkedSeq<T>, value: T) -> Result<T> {
        seq.guard(self.stamp)?;
        let node = self.last.ok_or(Error::InvalidArgument {
            reason: "cursor has no current element",
        })?;
        // SAFETY: the stamp matched and `seq` is borrowed exclusively.
        Ok(unsafe { std::mem::replace(&mut (*node.as_ptr()).element, value) })
    }
}
