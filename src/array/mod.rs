use std::fmt::{Debug, Formatter};

use crate::array::cursor::ArrayCursor;
use crate::array::split::ArrayRange;
use crate::array::view::ArrayView;
use crate::stamp::Stamp;
use crate::{Error, Result};

pub mod cursor;
pub mod split;
pub mod view;

mod algorithms;

/// Default capacity a freshly constructed, unsized container jumps to on
/// its first insertion.
const DEFAULT_CAPACITY: usize = 10;

/// Maximum number of element slots a container may ever hold. Requests
/// beyond this ceiling fail with [`Error::Overflow`].
pub const MAX_SLOTS: usize = isize::MAX as usize;

/// Distinguishes a freshly constructed, unsized container from one whose
/// (possibly zero) capacity was requested explicitly. Only the former jumps
/// straight to [`DEFAULT_CAPACITY`] on first insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sizing {
    Default,
    Explicit,
}

/// The `ArraySeq` is an ordered, index-addressable container over a
/// contiguous growable slot buffer.
///
/// Elements occupy slots `[0, len)` of a buffer of capacity `cap`; growth
/// happens only when an insertion would push `len` past `cap`, to
/// `max(cap + cap/2, required)`, clamped to [`MAX_SLOTS`]. Insertion and
/// removal at index `i` shift the suffix `[i, len)` by one, so both cost
/// *O*(*len* − *i*); access by index is *O*(1).
///
/// Every structural mutation (anything changing size or topology: insert,
/// remove, clear, splice, sort) bumps an internal modification stamp. Cursor,
/// view, and range handles capture the stamp when created and fail fast with
/// [`Error::ConcurrentStructuralChange`] if the container changed through any
/// other path. Pure value replacement ([`set`]) is not structural and bumps
/// nothing.
///
/// # Examples
///
/// ```
/// use stamplist::ArraySeq;
/// use std::iter::FromIterator;
///
/// let mut seq = ArraySeq::from_iter([1, 2, 3]);
/// seq.insert(1, 9).unwrap();
/// assert_eq!(seq.as_slice(), &[1, 9, 2, 3]);
///
/// assert_eq!(seq.remove(2).unwrap(), 2);
/// assert_eq!(seq.as_slice(), &[1, 9, 3]);
/// ```
///
/// [`set`]: ArraySeq::set
pub struct ArraySeq<T> {
    /// Slot buffer. Growth is always decided by [`ArraySeq::reserve_for`];
    /// the buffer's own amortization policy is never exercised.
    buf: Vec<T>,
    sizing: Sizing,
    stamp: Stamp,
}

// Capacity management.
impl<T> ArraySeq<T> {
    /// Compute the capacity to grow to when `required` slots are needed.
    ///
    /// Growth is by half steps (`cap + cap/2`), never less than `required`,
    /// and a fresh unsized container jumps straight to [`DEFAULT_CAPACITY`].
    /// Requests beyond [`MAX_SLOTS`] fail with [`Error::Overflow`].
    fn grown_capacity(cap: usize, required: usize, sizing: Sizing) -> Result<usize> {
        if required > MAX_SLOTS {
            return Err(Error::Overflow);
        }
        let mut target = cap.saturating_add(cap >> 1);
        if target < required {
            target = required;
        }
        if sizing == Sizing::Default && cap == 0 {
            target = target.max(DEFAULT_CAPACITY);
        }
        Ok(target.min(MAX_SLOTS))
    }

    /// Ensure the buffer can hold `required` elements in total, growing it
    /// by the policy above if necessary.
    fn reserve_for(&mut self, required: usize) -> Result<()> {
        if required <= self.buf.capacity() {
            return Ok(());
        }
        let target = Self::grown_capacity(self.buf.capacity(), required, self.sizing)?;
        self.buf.reserve_exact(target - self.buf.len());
        Ok(())
    }

    fn bad_index(&self, index: usize) -> Error {
        Error::IndexOutOfRange {
            index,
            len: self.buf.len(),
        }
    }

    pub(crate) fn stamp(&self) -> Stamp {
        self.stamp
    }

    pub(crate) fn bump(&mut self) {
        self.stamp.bump();
    }

    /// Check a handle's captured stamp against the live one.
    pub(crate) fn guard(&self, captured: Stamp) -> Result<()> {
        self.stamp.guard(captured)
    }

    pub(crate) fn slice(&self) -> &[T] {
        &self.buf
    }

    pub(crate) fn slice_mut(&mut self) -> &mut [T] {
        &mut self.buf
    }

    /// Direct access to the backing buffer for algorithms that compact or
    /// reorder it wholesale. Callers are responsible for bumping the stamp.
    pub(crate) fn slice_vec(&mut self) -> &mut Vec<T> {
        &mut self.buf
    }

    pub(crate) fn into_vec(self) -> Vec<T> {
        self.buf
    }
}

impl<T> ArraySeq<T> {
    /// Create an empty `ArraySeq`.
    ///
    /// No buffer is allocated until the first insertion, which jumps
    /// straight to a small default capacity.
    ///
    /// # Examples
    /// ```
    /// use stamplist::ArraySeq;
    /// let seq: ArraySeq<u32> = ArraySeq::new();
    /// assert!(seq.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self {
            buf: Vec::new(),
            sizing: Sizing::Default,
            stamp: Stamp::fresh(),
        }
    }

    /// Create an empty `ArraySeq` with an explicitly requested capacity.
    ///
    /// Unlike [`ArraySeq::new`], a container built this way never jumps to
    /// the default capacity: it grows purely by half steps from whatever
    /// was requested (including zero).
    ///
    /// # Examples
    /// ```
    /// use stamplist::ArraySeq;
    /// let seq: ArraySeq<u32> = ArraySeq::with_capacity(32);
    /// assert!(seq.capacity() >= 32);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            sizing: Sizing::Explicit,
            stamp: Stamp::fresh(),
        }
    }

    /// Returns the number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if the container holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the current slot capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Ensure the container can hold at least `capacity` elements without
    /// further growth, using the normal half-step policy.
    ///
    /// A request at or below the current capacity is a no-op. A request
    /// that grows the buffer counts as a structural mutation, since the
    /// backing storage is rebuilt.
    ///
    /// # Errors
    ///
    /// [`Error::Overflow`] if `capacity` exceeds [`MAX_SLOTS`].
    ///
    /// # Examples
    /// ```
    /// use stamplist::ArraySeq;
    ///
    /// let mut seq: ArraySeq<u32> = ArraySeq::with_capacity(100);
    /// seq.reserve(101).unwrap();
    /// assert_eq!(seq.capacity(), 150); // half step beats the request
    /// ```
    pub fn reserve(&mut self, capacity: usize) -> Result<()> {
        if capacity <= self.buf.capacity() {
            return Ok(());
        }
        self.reserve_for(capacity)?;
        self.stamp.bump();
        Ok(())
    }

    /// Shrink the capacity to the current length.
    ///
    /// Also clears the default-capacity jump: after trimming, growth
    /// proceeds purely by half steps, as for an explicitly sized
    /// container. Counts as a structural mutation.
    ///
    /// # Examples
    /// ```
    /// use stamplist::ArraySeq;
    ///
    /// let mut seq = ArraySeq::new();
    /// seq.push(1).unwrap();
    /// seq.trim_to_size();
    /// assert_eq!(seq.capacity(), 1);
    /// ```
    pub fn trim_to_size(&mut self) {
        self.buf.shrink_to_fit();
        self.sizing = Sizing::Explicit;
        self.stamp.bump();
    }

    /// Returns the live elements `[0, len)` as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.buf
    }

    /// Returns the live elements as a mutable slice.
    ///
    /// Mutation through this slice replaces values only; it is not
    /// structural and does not invalidate open handles.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.buf
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index >= len`.
    ///
    /// # Examples
    /// ```
    /// use stamplist::{ArraySeq, Error};
    /// use std::iter::FromIterator;
    ///
    /// let seq = ArraySeq::from_iter([10, 20]);
    /// assert_eq!(seq.get(1), Ok(&20));
    /// assert_eq!(seq.get(2), Err(Error::IndexOutOfRange { index: 2, len: 2 }));
    /// ```
    pub fn get(&self, index: usize) -> Result<&T> {
        self.buf.get(index).ok_or_else(|| self.bad_index(index))
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        if index >= self.buf.len() {
            return Err(self.bad_index(index));
        }
        Ok(&mut self.buf[index])
    }

    /// Replace the element at `index`, returning the previous value.
    ///
    /// This is pure value replacement: it is **not** a structural mutation
    /// and leaves open cursors, views, and ranges valid.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index >= len`.
    ///
    /// # Examples
    /// ```
    /// use stamplist::ArraySeq;
    /// use std::iter::FromIterator;
    ///
    /// let mut seq = ArraySeq::from_iter([1, 2, 3]);
    /// assert_eq!(seq.set(1, 9), Ok(2));
    /// assert_eq!(seq.as_slice(), &[1, 9, 3]);
    /// ```
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        if index >= self.buf.len() {
            return Err(self.bad_index(index));
        }
        Ok(std::mem::replace(&mut self.buf[index], value))
    }

    /// Append an element.
    ///
    /// # Complexity
    ///
    /// Amortized *O*(1); worst case *O*(*len*) when the buffer grows.
    ///
    /// # Errors
    ///
    /// [`Error::Overflow`] if the container is already at [`MAX_SLOTS`].
    ///
    /// # Examples
    /// ```
    /// use stamplist::ArraySeq;
    ///
    /// let mut seq = ArraySeq::new();
    /// seq.push(7).unwrap();
    /// assert_eq!(seq.get(0), Ok(&7));
    /// ```
    pub fn push(&mut self, value: T) -> Result<()> {
        self.reserve_for(self.buf.len() + 1)?;
        self.buf.push(value);
        self.stamp.bump();
        Ok(())
    }

    /// Insert an element at `index`, shifting the suffix `[index, len)`
    /// right by one.
    ///
    /// # Complexity
    ///
    /// *O*(*len* − *index*).
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index > len` (inserting at `len`
    /// appends); [`Error::Overflow`] on capacity exhaustion.
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        if index > self.buf.len() {
            return Err(self.bad_index(index));
        }
        self.reserve_for(self.buf.len() + 1)?;
        self.buf.insert(index, value);
        self.stamp.bump();
        Ok(())
    }

    /// Remove and return the element at `index`, shifting the suffix left
    /// by one. The vacated trailing slot is dropped; no stale value is
    /// retained.
    ///
    /// # Complexity
    ///
    /// *O*(*len* − *index*).
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn remove(&mut self, index: usize) -> Result<T> {
        if index >= self.buf.len() {
            return Err(self.bad_index(index));
        }
        let value = self.buf.remove(index);
        self.stamp.bump();
        Ok(value)
    }

    /// Remove the first element equal to `value`, if any.
    ///
    /// Returns the removed element, or `None` if no element matched. With
    /// `Option`-typed elements an absent value (`None`) is an ordinary
    /// matchable value.
    ///
    /// # Examples
    /// ```
    /// use stamplist::ArraySeq;
    /// use std::iter::FromIterator;
    ///
    /// let mut seq = ArraySeq::from_iter([1, 2, 1]);
    /// assert_eq!(seq.remove_item(&1), Some(1));
    /// assert_eq!(seq.as_slice(), &[2, 1]);
    /// assert_eq!(seq.remove_item(&7), None);
    /// ```
    pub fn remove_item(&mut self, value: &T) -> Option<T>
    where
        T: PartialEq,
    {
        let index = self.index_of(value)?;
        // Index came from a scan of the live range, so it is in bounds.
        self.remove(index).ok()
    }

    /// Remove all elements. Idempotent; always counts as a structural
    /// mutation.
    ///
    /// # Examples
    /// ```
    /// use stamplist::ArraySeq;
    /// use std::iter::FromIterator;
    ///
    /// let mut seq = ArraySeq::from_iter([1, 2]);
    /// seq.clear();
    /// seq.clear();
    /// assert_eq!(seq.len(), 0);
    /// ```
    pub fn clear(&mut self) {
        self.buf.clear();
        self.stamp.bump();
    }

    /// Append every element of `items`.
    ///
    /// # Errors
    ///
    /// [`Error::Overflow`] on capacity exhaustion; nothing is appended in
    /// that case.
    pub fn append_all<I>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        self.insert_all(self.buf.len(), items)
    }

    /// Insert every element of `items` at `index`, preserving their order
    /// and shifting the suffix right once by the batch length.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index > len`; [`Error::Overflow`] on
    /// capacity exhaustion. Nothing is inserted on error.
    ///
    /// # Examples
    /// ```
    /// use stamplist::ArraySeq;
    /// use std::iter::FromIterator;
    ///
    /// let mut seq = ArraySeq::from_iter([1, 5]);
    /// seq.insert_all(1, [2, 3, 4]).unwrap();
    /// assert_eq!(seq.as_slice(), &[1, 2, 3, 4, 5]);
    /// ```
    pub fn insert_all<I>(&mut self, index: usize, items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        if index > self.buf.len() {
            return Err(self.bad_index(index));
        }
        let items: Vec<T> = items.into_iter().collect();
        self.reserve_for(self.buf.len() + items.len())?;
        self.buf.splice(index..index, items);
        // The stamp moves even for an empty batch, like any other insert
        // path that touched the capacity machinery.
        self.stamp.bump();
        Ok(())
    }

    /// Copy the current elements into a new `Vec`, in order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.buf.clone()
    }

    /// Fill `dst` with a snapshot of the current elements.
    ///
    /// `dst` is cleared first; its buffer is reused when its capacity
    /// suffices and reallocated to the correct size otherwise, so a caller
    /// can snapshot repeatedly into one buffer without churn.
    ///
    /// # Examples
    /// ```
    /// use stamplist::ArraySeq;
    /// use std::iter::FromIterator;
    ///
    /// let seq = ArraySeq::from_iter([1, 2, 3]);
    /// let mut buf = Vec::with_capacity(16);
    /// seq.snapshot_into(&mut buf);
    /// assert_eq!(buf, vec![1, 2, 3]);
    /// assert!(buf.capacity() >= 16);
    /// ```
    pub fn snapshot_into(&self, dst: &mut Vec<T>)
    where
        T: Clone,
    {
        dst.clear();
        dst.extend_from_slice(&self.buf);
    }

    /// Provides a forward iterator over the live elements.
    ///
    /// Unlike the cursor, this iterator borrows the container, so the
    /// borrow checker already rules out the structural interference the
    /// stamp protocol detects at runtime:
    ///
    /// ```compile_fail
    /// use stamplist::ArraySeq;
    /// use std::iter::FromIterator;
    ///
    /// let mut seq = ArraySeq::from_iter([1, 2, 3]);
    /// let iter = seq.iter();
    /// seq.push(4).unwrap(); // cannot borrow `seq` as mutable
    /// for n in iter {}
    /// ```
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.buf.iter()
    }

    /// Provides a forward iterator with mutable references.
    ///
    /// Like [`as_mut_slice`](ArraySeq::as_mut_slice), this is value
    /// mutation only and does not invalidate handles.
    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.buf.iter_mut()
    }

    /// Provides a fail-fast cursor positioned before the first element.
    ///
    /// The cursor is a handle: it holds no borrow, and instead receives the
    /// container on every call. See [`ArrayCursor`].
    pub fn cursor(&self) -> ArrayCursor {
        ArrayCursor::new(0, self.stamp)
    }

    /// Provides a fail-fast cursor whose first `next` yields the element at
    /// `index`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index > len` (a cursor at `len` is
    /// valid and positioned after the last element).
    pub fn cursor_at(&self, index: usize) -> Result<ArrayCursor> {
        if index > self.buf.len() {
            return Err(self.bad_index(index));
        }
        Ok(ArrayCursor::new(index, self.stamp))
    }

    /// Provides a window over the half-open range `[from, to)`.
    ///
    /// The view is a handle over this container; see [`ArrayView`].
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `to > len`; [`Error::InvalidArgument`]
    /// if `from > to`.
    ///
    /// # Examples
    /// ```
    /// use stamplist::ArraySeq;
    /// use std::iter::FromIterator;
    ///
    /// let seq = ArraySeq::from_iter([10, 20, 30, 40]);
    /// let view = seq.view(1, 3).unwrap();
    /// assert_eq!(view.as_slice(&seq), Ok(&[20, 30][..]));
    /// ```
    pub fn view(&self, from: usize, to: usize) -> Result<ArrayView> {
        if from > to {
            return Err(Error::InvalidArgument {
                reason: "view range start exceeds its end",
            });
        }
        if to > self.buf.len() {
            return Err(self.bad_index(to));
        }
        Ok(ArrayView::new(from, to - from, self.stamp))
    }

    /// Provides a lazily bounded, recursively splittable range enumerator
    /// over the whole container. See [`ArrayRange`].
    pub fn range(&self) -> ArrayRange {
        ArrayRange::unbound()
    }
}

impl<T: Debug> Debug for ArraySeq<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.buf.iter()).finish()
    }
}

impl<T> Default for ArraySeq<T> {
    fn default() -> Self {
        Self::new()
    }
}
