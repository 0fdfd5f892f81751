//! This crate provides ordered, index-addressable sequence containers with
//! a shared fail-fast iteration protocol.
//!
//! Two containers implement the same positional contract over different
//! storage:
//!
//! - [`ArraySeq`], backed by one contiguous growable buffer: *O*(1)
//!   indexed access, amortized *O*(1) append, *O*(*n*) interior insertion
//!   and removal.
//! - [`LinkedSeq`], backed by a doubly linked chain of nodes: *O*(1)
//!   insertion and removal at a known position and at both ends, *O*(*n*)
//!   indexed access.
//!
//! Here is a quick example showing how the containers work.
//!
//! ```
//! use stamplist::{ArraySeq, LinkedSeq};
//! use std::iter::FromIterator;
//!
//! let mut seq = ArraySeq::from_iter([1, 2, 3]);
//! seq.insert(1, 9).unwrap();
//! assert_eq!(seq.as_slice(), &[1, 9, 2, 3]);
//!
//! let mut deque = LinkedSeq::new();
//! deque.push_front(2);
//! deque.push_back(3);
//! deque.push_front(1);
//! assert_eq!(deque.to_vec(), vec![1, 2, 3]);
//! ```
//!
//! # The fail-fast protocol
//!
//! Every container carries a modification stamp: a container identity
//! paired with a version counter that moves on each *structural* mutation
//! (one that changes the length or rebuilds the backing storage). Value
//! replacement through `set` is deliberately not structural.
//!
//! Traversal and view state live in detached **handles**: cursors
//! ([`ArrayCursor`], [`LinkedCursor`]), views ([`ArrayView`]), and
//! splittable ranges ([`ArrayRange`], [`LinkedRange`]). A handle captures
//! the stamp at creation and receives the container explicitly on every
//! call. Holding a handle borrows nothing, so containers stay freely
//! usable between handle calls; in exchange, each handle operation first
//! re-validates its stamp and fails with
//! [`Error::ConcurrentStructuralChange`] instead of continuing a
//! traversal whose ground has shifted:
//!
//! ```
//! use stamplist::{ArraySeq, Error};
//! use std::iter::FromIterator;
//!
//! let mut seq = ArraySeq::from_iter([1, 2, 3]);
//! let mut cursor = seq.cursor();
//! assert_eq!(cursor.next(&seq), Ok(Some(&1)));
//!
//! seq.push(4).unwrap(); // structural, through another path
//! assert_eq!(cursor.next(&seq), Err(Error::ConcurrentStructuralChange));
//! ```
//!
//! Mutating **through** a handle refreshes its captured stamp, so the
//! idiomatic remove-while-traversing loop works without invalidation,
//! while every *other* open handle goes stale, exactly once, at its next
//! use. The identity half of the stamp also catches a handle applied to
//! the wrong container (including a [`Clone`], which gets a fresh
//! identity) as the same error rather than undefined nonsense.
//!
//! Plain borrowing iterators ([`ArraySeq::iter`], [`LinkedSeq::iter`])
//! are also provided; they need no stamp because the borrow checker
//! already rules interference out.
//!
//! # Views
//!
//! [`ArraySeq::view`] carves out an index-translating window whose
//! structural mutations write through to the parent; see [`ArrayView`].
//!
//! # Splittable ranges
//!
//! [`ArrayRange`] bisects contiguous index ranges for divide-and-conquer
//! traversal; [`LinkedRange`] splits off clone-batches ([`BatchRange`])
//! of geometrically growing size, since bisecting a chain by index would
//! cost a walk per split. Both bind their bounds lazily on first use.
//!
//! # Errors
//!
//! Fallible operations return [`Result`] with the crate-wide [`Error`];
//! out-of-range indices, empty-container removals, capacity overflow, and
//! stale handles are all reported as values, never as panics.

#[doc(inline)]
pub use crate::array::cursor::ArrayCursor;
#[doc(inline)]
pub use crate::array::split::ArrayRange;
#[doc(inline)]
pub use crate::array::view::ArrayView;
#[doc(inline)]
pub use crate::array::{ArraySeq, MAX_SLOTS};
#[doc(inline)]
pub use crate::error::{Error, Result};
#[doc(inline)]
pub use crate::linked::cursor::LinkedCursor;
#[doc(inline)]
pub use crate::linked::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use crate::linked::split::{BatchRange, LinkedRange};
#[doc(inline)]
pub use crate::linked::LinkedSeq;

pub mod array;
pub mod error;
pub mod linked;

mod stamp;
