//! Error types shared by both containers and all traversal handles.

use thiserror::Error;

/// Errors reported by container operations and traversal handles.
///
/// All errors are local and synchronous; no operation retries or silently
/// recovers. The only documented partial-state exception is filter-based
/// removal (see [`ArraySeq::try_remove_if`]), which guarantees the container
/// is left untouched when the predicate itself fails.
///
/// [`ArraySeq::try_remove_if`]: crate::ArraySeq::try_remove_if
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// An index argument was outside the valid domain for the operation
    /// (`0..len` for reads and removals, `0..=len` for insertions and
    /// cursor creation).
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The container (or view) length at the time of the call.
        len: usize,
    },

    /// An argument other than an index was invalid, e.g. a view range with
    /// `from > to`, or a cursor mutation with no current element.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the argument.
        reason: &'static str,
    },

    /// A throwing accessor (`first`, `remove_last`, `pop`, ...) was called
    /// on an empty linked container. The peek/poll family returns `None`
    /// instead of this error.
    #[error("container is empty")]
    EmptyContainer,

    /// A traversal handle detected that its container was structurally
    /// mutated through another path since the handle captured its stamp.
    ///
    /// This is an advisory, best-effort corruption guard, not an atomicity
    /// guarantee; see the crate-level documentation.
    #[error("container structurally modified during traversal")]
    ConcurrentStructuralChange,

    /// Capacity growth was requested beyond the maximum representable
    /// slot count.
    #[error("capacity overflow: container cannot grow past the maximum slot count")]
    Overflow,
}

/// Convenience alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
