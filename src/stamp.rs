//! Modification stamps: the foundation of the fail-fast traversal protocol.
//!
//! Every container embeds a [`Stamp`]; every cursor, view, or range handle
//! captures a copy of it at creation. Structural mutations (insert, remove,
//! clear, splice, sort) bump the container's stamp, so a handle can compare
//! its captured copy against the live one and refuse to proceed after the
//! container changed underneath it.
//!
//! A stamp is a pair of a per-container identity and a version counter. The
//! identity is drawn from a process-global monotonic counter and is never
//! reused, so a handle presented with the *wrong* container fails the same
//! comparison as a handle whose container was mutated. For the linked
//! container this is also the gate that makes cached node pointers safe to
//! dereference: a matching stamp proves the exact container the pointer was
//! taken from has seen no structural change.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_CONTAINER_ID: AtomicU64 = AtomicU64::new(0);

/// A container's modification stamp: `{identity, version}`.
///
/// `Stamp` values are opaque to callers; they only travel between a
/// container and its traversal handles. Comparing two stamps for equality
/// answers "is this the same container, in the same structural state?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stamp {
    id: u64,
    version: u64,
}

impl Stamp {
    /// Create a stamp with a fresh, never-reused container identity.
    pub(crate) fn fresh() -> Self {
        Stamp {
            id: NEXT_CONTAINER_ID.fetch_add(1, Ordering::Relaxed),
            version: 0,
        }
    }

    /// Record a structural mutation.
    pub(crate) fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    /// Check a handle's captured stamp against this live stamp.
    pub(crate) fn guard(&self, captured: Stamp) -> crate::Result<()> {
        if *self == captured {
            Ok(())
        } else {
            Err(crate::Error::ConcurrentStructuralChange)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Stamp;
    use crate::Error;

    #[test]
    fn fresh_stamps_are_distinct() {
        let a = Stamp::fresh();
        let b = Stamp::fresh();
        assert_ne!(a, b);
        assert!(a.guard(b).is_err());
    }

    #[test]
    fn bump_invalidates_captures() {
        let mut live = Stamp::fresh();
        let captured = live;
        assert_eq!(live.guard(captured), Ok(()));

        live.bump();
        assert_eq!(live.guard(captured), Err(Error::ConcurrentStructuralChange));
    }
}
