//! Generation tokens: the bridge between persistent and mutable collections.
//!
//! Every trie and vector node carries the [`Generation`] of the mutable
//! collection that created it. A mutable collection may edit a node in place
//! only when the stamp equals its own live generation; any other node is
//! cloned, restamped and swapped into its parent slot first. Freezing a
//! mutable collection retires its generation, so nothing reachable from a
//! published snapshot is ever written again.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Next unissued generation. Zero is reserved for [`Generation::NONE`].
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// Opaque, comparable ownership stamp.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    /// Stamp of nodes built by persistent operations. Owns nothing.
    pub const NONE: Self = Self(0);

    /// Mints a globally unique generation.
    #[must_use]
    pub fn fresh() -> Self {
        Self(NEXT_GENERATION.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns `true` if a holder of `self` may edit a node stamped `stamp`.
    #[inline]
    #[must_use]
    pub const fn owns(self, stamp: Self) -> bool {
        self.0 != 0 && self.0 == stamp.0
    }
}

impl std::fmt::Debug for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 == 0 {
            f.write_str("Generation(none)")
        } else {
            write!(f, "Generation({})", self.0)
        }
    }
}

/// A node type carrying a generation stamp.
pub trait Stamped: Clone {
    /// Returns the stamp of the node.
    fn generation(&self) -> Generation;

    /// Overwrites the stamp of a freshly cloned node.
    fn restamp(&mut self, generation: Generation);
}

/// Returns a mutable view of the node in `slot`, cloning it first unless
/// `generation` owns it.
///
/// `Arc::make_mut` additionally clones a node that is still shared (for
/// example pinned by a cursor), so an owned stamp alone never lets a write
/// reach another holder.
pub fn edit<T: Stamped>(slot: &mut Arc<T>, generation: Generation) -> &mut T {
    if !generation.owns(slot.generation()) {
        let mut copy = T::clone(slot);
        copy.restamp(generation);
        *slot = Arc::new(copy);
    }
    Arc::make_mut(slot)
}
