//! CHAMP trie node types and bitmap helpers.

use std::fmt;
use std::sync::Arc;

use crate::owner::{Generation, Stamped};

/// Bits per trie level (5 → 32-way branching).
pub const BITS_PER_LEVEL: u32 = 5;

/// Maximum bit-shift value (depth 12, last level uses 4 bits).
///
/// Keys whose 64-bit hashes agree on every level below this end up in a
/// [`CollisionNode`].
pub const MAX_SHIFT: u32 = 60;

/// Inline entry storing a key-value pair with its precomputed hash.
#[derive(Clone)]
pub struct Entry<K, V> {
    /// Precomputed 64-bit hash of the key.
    pub hash: u64,
    /// The key.
    pub key: K,
    /// The value.
    pub value: V,
}

/// CHAMP trie node.
///
/// Two variants maintain the canonical form invariant:
/// - [`Bitmap`](Self::Bitmap): bitmap-compressed node at depth `d < D`
/// - [`Collision`](Self::Collision): linear node for full 64-bit hash collisions
#[derive(Clone)]
pub enum Node<K, V> {
    /// Bitmap-compressed inner node.
    Bitmap(BitmapNode<K, V>),
    /// Collision node for keys sharing the same 64-bit hash.
    Collision(CollisionNode<K, V>),
}

/// Bitmap-compressed node.
///
/// Invariants:
/// - `data_map & node_map == 0` (disjoint positions)
/// - `entries.len() == popcount(data_map)`, `children.len() == popcount(node_map)`
/// - a non-root node is never a singleton (one entry, no children)
#[derive(Clone)]
pub struct BitmapNode<K, V> {
    /// Bitmap of positions occupied by inline entries.
    pub data_map: u32,
    /// Bitmap of positions occupied by child subtrees.
    pub node_map: u32,
    /// Inline entries in ascending bit order.
    pub entries: Vec<Entry<K, V>>,
    /// Child subtrees in ascending bit order.
    pub children: Vec<Arc<Node<K, V>>>,
    /// Owner stamp.
    pub generation: Generation,
}

/// Linear node for keys whose full hashes are identical.
///
/// Invariant: `entries.len() >= 2` once published.
#[derive(Clone)]
pub struct CollisionNode<K, V> {
    /// The shared 64-bit hash value.
    pub hash: u64,
    /// Colliding entries in insertion order.
    pub entries: Vec<Entry<K, V>>,
    /// Owner stamp.
    pub generation: Generation,
}

// ---------------------------------------------------------------------------
// Bitmap helpers
// ---------------------------------------------------------------------------

/// Extracts the 5-bit hash fragment at the given bit-shift depth.
#[inline]
#[must_use]
pub const fn fragment(hash: u64, shift: u32) -> u32 {
    ((hash >> shift) & 0x1F) as u32
}

/// Returns the single-bit mask for the given fragment (0..31).
#[inline]
#[must_use]
pub const fn mask(frag: u32) -> u32 {
    1 << frag
}

/// Returns the compact index of `bit` within `bitmap`.
///
/// Counts the number of set bits below `bit`.
#[inline]
#[must_use]
pub const fn index(bitmap: u32, bit: u32) -> usize {
    (bitmap & (bit - 1)).count_ones() as usize
}

// ---------------------------------------------------------------------------
// Construction & accessors
// ---------------------------------------------------------------------------

impl<K, V> Node<K, V> {
    /// Creates an empty bitmap node, the root of an empty trie.
    #[must_use]
    pub const fn empty(generation: Generation) -> Self {
        Self::Bitmap(BitmapNode {
            data_map: 0,
            node_map: 0,
            entries: Vec::new(),
            children: Vec::new(),
            generation,
        })
    }

    /// Returns the inline entries of this node.
    #[must_use]
    pub fn entries(&self) -> &[Entry<K, V>] {
        match self {
            Self::Bitmap(b) => &b.entries,
            Self::Collision(c) => &c.entries,
        }
    }

    /// Returns the child subtrees (always empty for collision nodes).
    #[must_use]
    pub fn children(&self) -> &[Arc<Self>] {
        match self {
            Self::Bitmap(b) => &b.children,
            Self::Collision(_) => &[],
        }
    }

    /// Removes and returns the only entry of a node that holds exactly one
    /// entry and no subtrees. Leaves other nodes untouched.
    pub fn take_singleton(&mut self) -> Option<Entry<K, V>> {
        match self {
            Self::Bitmap(b) if b.entries.len() == 1 && b.children.is_empty() => {
                b.data_map = 0;
                b.entries.pop()
            }
            Self::Collision(c) if c.entries.len() == 1 => c.entries.pop(),
            _ => None,
        }
    }
}

impl<K: Clone, V: Clone> Stamped for Node<K, V> {
    fn generation(&self) -> Generation {
        match self {
            Self::Bitmap(b) => b.generation,
            Self::Collision(c) => c.generation,
        }
    }

    fn restamp(&mut self, generation: Generation) {
        match self {
            Self::Bitmap(b) => b.generation = generation,
            Self::Collision(c) => c.generation = generation,
        }
    }
}

impl<K, V> fmt::Debug for Node<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bitmap(b) => f
                .debug_struct("Bitmap")
                .field("data_map", &format_args!("{:#034b}", b.data_map))
                .field("node_map", &format_args!("{:#034b}", b.node_map))
                .field("generation", &b.generation)
                .finish_non_exhaustive(),
            Self::Collision(c) => f
                .debug_struct("Collision")
                .field("hash", &c.hash)
                .field("entries_len", &c.entries.len())
                .field("generation", &c.generation)
                .finish_non_exhaustive(),
        }
    }
}
