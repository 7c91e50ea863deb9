//! Persistent collections built on CHAMP hash tries and a bit-mapped
//! vector trie.
//!
//! CHAMP (Compressed Hash-Array Mapped Prefix-tree) is a refined HAMT that
//! guarantees **canonical form**: the same set of key-value pairs always
//! produces the same trie structure, regardless of insertion order.
//!
//! # Collections
//!
//! | persistent              | mutable                        | order            |
//! |-------------------------|--------------------------------|------------------|
//! | [`ChampMap`]            | [`MutableChampMap`]            | hash             |
//! | [`ChampSet`]            | [`MutableChampSet`]            | hash             |
//! | [`SequencedChampMap`]   | [`MutableSequencedChampMap`]   | insertion        |
//! | [`SequencedChampSet`]   | [`MutableSequencedChampSet`]   | insertion        |
//! | [`VectorList`]          | [`MutableVectorList`]          | positional       |
//!
//! Persistent collections never change; every update returns a new
//! collection that shares all untouched nodes with the old one. A mutable
//! collection edits the nodes it created itself in place and copies
//! anything else on first touch. `to_mutable` and `to_immutable` switch
//! between the two in O(1):
//!
//! ```
//! use champ_collections::ChampMap;
//!
//! let map: ChampMap<u32, &str> = [(1, "one"), (2, "two")].into_iter().collect();
//! let mut draft = map.to_mutable();
//! draft.insert(3, "three");
//! draft.remove(&1);
//! let next = draft.to_immutable();
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(next.get(&3), Some(&"three"));
//! assert!(!next.contains_key(&1));
//! ```
//!
//! # Key properties
//!
//! - **Canonical form**: same contents = same structure
//! - **Structural sharing**: unchanged subtrees are shared by reference
//! - **Generation-stamped transients**: a node is written in place only by
//!   the mutable collection whose generation stamped it
//! - **Zero `unsafe`**: enforced by `#![forbid(unsafe_code)]`
//!
//! # References
//!
//! - Steindorfer & Vinju, 2015, "Optimizing Hash-Array Mapped Tries
//!   for Fast and Lean Immutable JVM Collections", OOPSLA 2015
//! - Bagwell, 2001, "Ideal Hash Trees"
//! - Bagwell & Rompf, 2011, "RRB-Trees: Efficient Immutable Vectors"

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions, clippy::redundant_pub_crate)]

pub mod error;
pub mod iter;

mod hash;
mod list;
mod map;
mod node;
mod ops;
mod owner;
mod sequenced;
mod sequenced_map;
mod sequenced_set;
#[cfg(feature = "serde")]
mod serde_impl;
mod set;
mod trie;
mod vector;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
pub use iter::{Cursor, Iter, Keys, ModificationCount, Values};
pub use list::{ListCursor, MutableVectorList, VectorList};
pub use map::{ChampMap, MutableChampMap};
pub use sequenced::{SequencedCursor, SequencedIter};
pub use sequenced_map::{MutableSequencedChampMap, SequencedChampMap};
pub use sequenced_set::{MutableSequencedChampSet, SequencedChampSet, SequencedSetIter};
pub use set::{ChampSet, MutableChampSet, SetIter};
pub use vector::Iter as ListIter;
