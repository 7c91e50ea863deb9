mod basic;
mod canonical;
mod completeness;
mod cursor;
mod errors;
mod sequenced;

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use crate::node::{self, Node};
use crate::trie::Trie;

/// Structural fingerprint of a trie node, used to compare trie shapes.
///
/// Collision node entries are sorted by key, since their order follows
/// insertion.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum Shape<K> {
    Bitmap {
        data_map: u32,
        node_map: u32,
        keys: Vec<K>,
        children: Vec<Self>,
    },
    Collision {
        hash: u64,
        keys: Vec<K>,
    },
}

pub(super) fn shape<K: Clone + Ord, V>(trie: &Trie<K, V>) -> Shape<K> {
    shape_of(trie.root())
}

fn shape_of<K: Clone + Ord, V>(node: &Node<K, V>) -> Shape<K> {
    match node {
        Node::Bitmap(b) => Shape::Bitmap {
            data_map: b.data_map,
            node_map: b.node_map,
            keys: b.entries.iter().map(|e| e.key.clone()).collect(),
            children: b.children.iter().map(|c| shape_of(c)).collect(),
        },
        Node::Collision(c) => {
            let mut keys: Vec<K> = c.entries.iter().map(|e| e.key.clone()).collect();
            keys.sort();
            Shape::Collision { hash: c.hash, keys }
        }
    }
}

/// Walks the whole trie and panics on any broken structural invariant.
pub(super) fn assert_invariants<K: Hash + Eq + Debug, V>(trie: &Trie<K, V>) {
    let mut seen = HashSet::new();
    let counted = check_node(trie.root(), 0, 0, true, &mut seen);
    assert_eq!(counted, trie.len(), "size does not match entry count");
}

fn check_node<'a, K: Hash + Eq + Debug, V>(
    node: &'a Node<K, V>,
    shift: u32,
    prefix: u64,
    is_root: bool,
    seen: &mut HashSet<&'a K>,
) -> usize {
    let low_bits = |hash: u64| {
        if shift == 0 {
            0
        } else {
            hash & ((1_u64 << shift) - 1)
        }
    };
    match node {
        Node::Bitmap(b) => {
            assert_eq!(b.data_map & b.node_map, 0, "data and node maps overlap");
            assert_eq!(b.entries.len(), b.data_map.count_ones() as usize);
            assert_eq!(b.children.len(), b.node_map.count_ones() as usize);
            if !is_root {
                assert!(
                    b.entries.len() + b.children.len() > 0,
                    "empty non-root node"
                );
                assert!(
                    !(b.entries.len() == 1 && b.children.is_empty()),
                    "singleton node was not inlined"
                );
            }
            let mut count = 0;
            for e in &b.entries {
                assert_eq!(e.hash, crate::hash::hash_one(&e.key), "stale hash");
                assert_eq!(low_bits(e.hash), prefix, "entry routed to wrong subtree");
                let bit = node::mask(node::fragment(e.hash, shift));
                assert_ne!(b.data_map & bit, 0, "entry outside its data bit");
                assert_eq!(
                    b.entries[node::index(b.data_map, bit)].key,
                    e.key,
                    "entries out of bitmap order"
                );
                assert!(seen.insert(&e.key), "duplicate key {:?}", e.key);
                count += 1;
            }
            let mut bits = b.node_map;
            for child in &b.children {
                let frag = bits.trailing_zeros();
                bits &= bits - 1;
                let child_prefix = prefix | (u64::from(frag) << shift);
                count += check_node(
                    child,
                    shift + node::BITS_PER_LEVEL,
                    child_prefix,
                    false,
                    seen,
                );
            }
            count
        }
        Node::Collision(c) => {
            assert!(shift > node::MAX_SHIFT, "collision node above max depth");
            assert!(c.entries.len() >= 2, "collision node with a single entry");
            for e in &c.entries {
                assert_eq!(e.hash, c.hash, "foreign hash in collision node");
                assert!(seen.insert(&e.key), "duplicate key {:?}", e.key);
            }
            c.entries.len()
        }
    }
}
