//! Lookup operation: traverses the trie to find a key.

use std::borrow::Borrow;
use std::sync::Arc;

use crate::node::{self, Entry, Node};
use crate::owner::{self, Generation};

/// Searches for `key` in the subtree rooted at `node`.
///
/// Returns the stored entry if found.
pub fn get_recursive<'a, K, V, Q>(
    node: &'a Node<K, V>,
    hash: u64,
    key: &Q,
    shift: u32,
) -> Option<&'a Entry<K, V>>
where
    K: Borrow<Q>,
    Q: Eq + ?Sized,
{
    match node {
        Node::Bitmap(b) => {
            let bit = node::mask(node::fragment(hash, shift));

            if b.data_map & bit != 0 {
                // Position has an inline entry.
                let entry = &b.entries[node::index(b.data_map, bit)];
                (entry.hash == hash && entry.key.borrow() == key).then_some(entry)
            } else if b.node_map & bit != 0 {
                // Position has a child subtree, recurse.
                let child = &b.children[node::index(b.node_map, bit)];
                get_recursive(child, hash, key, shift + node::BITS_PER_LEVEL)
            } else {
                None
            }
        }
        Node::Collision(c) => {
            if hash != c.hash {
                return None;
            }
            c.entries.iter().find(|e| e.key.borrow() == key)
        }
    }
}

/// Finds `key` and returns its entry for writing.
///
/// Nodes on the path are edited through [`owner::edit`], so the caller must
/// know the key is present before calling.
pub fn get_mut_recursive<'a, K, V, Q>(
    slot: &'a mut Arc<Node<K, V>>,
    hash: u64,
    key: &Q,
    shift: u32,
    generation: Generation,
) -> Option<&'a mut Entry<K, V>>
where
    K: Borrow<Q> + Clone,
    V: Clone,
    Q: Eq + ?Sized,
{
    match owner::edit(slot, generation) {
        Node::Bitmap(b) => {
            let bit = node::mask(node::fragment(hash, shift));

            if b.data_map & bit != 0 {
                let entry = &mut b.entries[node::index(b.data_map, bit)];
                (entry.hash == hash && entry.key.borrow() == key).then_some(entry)
            } else if b.node_map & bit != 0 {
                let child = &mut b.children[node::index(b.node_map, bit)];
                get_mut_recursive(child, hash, key, shift + node::BITS_PER_LEVEL, generation)
            } else {
                None
            }
        }
        Node::Collision(c) => c.entries.iter_mut().find(|e| e.key.borrow() == key),
    }
}
