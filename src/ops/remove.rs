//! Removal operation: path edit with canonical inlining.

use std::borrow::Borrow;
use std::sync::Arc;

use crate::node::{self, Entry, Node};
use crate::owner::{self, Generation};

/// Removes `key` from the subtree in `slot` and returns the removed entry.
///
/// The caller must have checked that the key is present: the path is edited
/// on the way down, so a miss would leave needlessly copied nodes behind.
///
/// A child left holding a single entry and no subtrees is inlined into its
/// parent. Applied bottom-up this keeps every non-root node at two or more
/// entries, which makes the trie shape a function of its content alone.
pub fn remove_recursive<K, V, Q>(
    slot: &mut Arc<Node<K, V>>,
    hash: u64,
    key: &Q,
    shift: u32,
    generation: Generation,
) -> Option<Entry<K, V>>
where
    K: Borrow<Q> + Clone,
    V: Clone,
    Q: Eq + ?Sized,
{
    match owner::edit(slot, generation) {
        Node::Bitmap(b) => {
            let bit = node::mask(node::fragment(hash, shift));

            if b.data_map & bit != 0 {
                let pos = node::index(b.data_map, bit);
                let e = &b.entries[pos];
                if e.hash != hash || e.key.borrow() != key {
                    return None;
                }
                b.data_map &= !bit;
                Some(b.entries.remove(pos))
            } else if b.node_map & bit != 0 {
                let pos = node::index(b.node_map, bit);
                let removed = remove_recursive(
                    &mut b.children[pos],
                    hash,
                    key,
                    shift + node::BITS_PER_LEVEL,
                    generation,
                )?;

                // The child was just edited, so it is uniquely held and
                // `make_mut` does not copy.
                let child = Arc::make_mut(&mut b.children[pos]);
                if let Some(lone) = child.take_singleton() {
                    b.children.remove(pos);
                    b.node_map &= !bit;
                    b.data_map |= bit;
                    b.entries.insert(node::index(b.data_map, bit), lone);
                }
                Some(removed)
            } else {
                None
            }
        }
        Node::Collision(c) => {
            if c.hash != hash {
                return None;
            }
            let pos = c.entries.iter().position(|e| e.key.borrow() == key)?;
            Some(c.entries.remove(pos))
        }
    }
}
