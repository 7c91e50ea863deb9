//! Insertion operation: path-copy or in-place insert, depending on ownership.

use std::mem;
use std::sync::Arc;

use crate::node::{self, BitmapNode, CollisionNode, Entry, Node};
use crate::owner::{self, Generation};

/// Inserts `entry` into the subtree in `slot`.
///
/// Every node on the path is edited through [`owner::edit`]: in place when
/// `generation` owns it, otherwise as a restamped copy. Returns the replaced
/// value when the key was already present.
pub fn insert_recursive<K, V>(
    slot: &mut Arc<Node<K, V>>,
    entry: Entry<K, V>,
    shift: u32,
    generation: Generation,
) -> Option<V>
where
    K: Eq + Clone,
    V: Clone,
{
    match owner::edit(slot, generation) {
        Node::Bitmap(b) => insert_into_bitmap(b, entry, shift, generation),
        Node::Collision(c) => insert_into_collision(c, entry),
    }
}

fn insert_into_bitmap<K, V>(
    b: &mut BitmapNode<K, V>,
    entry: Entry<K, V>,
    shift: u32,
    generation: Generation,
) -> Option<V>
where
    K: Eq + Clone,
    V: Clone,
{
    let bit = node::mask(node::fragment(entry.hash, shift));

    if b.data_map & bit != 0 {
        let pos = node::index(b.data_map, bit);
        let existing = &mut b.entries[pos];
        if existing.hash == entry.hash && existing.key == entry.key {
            // Same key → update value.
            return Some(mem::replace(&mut existing.value, entry.value));
        }

        // Different key at same position → push both into a subtree.
        let existing = b.entries.remove(pos);
        let subtree = merge_two(existing, entry, shift + node::BITS_PER_LEVEL, generation);
        b.data_map &= !bit;
        b.node_map |= bit;
        b.children
            .insert(node::index(b.node_map, bit), Arc::new(subtree));
        None
    } else if b.node_map & bit != 0 {
        let child = &mut b.children[node::index(b.node_map, bit)];
        insert_recursive(child, entry, shift + node::BITS_PER_LEVEL, generation)
    } else {
        // Position empty → add inline entry.
        b.data_map |= bit;
        b.entries.insert(node::index(b.data_map, bit), entry);
        None
    }
}

fn insert_into_collision<K: Eq, V>(c: &mut CollisionNode<K, V>, entry: Entry<K, V>) -> Option<V> {
    debug_assert_eq!(
        c.hash, entry.hash,
        "descended into a foreign collision node"
    );
    if let Some(existing) = c.entries.iter_mut().find(|e| e.key == entry.key) {
        return Some(mem::replace(&mut existing.value, entry.value));
    }
    c.entries.push(entry);
    None
}

/// Creates a subtree from two entries that collide at the current depth.
///
/// Descends until hash fragments differ, or creates a collision node past
/// `MAX_SHIFT`.
fn merge_two<K, V>(
    e1: Entry<K, V>,
    e2: Entry<K, V>,
    shift: u32,
    generation: Generation,
) -> Node<K, V> {
    if shift > node::MAX_SHIFT {
        return Node::Collision(CollisionNode {
            hash: e1.hash,
            entries: vec![e1, e2],
            generation,
        });
    }

    let f1 = node::fragment(e1.hash, shift);
    let f2 = node::fragment(e2.hash, shift);

    if f1 == f2 {
        let child = merge_two(e1, e2, shift + node::BITS_PER_LEVEL, generation);
        Node::Bitmap(BitmapNode {
            data_map: 0,
            node_map: node::mask(f1),
            entries: Vec::new(),
            children: vec![Arc::new(child)],
            generation,
        })
    } else {
        let entries = if f1 < f2 { vec![e1, e2] } else { vec![e2, e1] };
        Node::Bitmap(BitmapNode {
            data_map: node::mask(f1) | node::mask(f2),
            node_map: 0,
            entries,
            children: Vec::new(),
            generation,
        })
    }
}
