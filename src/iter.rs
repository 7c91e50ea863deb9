//! Iterator types for CHAMP maps and sets.
//!
//! Traversal keeps an explicit stack of node frames: inline entries of a
//! node first, then its subtrees in bitmap order. The order is a function of
//! the trie shape, hence of the content.

use std::iter::FusedIterator;
use std::slice;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::node::{Entry, Node};

struct Frame<'a, K, V> {
    entries: slice::Iter<'a, Entry<K, V>>,
    children: slice::Iter<'a, Arc<Node<K, V>>>,
}

impl<'a, K, V> Frame<'a, K, V> {
    fn new(node: &'a Node<K, V>) -> Self {
        Self {
            entries: node.entries().iter(),
            children: node.children().iter(),
        }
    }
}

/// Lazy depth-first walk over the entries of a trie.
pub(crate) struct Entries<'a, K, V> {
    stack: Vec<Frame<'a, K, V>>,
    remaining: usize,
}

impl<'a, K, V> Entries<'a, K, V> {
    pub(crate) fn new(root: &'a Node<K, V>, len: usize) -> Self {
        let mut stack = Vec::with_capacity(8);
        stack.push(Frame::new(root));
        Self {
            stack,
            remaining: len,
        }
    }
}

impl<'a, K, V> Iterator for Entries<'a, K, V> {
    type Item = &'a Entry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            if let Some(entry) = frame.entries.next() {
                self.remaining -= 1;
                return Some(entry);
            }
            if let Some(child) = frame.children.next() {
                self.stack.push(Frame::new(child));
            } else {
                self.stack.pop();
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Iterator over references to key-value pairs in a
/// [`ChampMap`](crate::ChampMap) or [`MutableChampMap`](crate::MutableChampMap).
pub struct Iter<'a, K, V> {
    inner: Entries<'a, K, V>,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) const fn new(inner: Entries<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|e| (&e.key, &e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Iterator over the keys of a map, or the elements of a set.
pub struct Keys<'a, K, V> {
    inner: Entries<'a, K, V>,
}

impl<'a, K, V> Keys<'a, K, V> {
    pub(crate) const fn new(inner: Entries<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|e| &e.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// Iterator over the values of a map.
pub struct Values<'a, K, V> {
    inner: Entries<'a, K, V>,
}

impl<'a, K, V> Values<'a, K, V> {
    pub(crate) const fn new(inner: Entries<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|e| &e.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}

// ---------------------------------------------------------------------------
// Fail-fast cursors
// ---------------------------------------------------------------------------

/// Source of a structural modification counter.
///
/// Mutable collections bump the counter on every insertion of a new key or
/// element, every removal and every reordering. Value replacement is not
/// structural.
pub trait ModificationCount {
    /// Returns the current modification count.
    fn modification_count(&self) -> u64;
}

/// Node, next entry index and next child index.
type CursorFrame<K, V> = (Arc<Node<K, V>>, usize, usize);

/// Detached, fail-fast cursor over a mutable map or set.
///
/// A cursor does not borrow its collection, so the collection may be
/// written while the cursor is alive; the next call to
/// [`next_in`](Self::next_in) then fails with
/// [`Error::ConcurrentModification`].
pub struct Cursor<K, V> {
    stack: Vec<CursorFrame<K, V>>,
    expected: u64,
}

impl<K, V> Cursor<K, V> {
    pub(crate) fn new(root: &Arc<Node<K, V>>, expected: u64) -> Self {
        Self {
            stack: vec![(Arc::clone(root), 0, 0)],
            expected,
        }
    }
}

impl<K: Clone, V: Clone> Cursor<K, V> {
    /// Advances the cursor, checking `source` for modifications first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConcurrentModification`] if `source` was
    /// structurally modified after the cursor was created.
    pub fn next_in<C: ModificationCount>(&mut self, source: &C) -> Result<Option<(K, V)>> {
        if source.modification_count() != self.expected {
            return Err(Error::ConcurrentModification);
        }
        loop {
            let Some((node, entry_pos, child_pos)) = self.stack.last_mut() else {
                return Ok(None);
            };
            if let Some(e) = node.entries().get(*entry_pos) {
                *entry_pos += 1;
                return Ok(Some((e.key.clone(), e.value.clone())));
            }
            if let Some(child) = node.children().get(*child_pos).map(Arc::clone) {
                *child_pos += 1;
                self.stack.push((child, 0, 0));
            } else {
                self.stack.pop();
            }
        }
    }
}
