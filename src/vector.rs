//! Bit-mapped vector trie backing lists and the sequenced order index.
//!
//! A 32-way tree addresses *positions* `0..capacity`. The list is a window
//! `[offset, offset + tree_len)` into those positions, bracketed by two
//! small buffers:
//!
//! - `head` holds elements at positions `[offset - head.len(), offset)`,
//! - `tail` holds elements at positions `[offset + tree_len, ..)`.
//!
//! Each buffer stays inside a single leaf and is written into the tree in
//! one path edit once it reaches the leaf boundary, which makes append and
//! prepend amortized O(1). When the window would leave the tree, the root
//! grows a level; `truncate` and `skip` only move the window and descend
//! into a smaller root, never copying leaf data.

use std::iter::FusedIterator;
use std::mem;
use std::sync::Arc;

use crate::owner::{self, Generation, Stamped};

/// Bits per vector trie level.
pub const BITS: u32 = 5;

/// Branching factor and leaf width.
pub const WIDTH: usize = 1 << BITS;

const MASK: usize = WIDTH - 1;

/// Vector trie node. A node at shift `s` is a leaf when `s == 0`.
#[derive(Clone)]
pub enum VectorNode<T> {
    /// Inner node; child `i` covers positions `i << s .. (i + 1) << s`.
    Branch {
        /// Always `WIDTH` slots.
        children: Vec<Option<Arc<Self>>>,
        /// Owner stamp.
        generation: Generation,
    },
    /// Leaf holding up to `WIDTH` elements.
    Leaf {
        /// Always `WIDTH` slots.
        items: Vec<Option<T>>,
        /// Owner stamp.
        generation: Generation,
    },
}

impl<T> VectorNode<T> {
    fn empty_at(shift: u32, generation: Generation) -> Self {
        if shift == 0 {
            Self::Leaf {
                items: (0..WIDTH).map(|_| None).collect(),
                generation,
            }
        } else {
            Self::Branch {
                children: (0..WIDTH).map(|_| None).collect(),
                generation,
            }
        }
    }
}

impl<T: Clone> Stamped for VectorNode<T> {
    fn generation(&self) -> Generation {
        match self {
            Self::Branch { generation, .. } | Self::Leaf { generation, .. } => *generation,
        }
    }

    fn restamp(&mut self, stamp: Generation) {
        match self {
            Self::Branch { generation, .. } | Self::Leaf { generation, .. } => *generation = stamp,
        }
    }
}

/// Persistent vector core. Writes take the caller's [`Generation`].
#[derive(Clone)]
pub struct Vector<T> {
    root: Option<Arc<VectorNode<T>>>,
    shift: u32,
    offset: usize,
    tree_len: usize,
    head: Vec<T>,
    tail: Vec<T>,
}

type LeafCache<'a, T> = Option<(usize, &'a [Option<T>])>;

// ---------------------------------------------------------------------------
// Read operations
// ---------------------------------------------------------------------------

impl<T> Vector<T> {
    pub const fn new() -> Self {
        Self {
            root: None,
            shift: 0,
            offset: 0,
            tree_len: 0,
            head: Vec::new(),
            tail: Vec::new(),
        }
    }

    pub const fn len(&self) -> usize {
        self.head.len() + self.tree_len + self.tail.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of positions addressable under the current root.
    fn capacity(&self) -> usize {
        if self.root.is_none() {
            0
        } else {
            1_usize.checked_shl(self.shift + BITS).unwrap_or(usize::MAX)
        }
    }

    /// Tree depth, counting a lone leaf as one level.
    pub const fn depth(&self) -> u32 {
        if self.root.is_none() { 0 } else { self.shift / BITS + 1 }
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.get_cached(index, &mut None)
    }

    pub fn first(&self) -> Option<&T> {
        self.get(0)
    }

    pub fn last(&self) -> Option<&T> {
        self.get(self.len().checked_sub(1)?)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            vector: self,
            front: 0,
            back: self.len(),
            front_leaf: None,
            back_leaf: None,
        }
    }

    /// Looks up `index`, reusing `cache` when the element lives in the same
    /// leaf as the previous lookup.
    fn get_cached<'a>(&'a self, index: usize, cache: &mut LeafCache<'a, T>) -> Option<&'a T> {
        let h = self.head.len();
        if index < h {
            return self.head.get(index);
        }
        let i = index - h;
        if i >= self.tree_len {
            return self.tail.get(i - self.tree_len);
        }

        let pos = self.offset + i;
        let base = pos & !MASK;
        let hit = *cache;
        let items = match hit {
            Some((cached, items)) if cached == base => items,
            _ => {
                let items = self.leaf_at(pos)?;
                *cache = Some((base, items));
                items
            }
        };
        items[pos & MASK].as_ref()
    }

    fn leaf_at(&self, pos: usize) -> Option<&[Option<T>]> {
        let mut node = self.root.as_deref()?;
        let mut shift = self.shift;
        loop {
            match node {
                VectorNode::Leaf { items, .. } => return Some(items),
                VectorNode::Branch { children, .. } => {
                    node = children[(pos >> shift) & MASK].as_deref()?;
                    shift -= BITS;
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Write operations
// ---------------------------------------------------------------------------

impl<T: Clone> Vector<T> {
    pub fn push_back(&mut self, value: T, generation: Generation) {
        if self.root.is_none() {
            self.root = Some(Arc::new(VectorNode::empty_at(0, generation)));
            self.shift = 0;
            self.offset = 0;
        }
        let end = self.offset + self.tree_len + self.tail.len();
        if end == self.capacity() {
            self.grow(0, generation);
        }
        self.tail.push(value);
        if (end + 1).is_multiple_of(WIDTH) {
            self.flush_tail(generation);
        }
    }

    pub fn push_front(&mut self, value: T, generation: Generation) {
        if self.root.is_none() {
            self.root = Some(Arc::new(VectorNode::empty_at(0, generation)));
            self.shift = 0;
            self.offset = WIDTH;
        }
        if self.offset == self.head.len() {
            self.grow(WIDTH - 1, generation);
        }
        let start = self.offset - self.head.len();
        self.head.insert(0, value);
        if (start - 1).is_multiple_of(WIDTH) {
            self.flush_head(generation);
        }
    }

    /// Replaces the element at `index`, returning the old one.
    pub fn set(&mut self, index: usize, value: T, generation: Generation) -> Option<T> {
        let h = self.head.len();
        if index < h {
            return Some(mem::replace(&mut self.head[index], value));
        }
        let i = index - h;
        if i >= self.tree_len {
            return self
                .tail
                .get_mut(i - self.tree_len)
                .map(|slot| mem::replace(slot, value));
        }
        let pos = self.offset + i;
        let shift = self.shift;
        let root = self.root.as_mut()?;
        replace_at(root, shift, pos, value, generation)
    }

    /// Keeps the first `n` elements.
    pub fn truncate(&mut self, n: usize, generation: Generation) {
        if n >= self.len() {
            return;
        }
        if n == 0 {
            *self = Self::new();
            return;
        }
        let h = self.head.len();
        if n <= h {
            self.head.truncate(n);
            self.offset = self.offset - h + n;
            self.tree_len = 0;
            self.tail.clear();
        } else if n <= h + self.tree_len {
            self.tree_len = n - h;
            self.tail.clear();
        } else {
            self.tail.truncate(n - h - self.tree_len);
        }
        self.reroot(generation);
    }

    /// Drops the first `n` elements.
    pub fn skip(&mut self, n: usize, generation: Generation) {
        if n == 0 {
            return;
        }
        if n >= self.len() {
            *self = Self::new();
            return;
        }
        let h = self.head.len();
        if n <= h {
            self.head.drain(..n);
        } else if n <= h + self.tree_len {
            self.head.clear();
            let k = n - h;
            self.offset += k;
            self.tree_len -= k;
        } else {
            self.head.clear();
            let k = n - h - self.tree_len;
            self.offset += self.tree_len + k;
            self.tree_len = 0;
            self.tail.drain(..k);
        }
        self.reroot(generation);
    }

    pub fn pop_back(&mut self, generation: Generation) -> Option<T> {
        let last = self.len().checked_sub(1)?;
        if self.tail.is_empty() {
            let value = self.get(last)?.clone();
            self.truncate(last, generation);
            Some(value)
        } else {
            let value = self.tail.pop();
            if last == 0 {
                *self = Self::new();
            }
            value
        }
    }

    pub fn pop_front(&mut self, generation: Generation) -> Option<T> {
        let rest = self.len().checked_sub(1)?;
        if self.head.is_empty() {
            let value = self.get(0)?.clone();
            self.skip(1, generation);
            Some(value)
        } else {
            let value = self.head.remove(0);
            if rest == 0 {
                *self = Self::new();
            }
            Some(value)
        }
    }

    /// Appends `other`, moving whichever side is shorter onto the other.
    pub fn concat(&mut self, mut other: Self, generation: Generation) {
        if other.len() <= self.len() {
            for value in other.iter() {
                self.push_back(value.clone(), generation);
            }
        } else {
            for value in self.iter().rev() {
                other.push_front(value.clone(), generation);
            }
            *self = other;
        }
    }

    /// Inserts at `index` by splitting and concatenating. `index <= len`.
    pub fn insert(&mut self, index: usize, value: T, generation: Generation) {
        let len = self.len();
        debug_assert!(index <= len, "insert position past the end");
        if index >= len {
            self.push_back(value, generation);
        } else if index == 0 {
            self.push_front(value, generation);
        } else {
            let mut right = self.clone();
            right.skip(index, generation);
            self.truncate(index, generation);
            self.push_back(value, generation);
            self.concat(right, generation);
        }
    }

    /// Removes the element at `index` by splitting and concatenating.
    pub fn remove(&mut self, index: usize, generation: Generation) -> Option<T> {
        let len = self.len();
        if index >= len {
            return None;
        }
        if index == 0 {
            return self.pop_front(generation);
        }
        if index == len - 1 {
            return self.pop_back(generation);
        }
        let value = self.get(index)?.clone();
        let mut right = self.clone();
        right.skip(index + 1, generation);
        self.truncate(index, generation);
        self.concat(right, generation);
        Some(value)
    }

    /// Adds a level above the root; the old root becomes child `at`.
    fn grow(&mut self, at: usize, generation: Generation) {
        let old_capacity = self.capacity();
        let mut children: Vec<Option<Arc<VectorNode<T>>>> = (0..WIDTH).map(|_| None).collect();
        children[at] = self.root.take();
        self.root = Some(Arc::new(VectorNode::Branch {
            children,
            generation,
        }));
        self.shift += BITS;
        self.offset += at * old_capacity;
        tracing::trace!(depth = self.depth(), "vector trie grew a level");
    }

    /// Descends into the single root child covering every occupied position.
    fn reroot(&mut self, generation: Generation) {
        let mut lo = self.offset - self.head.len();
        let mut hi = self.offset + self.tree_len + self.tail.len();
        let before = self.depth();
        while self.shift > 0 {
            let shift = self.shift;
            let slot = lo >> shift;
            if slot != (hi - 1) >> shift {
                break;
            }
            let Some(VectorNode::Branch { children, .. }) = self.root.as_deref() else {
                break;
            };
            let child = children[slot & MASK]
                .clone()
                .unwrap_or_else(|| Arc::new(VectorNode::empty_at(shift - BITS, generation)));
            let base = slot << shift;
            self.root = Some(child);
            self.offset -= base;
            lo -= base;
            hi -= base;
            self.shift -= BITS;
        }
        if self.depth() != before {
            tracing::trace!(from = before, to = self.depth(), "vector trie re-rooted");
        }
    }

    fn flush_tail(&mut self, generation: Generation) {
        let pos = self.offset + self.tree_len;
        let values = mem::take(&mut self.tail);
        self.tree_len += values.len();
        self.write_run(pos, values, generation);
    }

    fn flush_head(&mut self, generation: Generation) {
        let values = mem::take(&mut self.head);
        self.offset -= values.len();
        self.tree_len += values.len();
        self.write_run(self.offset, values, generation);
    }

    /// Writes consecutive `values` starting at `pos`, all within one leaf.
    fn write_run(&mut self, pos: usize, values: Vec<T>, generation: Generation) {
        debug_assert!((pos & MASK) + values.len() <= WIDTH, "run crosses a leaf");
        let shift = self.shift;
        let root = self
            .root
            .get_or_insert_with(|| Arc::new(VectorNode::empty_at(shift, generation)));
        let mut slot = root;
        let mut shift = shift;
        loop {
            match owner::edit(slot, generation) {
                VectorNode::Leaf { items, .. } => {
                    for (i, value) in values.into_iter().enumerate() {
                        items[(pos & MASK) + i] = Some(value);
                    }
                    return;
                }
                VectorNode::Branch { children, .. } => {
                    let child_shift = shift - BITS;
                    slot = children[(pos >> shift) & MASK].get_or_insert_with(|| {
                        Arc::new(VectorNode::empty_at(child_shift, generation))
                    });
                    shift = child_shift;
                }
            }
        }
    }
}

fn replace_at<T: Clone>(
    slot: &mut Arc<VectorNode<T>>,
    shift: u32,
    pos: usize,
    value: T,
    generation: Generation,
) -> Option<T> {
    match owner::edit(slot, generation) {
        VectorNode::Leaf { items, .. } => items[pos & MASK].replace(value),
        VectorNode::Branch { children, .. } => {
            let child = children[(pos >> shift) & MASK].as_mut()?;
            replace_at(child, shift - BITS, pos, value, generation)
        }
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Vector<T> {}

// ---------------------------------------------------------------------------
// Iteration
// ---------------------------------------------------------------------------

/// Iterator over the elements of a [`VectorList`](crate::VectorList) or
/// [`MutableVectorList`](crate::MutableVectorList).
pub struct Iter<'a, T> {
    vector: &'a Vector<T>,
    front: usize,
    back: usize,
    front_leaf: LeafCache<'a, T>,
    back_leaf: LeafCache<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let item = self.vector.get_cached(self.front, &mut self.front_leaf);
        self.front += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.vector.get_cached(self.back, &mut self.back_leaf)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}
