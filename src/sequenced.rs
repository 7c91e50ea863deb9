//! Insertion-order layer over the CHAMP trie.
//!
//! Every entry carries a sequence number. An order index maps sequence
//! numbers back to keys: slot `p` of the index holds the key numbered
//! `first + p`, or a tombstone once that key was removed or moved. Tombstones
//! at either end of the index are dropped immediately, so the first and
//! last slots always name live keys.
//!
//! Sequence numbers are `i32`. Running out of numbers at either end, or an
//! index that is mostly tombstones, triggers a renumbering pass that
//! reassigns `0..len` in iteration order.

use std::borrow::Borrow;
use std::hash::Hash;
use std::iter::FusedIterator;

use crate::error::{Error, Result};
use crate::iter::ModificationCount;
use crate::owner::Generation;
use crate::trie::Trie;
use crate::vector::{self, Vector};

/// Slack allowed on top of twice the live size before compaction.
const TOMBSTONE_SLACK: usize = 32;

/// A value tagged with its position in iteration order.
#[derive(Clone)]
pub struct Sequenced<V> {
    pub seq: i32,
    pub value: V,
}

pub struct SequencedTrie<K, V> {
    trie: Trie<K, Sequenced<V>>,
    order: Vector<Option<K>>,
    /// Sequence number of order slot 0.
    first: i32,
}

impl<K, V> SequencedTrie<K, V> {
    pub fn new() -> Self {
        Self {
            trie: Trie::new(),
            order: Vector::new(),
            first: 0,
        }
    }

    /// Starts numbering at `first` instead of zero.
    #[cfg(test)]
    pub fn starting_at(first: i32) -> Self {
        Self {
            first,
            ..Self::new()
        }
    }

    pub const fn len(&self) -> usize {
        self.trie.len()
    }

    /// Number of slots in the order index, tombstones included.
    #[cfg(test)]
    pub fn span(&self) -> usize {
        self.order.len()
    }

    /// Sequence number of the first live entry.
    #[cfg(test)]
    pub const fn first_sequence(&self) -> i32 {
        self.first
    }

    #[cfg(test)]
    pub const fn trie(&self) -> &Trie<K, Sequenced<V>> {
        &self.trie
    }
}

// ---------------------------------------------------------------------------
// Read operations
// ---------------------------------------------------------------------------

impl<K: Hash + Eq, V> SequencedTrie<K, V> {
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.trie.get(key).map(|e| &e.value.value)
    }

    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.trie.get(key).map(|e| (&e.key, &e.value.value))
    }

    pub fn first(&self) -> Result<(&K, &V)> {
        self.slot_entry(self.order.first())
    }

    pub fn last(&self) -> Result<(&K, &V)> {
        self.slot_entry(self.order.last())
    }

    pub fn iter(&self) -> SequencedIter<'_, K, V> {
        SequencedIter {
            slots: self.order.iter(),
            trie: &self.trie,
            remaining: self.trie.len(),
        }
    }

    fn slot_entry<'a>(&'a self, slot: Option<&'a Option<K>>) -> Result<(&'a K, &'a V)> {
        let key = slot.and_then(Option::as_ref).ok_or(Error::EmptyCollection)?;
        self.get_key_value(key).ok_or(Error::EmptyCollection)
    }
}

// ---------------------------------------------------------------------------
// Write operations
// ---------------------------------------------------------------------------

impl<K: Hash + Eq + Clone, V: Clone> SequencedTrie<K, V> {
    /// Inserts `key` at the end, or replaces its value in place if present.
    ///
    /// Returns the previous value and whether the order changed.
    pub fn insert(&mut self, key: K, value: V, generation: Generation) -> (Option<V>, bool) {
        if let Some(slot) = self.trie.get_mut(&key, generation) {
            return (Some(std::mem::replace(&mut slot.value, value)), false);
        }
        self.append(key, value, generation);
        (None, true)
    }

    /// Inserts or moves `key` to the end.
    pub fn insert_last(&mut self, key: K, value: V, generation: Generation) -> Option<V> {
        let old = self.detach(&key, generation);
        self.compact_if_sparse(generation);
        self.append(key, value, generation);
        old
    }

    /// Inserts or moves `key` to the front.
    pub fn insert_first(&mut self, key: K, value: V, generation: Generation) -> Option<V> {
        let old = self.detach(&key, generation);
        self.compact_if_sparse(generation);
        self.prepend(key, value, generation);
        old
    }

    /// Replaces the value of a present key without touching the order.
    pub fn get_mut<Q>(&mut self, key: &Q, generation: Generation) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.trie.get_mut(key, generation).map(|s| &mut s.value)
    }

    pub fn remove<Q>(&mut self, key: &Q, generation: Generation) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let old = self.detach(key, generation)?;
        self.compact_if_sparse(generation);
        Some(old)
    }

    pub fn remove_first(&mut self, generation: Generation) -> Result<(K, V)> {
        let key = self.first()?.0.clone();
        let value = self.remove(&key, generation).ok_or(Error::EmptyCollection)?;
        Ok((key, value))
    }

    pub fn remove_last(&mut self, generation: Generation) -> Result<(K, V)> {
        let key = self.last()?.0.clone();
        let value = self.remove(&key, generation).ok_or(Error::EmptyCollection)?;
        Ok((key, value))
    }

    /// Reassigns dense sequence numbers `0..len` in current iteration order.
    pub fn renumber(&mut self, generation: Generation) {
        tracing::debug!(
            len = self.trie.len(),
            span = self.order.len(),
            first = self.first,
            "renumbering sequenced collection"
        );
        let keys: Vec<K> = self.order.iter().flatten().cloned().collect();
        let mut order = Vector::new();
        for (seq, key) in keys.into_iter().enumerate() {
            let seq = i32::try_from(seq).expect("sequenced collection exceeds i32 range");
            if let Some(slot) = self.trie.get_mut(&key, generation) {
                slot.seq = seq;
            }
            order.push_back(Some(key), generation);
        }
        self.order = order;
        self.first = 0;
    }

    fn compact_if_sparse(&mut self, generation: Generation) {
        if self.order.len() > 2 * self.trie.len() + TOMBSTONE_SLACK {
            self.renumber(generation);
        }
    }

    /// Removes `key` from the trie and tombstones its order slot.
    fn detach<Q>(&mut self, key: &Q, generation: Generation) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let removed = self.trie.remove(key, generation)?;
        let pos = usize::try_from(i64::from(removed.value.seq) - i64::from(self.first))
            .expect("sequence number below the order index");
        self.order.set(pos, None, generation);

        while matches!(self.order.first(), Some(None)) {
            self.order.skip(1, generation);
            self.first = self.first.saturating_add(1);
        }
        while matches!(self.order.last(), Some(None)) {
            let len = self.order.len();
            self.order.truncate(len - 1, generation);
        }
        if self.order.is_empty() {
            self.first = 0;
        }
        Some(removed.value.value)
    }

    fn append(&mut self, key: K, value: V, generation: Generation) {
        let seq = self.next_last().unwrap_or_else(|| {
            self.renumber(generation);
            self.next_last().expect("sequenced collection exceeds i32 range")
        });
        self.order.push_back(Some(key.clone()), generation);
        self.trie.insert(key, Sequenced { seq, value }, generation);
    }

    fn prepend(&mut self, key: K, value: V, generation: Generation) {
        let seq = if self.order.is_empty() {
            self.first
        } else {
            self.first.checked_sub(1).unwrap_or_else(|| {
                self.renumber(generation);
                -1
            })
        };
        self.order.push_front(Some(key.clone()), generation);
        self.first = seq;
        self.trie.insert(key, Sequenced { seq, value }, generation);
    }

    fn next_last(&self) -> Option<i32> {
        let span = i32::try_from(self.order.len()).ok()?;
        self.first.checked_add(span)
    }
}

impl<K: Clone, V> Clone for SequencedTrie<K, V> {
    fn clone(&self) -> Self {
        Self {
            trie: self.trie.clone(),
            order: self.order.clone(),
            first: self.first,
        }
    }
}

impl<K, V> Default for SequencedTrie<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Iteration
// ---------------------------------------------------------------------------

/// Iterator over a sequenced map or set in sequence order.
///
/// Reversible with [`Iterator::rev`].
pub struct SequencedIter<'a, K, V> {
    slots: vector::Iter<'a, Option<K>>,
    trie: &'a Trie<K, Sequenced<V>>,
    remaining: usize,
}

impl<'a, K: Hash + Eq, V> SequencedIter<'a, K, V> {
    fn resolve(&mut self, key: &'a K) -> (&'a K, &'a V) {
        self.remaining -= 1;
        let trie = self.trie;
        let e = trie
            .get(key)
            .expect("order index names a key missing from the trie");
        (&e.key, &e.value.value)
    }
}

impl<'a, K: Hash + Eq, V> Iterator for SequencedIter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(key) = self.slots.next()? {
                return Some(self.resolve(key));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: Hash + Eq, V> DoubleEndedIterator for SequencedIter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(key) = self.slots.next_back()? {
                return Some(self.resolve(key));
            }
        }
    }
}

impl<K: Hash + Eq, V> ExactSizeIterator for SequencedIter<'_, K, V> {}
impl<K: Hash + Eq, V> FusedIterator for SequencedIter<'_, K, V> {}

/// Detached, fail-fast cursor over a mutable sequenced map or set.
///
/// Walks a snapshot taken at creation; see [`Cursor`](crate::Cursor).
pub struct SequencedCursor<K, V> {
    snapshot: SequencedTrie<K, V>,
    position: usize,
    expected: u64,
}

impl<K, V> SequencedCursor<K, V> {
    pub(crate) const fn new(snapshot: SequencedTrie<K, V>, expected: u64) -> Self {
        Self {
            snapshot,
            position: 0,
            expected,
        }
    }
}

impl<K: Hash + Eq + Clone, V: Clone> SequencedCursor<K, V> {
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
        while let Some(slot) = self.snapshot.order.get(self.position) {
            self.position += 1;
            if let Some((k, v)) = slot.as_ref().and_then(|k| self.snapshot.get_key_value(k)) {
                return Ok(Some((k.clone(), v.clone())));
            }
        }
        Ok(None)
    }
}
