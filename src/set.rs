//! Hash-trie sets: the persistent [`ChampSet`] and its [`MutableChampSet`].
//!
//! A set is a trie with unit values; every structural property of
//! [`ChampMap`](crate::ChampMap) carries over.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use crate::iter::{Cursor, Entries, Keys, ModificationCount};
use crate::owner::Generation;
use crate::trie::Trie;

/// Iterator over the elements of a [`ChampSet`] or [`MutableChampSet`].
pub type SetIter<'a, K> = Keys<'a, K, ()>;

/// Persistent hash set based on a CHAMP trie.
pub struct ChampSet<K> {
    trie: Trie<K, ()>,
}

/// Mutable view over a CHAMP set trie.
pub struct MutableChampSet<K> {
    trie: Trie<K, ()>,
    generation: Generation,
    modifications: u64,
}

impl<K> ChampSet<K> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self { trie: Trie::new() }
    }

    /// Returns the number of elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.trie.len()
    }

    /// Returns `true` if the set contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.trie.len() == 0
    }

    /// Returns an iterator over the elements.
    #[must_use]
    pub fn iter(&self) -> SetIter<'_, K> {
        Keys::new(Entries::new(self.trie.root(), self.trie.len()))
    }

    /// Returns a mutable view of this set under a fresh generation. O(1).
    #[must_use]
    pub fn to_mutable(&self) -> MutableChampSet<K> {
        MutableChampSet {
            trie: self.trie.clone(),
            generation: Generation::fresh(),
            modifications: 0,
        }
    }

    #[cfg(test)]
    pub(crate) const fn trie(&self) -> &Trie<K, ()> {
        &self.trie
    }
}

impl<K: Hash + Eq> ChampSet<K> {
    /// Returns `true` if the set contains `key`.
    #[must_use]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.trie.get(key).is_some()
    }

    /// Returns the stored element equal to `key`.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.trie.get(key).map(|e| &e.key)
    }

    /// Returns `true` if every element of `self` is in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.len() <= other.len() && self.iter().all(|k| other.contains(k))
    }
}

impl<K: Hash + Eq + Clone> ChampSet<K> {
    /// Returns a set that also contains `key`.
    #[must_use]
    pub fn insert(&self, key: K) -> Self {
        let mut trie = self.trie.clone();
        trie.insert(key, (), Generation::NONE);
        Self { trie }
    }

    /// Returns a set without `key`.
    #[must_use]
    pub fn remove<Q>(&self, key: &Q) -> Self
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut trie = self.trie.clone();
        trie.remove(key, Generation::NONE);
        Self { trie }
    }

    /// Returns the union of both sets, batch-built from the larger one.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let (base, extra) = if self.len() >= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        let mut out = base.to_mutable();
        out.extend(extra.iter().cloned());
        out.into_immutable()
    }
}

impl<K> MutableChampSet<K> {
    /// Creates an empty mutable set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            trie: Trie::new(),
            generation: Generation::fresh(),
            modifications: 0,
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.trie.len()
    }

    /// Returns `true` if the set contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.trie.len() == 0
    }

    /// Returns an iterator over the elements.
    #[must_use]
    pub fn iter(&self) -> SetIter<'_, K> {
        Keys::new(Entries::new(self.trie.root(), self.trie.len()))
    }

    /// Returns a detached cursor that fails once this set is modified.
    /// Values yielded by the cursor are `()`.
    #[must_use]
    pub fn cursor(&self) -> Cursor<K, ()> {
        Cursor::new(self.trie.root(), self.modifications)
    }

    /// Publishes the current content as a persistent set. O(1).
    pub fn to_immutable(&mut self) -> ChampSet<K> {
        self.generation = Generation::fresh();
        ChampSet {
            trie: self.trie.clone(),
        }
    }

    /// Converts into a persistent set. O(1).
    #[must_use]
    pub fn into_immutable(self) -> ChampSet<K> {
        ChampSet { trie: self.trie }
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.trie = Trie::new();
        self.modifications += 1;
    }
}

impl<K: Hash + Eq> MutableChampSet<K> {
    /// Returns `true` if the set contains `key`.
    #[must_use]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.trie.get(key).is_some()
    }
}

impl<K: Hash + Eq + Clone> MutableChampSet<K> {
    /// Adds `key`. Returns `true` if it was not already present.
    pub fn insert(&mut self, key: K) -> bool {
        let added = self.trie.insert(key, (), self.generation).is_none();
        if added {
            self.modifications += 1;
        }
        added
    }

    /// Removes `key`. Returns `true` if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let removed = self.trie.remove(key, self.generation).is_some();
        if removed {
            self.modifications += 1;
        }
        removed
    }
}

impl<K> ModificationCount for MutableChampSet<K> {
    fn modification_count(&self) -> u64 {
        self.modifications
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<K> Clone for ChampSet<K> {
    fn clone(&self) -> Self {
        Self {
            trie: self.trie.clone(),
        }
    }
}

impl<K> Default for ChampSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Default for MutableChampSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug> fmt::Debug for ChampSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: fmt::Debug> fmt::Debug for MutableChampSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: Hash + Eq> PartialEq for ChampSet<K> {
    fn eq(&self, other: &Self) -> bool {
        self.trie.ptr_eq(&other.trie) || (self.len() == other.len() && self.is_subset(other))
    }
}

impl<K: Hash + Eq> Eq for ChampSet<K> {}

impl<K: Hash + Eq + Clone> Extend<K> for MutableChampSet<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for k in iter {
            self.insert(k);
        }
    }
}

impl<K: Hash + Eq + Clone> FromIterator<K> for MutableChampSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<K: Hash + Eq + Clone> FromIterator<K> for ChampSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        iter.into_iter().collect::<MutableChampSet<K>>().into_immutable()
    }
}

impl<K> From<MutableChampSet<K>> for ChampSet<K> {
    fn from(set: MutableChampSet<K>) -> Self {
        set.into_immutable()
    }
}

impl<'a, K> IntoIterator for &'a ChampSet<K> {
    type Item = &'a K;
    type IntoIter = SetIter<'a, K>;

    fn into_iter(self) -> SetIter<'a, K> {
        self.iter()
    }
}

impl<'a, K> IntoIterator for &'a MutableChampSet<K> {
    type Item = &'a K;
    type IntoIter = SetIter<'a, K>;

    fn into_iter(self) -> SetIter<'a, K> {
        self.iter()
    }
}
