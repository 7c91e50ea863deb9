//! Hash-trie maps: the persistent [`ChampMap`] and its [`MutableChampMap`].

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::ops;

use crate::iter::{Cursor, Entries, Iter, Keys, ModificationCount, Values};
use crate::owner::Generation;
use crate::trie::Trie;

/// Persistent hash map based on a CHAMP trie.
///
/// Updates return a new map and leave `self` untouched; the two share every
/// node off the updated path. The same content always produces the same trie
/// shape, whatever the order of insertions and removals.
pub struct ChampMap<K, V> {
    trie: Trie<K, V>,
}

/// Mutable view over a CHAMP trie.
///
/// Edits nodes it created itself in place and copies everything else on
/// first touch. [`to_immutable`](Self::to_immutable) publishes the current
/// content in O(1).
pub struct MutableChampMap<K, V> {
    trie: Trie<K, V>,
    generation: Generation,
    modifications: u64,
}

// ---------------------------------------------------------------------------
// ChampMap construction & accessors
// ---------------------------------------------------------------------------

impl<K, V> ChampMap<K, V> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self { trie: Trie::new() }
    }

    /// Returns the number of key-value pairs.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.trie.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.trie.len() == 0
    }

    /// Returns `true` if both maps share their root node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.trie.ptr_eq(&other.trie)
    }

    /// Returns an iterator over `(&K, &V)` pairs.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(Entries::new(self.trie.root(), self.trie.len()))
    }

    /// Returns an iterator over the keys.
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(Entries::new(self.trie.root(), self.trie.len()))
    }

    /// Returns an iterator over the values.
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(Entries::new(self.trie.root(), self.trie.len()))
    }

    /// Returns a mutable view of this map under a fresh generation. O(1).
    #[must_use]
    pub fn to_mutable(&self) -> MutableChampMap<K, V> {
        MutableChampMap {
            trie: self.trie.clone(),
            generation: Generation::fresh(),
            modifications: 0,
        }
    }

    #[cfg(test)]
    pub(crate) const fn trie(&self) -> &Trie<K, V> {
        &self.trie
    }
}

impl<K: Hash + Eq, V> ChampMap<K, V> {
    /// Returns a reference to the value associated with `key`.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.trie.get(key).map(|e| &e.value)
    }

    /// Returns the stored key and its value.
    #[must_use]
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.trie.get(key).map(|e| (&e.key, &e.value))
    }

    /// Returns `true` if the map contains the given key.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.trie.get(key).is_some()
    }
}

impl<K: Hash + Eq + Clone, V: Clone> ChampMap<K, V> {
    /// Returns a map with `key` bound to `value`.
    #[must_use]
    pub fn insert(&self, key: K, value: V) -> Self {
        let mut trie = self.trie.clone();
        trie.insert(key, value, Generation::NONE);
        Self { trie }
    }

    /// Returns a map without `key`. Shares the whole trie if `key` is absent.
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
}

// ---------------------------------------------------------------------------
// MutableChampMap
// ---------------------------------------------------------------------------

impl<K, V> MutableChampMap<K, V> {
    /// Creates an empty mutable map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            trie: Trie::new(),
            generation: Generation::fresh(),
            modifications: 0,
        }
    }

    /// Returns the number of key-value pairs.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.trie.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.trie.len() == 0
    }

    /// Returns an iterator over `(&K, &V)` pairs.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(Entries::new(self.trie.root(), self.trie.len()))
    }

    /// Returns an iterator over the keys.
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(Entries::new(self.trie.root(), self.trie.len()))
    }

    /// Returns an iterator over the values.
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(Entries::new(self.trie.root(), self.trie.len()))
    }

    /// Returns a detached cursor that fails once this map is modified.
    #[must_use]
    pub fn cursor(&self) -> Cursor<K, V> {
        Cursor::new(self.trie.root(), self.modifications)
    }

    /// Publishes the current content as a persistent map. O(1).
    ///
    /// This map switches to a fresh generation, so later writes through it
    /// copy every node the snapshot can reach.
    pub fn to_immutable(&mut self) -> ChampMap<K, V> {
        self.generation = Generation::fresh();
        ChampMap {
            trie: self.trie.clone(),
        }
    }

    /// Converts into a persistent map. O(1).
    #[must_use]
    pub fn into_immutable(self) -> ChampMap<K, V> {
        ChampMap { trie: self.trie }
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.trie = Trie::new();
        self.modifications += 1;
    }

    #[cfg(test)]
    pub(crate) const fn trie(&self) -> &Trie<K, V> {
        &self.trie
    }
}

impl<K: Hash + Eq, V> MutableChampMap<K, V> {
    /// Returns a reference to the value associated with `key`.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.trie.get(key).map(|e| &e.value)
    }

    /// Returns `true` if the map contains the given key.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.trie.get(key).is_some()
    }
}

impl<K: Hash + Eq + Clone, V: Clone> MutableChampMap<K, V> {
    /// Inserts a key-value pair into the map.
    ///
    /// Returns `None` if the key was new, or `Some(old_value)` if an existing
    /// value was replaced.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let old = self.trie.insert(key, value, self.generation);
        if old.is_none() {
            self.modifications += 1;
        }
        old
    }

    /// Removes a key from the map. Returns the removed value, or `None` if
    /// the key was not present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let removed = self.trie.remove(key, self.generation)?;
        self.modifications += 1;
        Some(removed.value)
    }

    /// Returns a mutable reference to the value associated with `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.trie.get_mut(key, self.generation)
    }
}

impl<K, V> ModificationCount for MutableChampMap<K, V> {
    fn modification_count(&self) -> u64 {
        self.modifications
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<K, V> Clone for ChampMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            trie: self.trie.clone(),
        }
    }
}

impl<K, V> Default for ChampMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Default for MutableChampMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for ChampMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for MutableChampMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Hash + Eq, V: PartialEq> PartialEq for ChampMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
            || (self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v)))
    }
}

impl<K: Hash + Eq, V: Eq> Eq for ChampMap<K, V> {}

impl<K: Hash + Eq + Clone, V: Clone> Extend<(K, V)> for MutableChampMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Hash + Eq + Clone, V: Clone> FromIterator<(K, V)> for MutableChampMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Hash + Eq + Clone, V: Clone> FromIterator<(K, V)> for ChampMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .collect::<MutableChampMap<K, V>>()
            .into_immutable()
    }
}

impl<K, V> From<MutableChampMap<K, V>> for ChampMap<K, V> {
    fn from(map: MutableChampMap<K, V>) -> Self {
        map.into_immutable()
    }
}

impl<K, Q, V> ops::Index<&Q> for ChampMap<K, V>
where
    K: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("key not found")
    }
}

impl<'a, K, V> IntoIterator for &'a ChampMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a MutableChampMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}
