//! Insertion-ordered maps: [`SequencedChampMap`] and
//! [`MutableSequencedChampMap`].
//!
//! Iteration follows insertion order. Re-inserting a present key keeps its
//! position; [`insert_first`](SequencedChampMap::insert_first) and
//! [`insert_last`](SequencedChampMap::insert_last) move it to either end.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::ops;

use crate::error::Result;
use crate::iter::ModificationCount;
use crate::owner::Generation;
use crate::sequenced::{SequencedCursor, SequencedIter, SequencedTrie};

/// Persistent insertion-ordered hash map.
///
/// # Capacity
///
/// Sequence numbers are `i32`, so a sequenced map holds at most
/// `i32::MAX` entries. Running out of numbers at either end renumbers the
/// live entries; growing past that size panics.
pub struct SequencedChampMap<K, V> {
    inner: SequencedTrie<K, V>,
}

/// Mutable view over an insertion-ordered hash map.
///
/// # Capacity
///
/// Sequence numbers are `i32`, so a sequenced map holds at most
/// `i32::MAX` entries. Running out of numbers at either end renumbers the
/// live entries; growing past that size panics.
pub struct MutableSequencedChampMap<K, V> {
    inner: SequencedTrie<K, V>,
    generation: Generation,
    modifications: u64,
}

// ---------------------------------------------------------------------------
// SequencedChampMap
// ---------------------------------------------------------------------------

impl<K, V> SequencedChampMap<K, V> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: SequencedTrie::new(),
        }
    }

    /// Returns the number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.inner.len() == 0
    }

    #[cfg(test)]
    pub(crate) const fn inner(&self) -> &SequencedTrie<K, V> {
        &self.inner
    }
}

impl<K: Clone, V> SequencedChampMap<K, V> {
    /// Returns a mutable view of this map under a fresh generation. O(1).
    #[must_use]
    pub fn to_mutable(&self) -> MutableSequencedChampMap<K, V> {
        MutableSequencedChampMap {
            inner: self.inner.clone(),
            generation: Generation::fresh(),
            modifications: 0,
        }
    }
}

impl<K: Hash + Eq, V> SequencedChampMap<K, V> {
    /// Returns a reference to the value associated with `key`.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.get(key)
    }

    /// Returns the stored key and its value.
    #[must_use]
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.get_key_value(key)
    }

    /// Returns `true` if the map contains the given key.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.get(key).is_some()
    }

    /// Returns the first entry in iteration order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`](crate::Error::EmptyCollection) if
    /// the map is empty.
    pub fn first(&self) -> Result<(&K, &V)> {
        self.inner.first()
    }

    /// Returns the last entry in iteration order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`](crate::Error::EmptyCollection) if
    /// the map is empty.
    pub fn last(&self) -> Result<(&K, &V)> {
        self.inner.last()
    }

    /// Returns an iterator over `(&K, &V)` in insertion order.
    #[must_use]
    pub fn iter(&self) -> SequencedIter<'_, K, V> {
        self.inner.iter()
    }

    /// Returns an iterator over the keys in insertion order.
    #[must_use]
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.inner.iter().map(|(k, _)| k)
    }

    /// Returns an iterator over the values in insertion order.
    #[must_use]
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.inner.iter().map(|(_, v)| v)
    }
}

impl<K: Hash + Eq + Clone, V: Clone> SequencedChampMap<K, V> {
    /// Returns a map with `key` bound to `value`. A present key keeps its
    /// position; a new key goes last.
    #[must_use]
    pub fn insert(&self, key: K, value: V) -> Self {
        let mut inner = self.inner.clone();
        inner.insert(key, value, Generation::NONE);
        Self { inner }
    }

    /// Returns a map with `key` bound to `value` at the front.
    #[must_use]
    pub fn insert_first(&self, key: K, value: V) -> Self {
        let mut inner = self.inner.clone();
        inner.insert_first(key, value, Generation::NONE);
        Self { inner }
    }

    /// Returns a map with `key` bound to `value` at the back.
    #[must_use]
    pub fn insert_last(&self, key: K, value: V) -> Self {
        let mut inner = self.inner.clone();
        inner.insert_last(key, value, Generation::NONE);
        Self { inner }
    }

    /// Returns a map without `key`.
    #[must_use]
    pub fn remove<Q>(&self, key: &Q) -> Self
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if !self.contains_key(key) {
            return self.clone();
        }
        let mut inner = self.inner.clone();
        inner.remove(key, Generation::NONE);
        Self { inner }
    }

    /// Returns a map without its first entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`](crate::Error::EmptyCollection) if
    /// the map is empty.
    pub fn remove_first(&self) -> Result<Self> {
        let mut inner = self.inner.clone();
        inner.remove_first(Generation::NONE)?;
        Ok(Self { inner })
    }

    /// Returns a map without its last entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`](crate::Error::EmptyCollection) if
    /// the map is empty.
    pub fn remove_last(&self) -> Result<Self> {
        let mut inner = self.inner.clone();
        inner.remove_last(Generation::NONE)?;
        Ok(Self { inner })
    }
}

// ---------------------------------------------------------------------------
// MutableSequencedChampMap
// ---------------------------------------------------------------------------

impl<K, V> MutableSequencedChampMap<K, V> {
    /// Creates an empty mutable map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: SequencedTrie::new(),
            generation: Generation::fresh(),
            modifications: 0,
        }
    }

    /// Returns the number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.inner.len() == 0
    }

    /// Converts into a persistent map. O(1).
    #[must_use]
    pub fn into_immutable(self) -> SequencedChampMap<K, V> {
        SequencedChampMap { inner: self.inner }
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.inner = SequencedTrie::new();
        self.modifications += 1;
    }
}

impl<K: Clone, V> MutableSequencedChampMap<K, V> {
    /// Publishes the current content as a persistent map. O(1).
    pub fn to_immutable(&mut self) -> SequencedChampMap<K, V> {
        self.generation = Generation::fresh();
        SequencedChampMap {
            inner: self.inner.clone(),
        }
    }

    /// Returns a detached cursor that fails once the order of this map
    /// changes.
    #[must_use]
    pub fn cursor(&self) -> SequencedCursor<K, V> {
        SequencedCursor::new(self.inner.clone(), self.modifications)
    }
}

impl<K: Hash + Eq, V> MutableSequencedChampMap<K, V> {
    /// Returns a reference to the value associated with `key`.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.get(key)
    }

    /// Returns `true` if the map contains the given key.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.get(key).is_some()
    }

    /// Returns the first entry in iteration order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`](crate::Error::EmptyCollection) if
    /// the map is empty.
    pub fn first(&self) -> Result<(&K, &V)> {
        self.inner.first()
    }

    /// Returns the last entry in iteration order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`](crate::Error::EmptyCollection) if
    /// the map is empty.
    pub fn last(&self) -> Result<(&K, &V)> {
        self.inner.last()
    }

    /// Returns an iterator over `(&K, &V)` in insertion order.
    #[must_use]
    pub fn iter(&self) -> SequencedIter<'_, K, V> {
        self.inner.iter()
    }

    /// Returns an iterator over the keys in insertion order.
    #[must_use]
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.inner.iter().map(|(k, _)| k)
    }

    /// Returns an iterator over the values in insertion order.
    #[must_use]
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.inner.iter().map(|(_, v)| v)
    }
}

impl<K: Hash + Eq + Clone, V: Clone> MutableSequencedChampMap<K, V> {
    /// Inserts a key-value pair. A present key keeps its position and has
    /// its value replaced; a new key goes last.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let (old, moved) = self.inner.insert(key, value, self.generation);
        if moved {
            self.modifications += 1;
        }
        old
    }

    /// Inserts `key` or moves it to the front.
    pub fn insert_first(&mut self, key: K, value: V) -> Option<V> {
        self.modifications += 1;
        self.inner.insert_first(key, value, self.generation)
    }

    /// Inserts `key` or moves it to the back.
    pub fn insert_last(&mut self, key: K, value: V) -> Option<V> {
        self.modifications += 1;
        self.inner.insert_last(key, value, self.generation)
    }

    /// Removes a key, returning its value if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let old = self.inner.remove(key, self.generation)?;
        self.modifications += 1;
        Some(old)
    }

    /// Removes and returns the first entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`](crate::Error::EmptyCollection) if
    /// the map is empty.
    pub fn remove_first(&mut self) -> Result<(K, V)> {
        let entry = self.inner.remove_first(self.generation)?;
        self.modifications += 1;
        Ok(entry)
    }

    /// Removes and returns the last entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`](crate::Error::EmptyCollection) if
    /// the map is empty.
    pub fn remove_last(&mut self) -> Result<(K, V)> {
        let entry = self.inner.remove_last(self.generation)?;
        self.modifications += 1;
        Ok(entry)
    }

    /// Returns a mutable reference to the value of `key`. The order is
    /// unaffected.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.get_mut(key, self.generation)
    }
}

impl<K, V> ModificationCount for MutableSequencedChampMap<K, V> {
    fn modification_count(&self) -> u64 {
        self.modifications
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<K: Clone, V> Clone for SequencedChampMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V> Default for SequencedChampMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Default for MutableSequencedChampMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq + fmt::Debug, V: fmt::Debug> fmt::Debug for SequencedChampMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Hash + Eq + fmt::Debug, V: fmt::Debug> fmt::Debug for MutableSequencedChampMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Compares content only; two maps with the same entries in a different
/// order are equal.
impl<K: Hash + Eq, V: PartialEq> PartialEq for SequencedChampMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K: Hash + Eq, V: Eq> Eq for SequencedChampMap<K, V> {}

impl<K: Hash + Eq + Clone, V: Clone> Extend<(K, V)> for MutableSequencedChampMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Hash + Eq + Clone, V: Clone> FromIterator<(K, V)> for MutableSequencedChampMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Hash + Eq + Clone, V: Clone> FromIterator<(K, V)> for SequencedChampMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .collect::<MutableSequencedChampMap<K, V>>()
            .into_immutable()
    }
}

impl<K, V> From<MutableSequencedChampMap<K, V>> for SequencedChampMap<K, V> {
    fn from(map: MutableSequencedChampMap<K, V>) -> Self {
        map.into_immutable()
    }
}

impl<K, Q, V> ops::Index<&Q> for SequencedChampMap<K, V>
where
    K: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("key not found")
    }
}

impl<'a, K: Hash + Eq, V> IntoIterator for &'a SequencedChampMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = SequencedIter<'a, K, V>;

    fn into_iter(self) -> SequencedIter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K: Hash + Eq, V> IntoIterator for &'a MutableSequencedChampMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = SequencedIter<'a, K, V>;

    fn into_iter(self) -> SequencedIter<'a, K, V> {
        self.iter()
    }
}
