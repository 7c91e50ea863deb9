//! Insertion-ordered sets: [`SequencedChampSet`] and
//! [`MutableSequencedChampSet`].

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::iter::FusedIterator;

use crate::error::Result;
use crate::iter::ModificationCount;
use crate::owner::Generation;
use crate::sequenced::{SequencedCursor, SequencedIter, SequencedTrie};

/// Persistent insertion-ordered hash set.
///
/// # Capacity
///
/// Sequence numbers are `i32`, so a sequenced set holds at most
/// `i32::MAX` entries. Running out of numbers at either end renumbers the
/// live entries; growing past that size panics.
pub struct SequencedChampSet<K> {
    inner: SequencedTrie<K, ()>,
}

/// Mutable view over an insertion-ordered hash set.
///
/// # Capacity
///
/// Sequence numbers are `i32`, so a sequenced set holds at most
/// `i32::MAX` entries. Running out of numbers at either end renumbers the
/// live entries; growing past that size panics.
pub struct MutableSequencedChampSet<K> {
    inner: SequencedTrie<K, ()>,
    generation: Generation,
    modifications: u64,
}

/// Iterator over a sequenced set in insertion order.
pub struct SequencedSetIter<'a, K> {
    inner: SequencedIter<'a, K, ()>,
}

impl<'a, K: Hash + Eq> Iterator for SequencedSetIter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, ())| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: Hash + Eq> DoubleEndedIterator for SequencedSetIter<'_, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, ())| k)
    }
}

impl<K: Hash + Eq> ExactSizeIterator for SequencedSetIter<'_, K> {}
impl<K: Hash + Eq> FusedIterator for SequencedSetIter<'_, K> {}

impl<K> SequencedChampSet<K> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: SequencedTrie::new(),
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the set contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.inner.len() == 0
    }
}

impl<K: Clone> SequencedChampSet<K> {
    /// Returns a mutable view of this set under a fresh generation. O(1).
    #[must_use]
    pub fn to_mutable(&self) -> MutableSequencedChampSet<K> {
        MutableSequencedChampSet {
            inner: self.inner.clone(),
            generation: Generation::fresh(),
            modifications: 0,
        }
    }
}

impl<K: Hash + Eq> SequencedChampSet<K> {
    /// Returns `true` if the set contains `key`.
    #[must_use]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.get(key).is_some()
    }

    /// Returns the first element in iteration order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`](crate::Error::EmptyCollection) if
    /// the set is empty.
    pub fn first(&self) -> Result<&K> {
        self.inner.first().map(|(k, ())| k)
    }

    /// Returns the last element in iteration order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`](crate::Error::EmptyCollection) if
    /// the set is empty.
    pub fn last(&self) -> Result<&K> {
        self.inner.last().map(|(k, ())| k)
    }

    /// Returns an iterator over the elements in insertion order.
    #[must_use]
    pub fn iter(&self) -> SequencedSetIter<'_, K> {
        SequencedSetIter {
            inner: self.inner.iter(),
        }
    }
}

impl<K: Hash + Eq + Clone> SequencedChampSet<K> {
    /// Returns a set that also contains `key`. A present element keeps its
    /// position.
    #[must_use]
    pub fn insert(&self, key: K) -> Self {
        let mut inner = self.inner.clone();
        inner.insert(key, (), Generation::NONE);
        Self { inner }
    }

    /// Returns a set with `key` at the front.
    #[must_use]
    pub fn insert_first(&self, key: K) -> Self {
        let mut inner = self.inner.clone();
        inner.insert_first(key, (), Generation::NONE);
        Self { inner }
    }

    /// Returns a set with `key` at the back.
    #[must_use]
    pub fn insert_last(&self, key: K) -> Self {
        let mut inner = self.inner.clone();
        inner.insert_last(key, (), Generation::NONE);
        Self { inner }
    }

    /// Returns a set without `key`.
    #[must_use]
    pub fn remove<Q>(&self, key: &Q) -> Self
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if !self.contains(key) {
            return self.clone();
        }
        let mut inner = self.inner.clone();
        inner.remove(key, Generation::NONE);
        Self { inner }
    }

    /// Returns a set without its first element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`](crate::Error::EmptyCollection) if
    /// the set is empty.
    pub fn remove_first(&self) -> Result<Self> {
        let mut inner = self.inner.clone();
        inner.remove_first(Generation::NONE)?;
        Ok(Self { inner })
    }

    /// Returns a set without its last element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`](crate::Error::EmptyCollection) if
    /// the set is empty.
    pub fn remove_last(&self) -> Result<Self> {
        let mut inner = self.inner.clone();
        inner.remove_last(Generation::NONE)?;
        Ok(Self { inner })
    }
}

impl<K> MutableSequencedChampSet<K> {
    /// Creates an empty mutable set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: SequencedTrie::new(),
            generation: Generation::fresh(),
            modifications: 0,
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the set contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.inner.len() == 0
    }

    /// Converts into a persistent set. O(1).
    #[must_use]
    pub fn into_immutable(self) -> SequencedChampSet<K> {
        SequencedChampSet { inner: self.inner }
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.inner = SequencedTrie::new();
        self.modifications += 1;
    }
}

impl<K: Clone> MutableSequencedChampSet<K> {
    /// Publishes the current content as a persistent set. O(1).
    pub fn to_immutable(&mut self) -> SequencedChampSet<K> {
        self.generation = Generation::fresh();
        SequencedChampSet {
            inner: self.inner.clone(),
        }
    }

    /// Returns a detached cursor that fails once the order of this set
    /// changes. Values yielded by the cursor are `()`.
    #[must_use]
    pub fn cursor(&self) -> SequencedCursor<K, ()> {
        SequencedCursor::new(self.inner.clone(), self.modifications)
    }
}

impl<K: Hash + Eq> MutableSequencedChampSet<K> {
    /// Returns `true` if the set contains `key`.
    #[must_use]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.get(key).is_some()
    }

    /// Returns the first element in iteration order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`](crate::Error::EmptyCollection) if
    /// the set is empty.
    pub fn first(&self) -> Result<&K> {
        self.inner.first().map(|(k, ())| k)
    }

    /// Returns the last element in iteration order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`](crate::Error::EmptyCollection) if
    /// the set is empty.
    pub fn last(&self) -> Result<&K> {
        self.inner.last().map(|(k, ())| k)
    }

    /// Returns an iterator over the elements in insertion order.
    #[must_use]
    pub fn iter(&self) -> SequencedSetIter<'_, K> {
        SequencedSetIter {
            inner: self.inner.iter(),
        }
    }
}

impl<K: Hash + Eq + Clone> MutableSequencedChampSet<K> {
    /// Adds `key` at the back. Returns `true` if it was not already present;
    /// a present element keeps its position.
    pub fn insert(&mut self, key: K) -> bool {
        let (_, added) = self.inner.insert(key, (), self.generation);
        if added {
            self.modifications += 1;
        }
        added
    }

    /// Adds `key` or moves it to the front. Returns `true` if it was new.
    pub fn insert_first(&mut self, key: K) -> bool {
        self.modifications += 1;
        self.inner.insert_first(key, (), self.generation).is_none()
    }

    /// Adds `key` or moves it to the back. Returns `true` if it was new.
    pub fn insert_last(&mut self, key: K) -> bool {
        self.modifications += 1;
        self.inner.insert_last(key, (), self.generation).is_none()
    }

    /// Removes `key`. Returns `true` if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let removed = self.inner.remove(key, self.generation).is_some();
        if removed {
            self.modifications += 1;
        }
        removed
    }

    /// Removes and returns the first element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`](crate::Error::EmptyCollection) if
    /// the set is empty.
    pub fn remove_first(&mut self) -> Result<K> {
        let (key, ()) = self.inner.remove_first(self.generation)?;
        self.modifications += 1;
        Ok(key)
    }

    /// Removes and returns the last element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`](crate::Error::EmptyCollection) if
    /// the set is empty.
    pub fn remove_last(&mut self) -> Result<K> {
        let (key, ()) = self.inner.remove_last(self.generation)?;
        self.modifications += 1;
        Ok(key)
    }
}

impl<K> ModificationCount for MutableSequencedChampSet<K> {
    fn modification_count(&self) -> u64 {
        self.modifications
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<K: Clone> Clone for SequencedChampSet<K> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K> Default for SequencedChampSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Default for MutableSequencedChampSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq + fmt::Debug> fmt::Debug for SequencedChampSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: Hash + Eq + fmt::Debug> fmt::Debug for MutableSequencedChampSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Compares membership only.
impl<K: Hash + Eq> PartialEq for SequencedChampSet<K> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|k| other.contains(k))
    }
}

impl<K: Hash + Eq> Eq for SequencedChampSet<K> {}

impl<K: Hash + Eq + Clone> Extend<K> for MutableSequencedChampSet<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for k in iter {
            self.insert(k);
        }
    }
}

impl<K: Hash + Eq + Clone> FromIterator<K> for MutableSequencedChampSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<K: Hash + Eq + Clone> FromIterator<K> for SequencedChampSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        iter.into_iter()
            .collect::<MutableSequencedChampSet<K>>()
            .into_immutable()
    }
}

impl<K> From<MutableSequencedChampSet<K>> for SequencedChampSet<K> {
    fn from(set: MutableSequencedChampSet<K>) -> Self {
        set.into_immutable()
    }
}

impl<'a, K: Hash + Eq> IntoIterator for &'a SequencedChampSet<K> {
    type Item = &'a K;
    type IntoIter = SequencedSetIter<'a, K>;

    fn into_iter(self) -> SequencedSetIter<'a, K> {
        self.iter()
    }
}

impl<'a, K: Hash + Eq> IntoIterator for &'a MutableSequencedChampSet<K> {
    type Item = &'a K;
    type IntoIter = SequencedSetIter<'a, K>;

    fn into_iter(self) -> SequencedSetIter<'a, K> {
        self.iter()
    }
}
