//! Bit-mapped vector trie lists: [`VectorList`] and [`MutableVectorList`].

use std::fmt;
use std::ops;

use crate::error::{Error, Result};
use crate::iter::ModificationCount;
use crate::owner::Generation;
use crate::vector::{Iter, Vector};

/// Persistent list backed by a 32-way vector trie.
///
/// Access by position is O(log32 N); appending and prepending are amortized
/// O(1). [`take`](Self::take) and [`skip`](Self::skip) share all leaf data
/// with the original list.
pub struct VectorList<T> {
    vector: Vector<T>,
}

/// Mutable view over a vector trie list.
pub struct MutableVectorList<T> {
    vector: Vector<T>,
    generation: Generation,
    modifications: u64,
}

const fn out_of_range(index: usize, len: usize) -> Error {
    Error::IndexOutOfRange { index, len }
}

// ---------------------------------------------------------------------------
// VectorList
// ---------------------------------------------------------------------------

impl<T> VectorList<T> {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vector: Vector::new(),
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.vector.len()
    }

    /// Returns `true` if the list has no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.vector.is_empty()
    }

    /// Returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn get(&self, index: usize) -> Result<&T> {
        self.vector
            .get(index)
            .ok_or_else(|| out_of_range(index, self.len()))
    }

    /// Returns the first element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`] if the list is empty.
    pub fn first(&self) -> Result<&T> {
        self.vector.first().ok_or(Error::EmptyCollection)
    }

    /// Returns the last element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`] if the list is empty.
    pub fn last(&self) -> Result<&T> {
        self.vector.last().ok_or(Error::EmptyCollection)
    }

    /// Returns a double-ended iterator over the elements.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        self.vector.iter()
    }

    #[cfg(test)]
    pub(crate) const fn vector(&self) -> &Vector<T> {
        &self.vector
    }
}

impl<T: Clone> VectorList<T> {
    /// Returns a mutable view of this list under a fresh generation.
    #[must_use]
    pub fn to_mutable(&self) -> MutableVectorList<T> {
        MutableVectorList {
            vector: self.vector.clone(),
            generation: Generation::fresh(),
            modifications: 0,
        }
    }

    /// Returns a list with `value` appended.
    #[must_use]
    pub fn push_back(&self, value: T) -> Self {
        self.edited(|v| v.push_back(value, Generation::NONE))
    }

    /// Returns a list with `value` prepended.
    #[must_use]
    pub fn push_front(&self, value: T) -> Self {
        self.edited(|v| v.push_front(value, Generation::NONE))
    }

    /// Returns a list without its last element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`] if the list is empty.
    pub fn pop_back(&self) -> Result<Self> {
        if self.is_empty() {
            return Err(Error::EmptyCollection);
        }
        Ok(self.take(self.len() - 1))
    }

    /// Returns a list without its first element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`] if the list is empty.
    pub fn pop_front(&self) -> Result<Self> {
        if self.is_empty() {
            return Err(Error::EmptyCollection);
        }
        Ok(self.skip(1))
    }

    /// Returns a list with the element at `index` replaced.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn set(&self, index: usize, value: T) -> Result<Self> {
        if index >= self.len() {
            return Err(out_of_range(index, self.len()));
        }
        Ok(self.edited(|v| {
            v.set(index, value, Generation::NONE);
        }))
    }

    /// Returns a list with `value` inserted before position `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index > len`.
    pub fn insert(&self, index: usize, value: T) -> Result<Self> {
        if index > self.len() {
            return Err(out_of_range(index, self.len()));
        }
        Ok(self.edited(|v| v.insert(index, value, Generation::NONE)))
    }

    /// Returns a list without the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn remove(&self, index: usize) -> Result<Self> {
        if index >= self.len() {
            return Err(out_of_range(index, self.len()));
        }
        Ok(self.edited(|v| {
            v.remove(index, Generation::NONE);
        }))
    }

    /// Returns the first `n` elements. Shares all leaves with `self`.
    #[must_use]
    pub fn take(&self, n: usize) -> Self {
        self.edited(|v| v.truncate(n, Generation::NONE))
    }

    /// Returns everything after the first `n` elements. Shares all leaves
    /// with `self`.
    #[must_use]
    pub fn skip(&self, n: usize) -> Self {
        self.edited(|v| v.skip(n, Generation::NONE))
    }

    /// Returns `self` followed by `other`.
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        self.edited(|v| v.concat(other.vector.clone(), Generation::NONE))
    }

    fn edited(&self, f: impl FnOnce(&mut Vector<T>)) -> Self {
        let mut vector = self.vector.clone();
        f(&mut vector);
        Self { vector }
    }
}

// ---------------------------------------------------------------------------
// MutableVectorList
// ---------------------------------------------------------------------------

impl<T> MutableVectorList<T> {
    /// Creates an empty mutable list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            vector: Vector::new(),
            generation: Generation::fresh(),
            modifications: 0,
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.vector.len()
    }

    /// Returns `true` if the list has no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.vector.is_empty()
    }

    /// Returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn get(&self, index: usize) -> Result<&T> {
        self.vector
            .get(index)
            .ok_or_else(|| out_of_range(index, self.len()))
    }

    /// Returns the first element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`] if the list is empty.
    pub fn first(&self) -> Result<&T> {
        self.vector.first().ok_or(Error::EmptyCollection)
    }

    /// Returns the last element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`] if the list is empty.
    pub fn last(&self) -> Result<&T> {
        self.vector.last().ok_or(Error::EmptyCollection)
    }

    /// Returns a double-ended iterator over the elements.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        self.vector.iter()
    }

    /// Converts into a persistent list. O(1).
    #[must_use]
    pub fn into_immutable(self) -> VectorList<T> {
        VectorList {
            vector: self.vector,
        }
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.vector = Vector::new();
        self.modifications += 1;
    }
}

impl<T: Clone> MutableVectorList<T> {
    /// Publishes the current content as a persistent list.
    ///
    /// Copies at most the two edge buffers; trie nodes are shared.
    pub fn to_immutable(&mut self) -> VectorList<T> {
        self.generation = Generation::fresh();
        VectorList {
            vector: self.vector.clone(),
        }
    }

    /// Returns a detached cursor that fails once this list is structurally
    /// modified.
    #[must_use]
    pub fn cursor(&self) -> ListCursor<T> {
        ListCursor {
            snapshot: self.vector.clone(),
            position: 0,
            expected: self.modifications,
        }
    }

    /// Appends `value`.
    pub fn push_back(&mut self, value: T) {
        self.vector.push_back(value, self.generation);
        self.modifications += 1;
    }

    /// Prepends `value`.
    pub fn push_front(&mut self, value: T) {
        self.vector.push_front(value, self.generation);
        self.modifications += 1;
    }

    /// Removes and returns the last element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`] if the list is empty.
    pub fn pop_back(&mut self) -> Result<T> {
        let value = self
            .vector
            .pop_back(self.generation)
            .ok_or(Error::EmptyCollection)?;
        self.modifications += 1;
        Ok(value)
    }

    /// Removes and returns the first element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`] if the list is empty.
    pub fn pop_front(&mut self) -> Result<T> {
        let value = self
            .vector
            .pop_front(self.generation)
            .ok_or(Error::EmptyCollection)?;
        self.modifications += 1;
        Ok(value)
    }

    /// Replaces the element at `index`, returning the old one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        let len = self.len();
        if index >= len {
            return Err(out_of_range(index, len));
        }
        self.vector
            .set(index, value, self.generation)
            .ok_or_else(|| out_of_range(index, len))
    }

    /// Inserts `value` before position `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        if index > self.len() {
            return Err(out_of_range(index, self.len()));
        }
        self.vector.insert(index, value, self.generation);
        self.modifications += 1;
        Ok(())
    }

    /// Removes and returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn remove(&mut self, index: usize) -> Result<T> {
        let len = self.len();
        let value = self
            .vector
            .remove(index, self.generation)
            .ok_or_else(|| out_of_range(index, len))?;
        self.modifications += 1;
        Ok(value)
    }

    /// Keeps the first `n` elements.
    pub fn truncate(&mut self, n: usize) {
        if n < self.len() {
            self.vector.truncate(n, self.generation);
            self.modifications += 1;
        }
    }

    /// Drops the first `n` elements.
    pub fn skip(&mut self, n: usize) {
        if n > 0 && !self.is_empty() {
            self.vector.skip(n, self.generation);
            self.modifications += 1;
        }
    }

    /// Appends every element of `other`.
    pub fn append(&mut self, other: &VectorList<T>) {
        if other.is_empty() {
            return;
        }
        self.vector.concat(other.vector.clone(), self.generation);
        self.modifications += 1;
    }
}

impl<T> ModificationCount for MutableVectorList<T> {
    fn modification_count(&self) -> u64 {
        self.modifications
    }
}

/// Detached, fail-fast cursor over a [`MutableVectorList`].
pub struct ListCursor<T> {
    snapshot: Vector<T>,
    position: usize,
    expected: u64,
}

impl<T: Clone> ListCursor<T> {
    /// Advances the cursor, checking `source` for modifications first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConcurrentModification`] if `source` was
    /// structurally modified after the cursor was created.
    pub fn next_in<C: ModificationCount>(&mut self, source: &C) -> Result<Option<T>> {
        if source.modification_count() != self.expected {
            return Err(Error::ConcurrentModification);
        }
        let item = self.snapshot.get(self.position).cloned();
        if item.is_some() {
            self.position += 1;
        }
        Ok(item)
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<T: Clone> Clone for VectorList<T> {
    fn clone(&self) -> Self {
        Self {
            vector: self.vector.clone(),
        }
    }
}

impl<T> Default for VectorList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Default for MutableVectorList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for VectorList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Debug> fmt::Debug for MutableVectorList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for VectorList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.vector == other.vector
    }
}

impl<T: Eq> Eq for VectorList<T> {}

impl<T: Clone> Extend<T> for MutableVectorList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T: Clone> FromIterator<T> for MutableVectorList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T: Clone> FromIterator<T> for VectorList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter()
            .collect::<MutableVectorList<T>>()
            .into_immutable()
    }
}

impl<T: Clone, const N: usize> From<[T; N]> for VectorList<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<T> From<MutableVectorList<T>> for VectorList<T> {
    fn from(list: MutableVectorList<T>) -> Self {
        list.into_immutable()
    }
}

impl<T> ops::Index<usize> for VectorList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        self.vector.get(index).expect("index out of range")
    }
}

impl<T> ops::Index<usize> for MutableVectorList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        self.vector.get(index).expect("index out of range")
    }
}

impl<'a, T> IntoIterator for &'a VectorList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a MutableVectorList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
