//! Key hashing.
//!
//! The std `DefaultHasher` is constructed with fixed keys, so equal keys hash
//! identically in every collection instance. Canonical trie shape across
//! independently built collections depends on that.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Computes the 64-bit hash of a value using the standard hasher.
#[must_use]
pub fn hash_one<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}
