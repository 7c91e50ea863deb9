//! Root-and-size wrapper over the CHAMP node algorithms.
//!
//! Shared by maps, sets and the sequenced layer. Every write takes the
//! [`Generation`] of the caller: persistent collections pass
//! [`Generation::NONE`] and get a path copy, mutable ones pass their live
//! generation and edit the nodes they already own.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use crate::hash;
use crate::node::{Entry, Node};
use crate::ops::get::{get_mut_recursive, get_recursive};
use crate::ops::insert::insert_recursive;
use crate::ops::remove::remove_recursive;
use crate::owner::Generation;

pub struct Trie<K, V> {
    root: Arc<Node<K, V>>,
    size: usize,
}

impl<K, V> Trie<K, V> {
    pub fn new() -> Self {
        Self {
            root: Arc::new(Node::empty(Generation::NONE)),
            size: 0,
        }
    }

    pub const fn len(&self) -> usize {
        self.size
    }

    pub const fn root(&self) -> &Arc<Node<K, V>> {
        &self.root
    }

    /// Returns `true` if both tries share the same root node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.root, &other.root)
    }
}

impl<K: Hash + Eq, V> Trie<K, V> {
    pub fn get<Q>(&self, key: &Q) -> Option<&Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        get_recursive(&self.root, hash::hash_one(key), key, 0)
    }
}

impl<K: Hash + Eq + Clone, V: Clone> Trie<K, V> {
    /// Inserts or replaces; returns the previous value of `key`.
    pub fn insert(&mut self, key: K, value: V, generation: Generation) -> Option<V> {
        let hash = hash::hash_one(&key);
        let entry = Entry { hash, key, value };
        let old = insert_recursive(&mut self.root, entry, 0, generation);
        if old.is_none() {
            self.size += 1;
        }
        old
    }

    /// Returns the value of `key` for writing. An absent key leaves every
    /// node untouched.
    pub fn get_mut<Q>(&mut self, key: &Q, generation: Generation) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = hash::hash_one(key);
        get_recursive(&self.root, hash, key, 0)?;
        get_mut_recursive(&mut self.root, hash, key, 0, generation).map(|e| &mut e.value)
    }

    /// Removes `key`. An absent key leaves every node untouched.
    pub fn remove<Q>(&mut self, key: &Q, generation: Generation) -> Option<Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = hash::hash_one(key);
        get_recursive(&self.root, hash, key, 0)?;
        let removed = remove_recursive(&mut self.root, hash, key, 0, generation);
        debug_assert!(removed.is_some(), "lookup and removal disagree");
        if removed.is_some() {
            self.size -= 1;
        }
        removed
    }
}

impl<K, V> Clone for Trie<K, V> {
    fn clone(&self) -> Self {
        Self {
            root: Arc::clone(&self.root),
            size: self.size,
        }
    }
}

impl<K, V> Default for Trie<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for Trie<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trie")
            .field("len", &self.size)
            .field("root", &self.root)
            .finish()
    }
}
