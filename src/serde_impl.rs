//! `serde` support for the persistent collections.
//!
//! Only logical content is written: maps as serde maps, sets and lists as
//! sequences, each in iteration order. Node layout never reaches the wire.
//! Deserialization batch-builds through the mutable counterpart.

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use serde::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};

use crate::{
    ChampMap, ChampSet, MutableChampMap, MutableChampSet, MutableSequencedChampMap,
    MutableSequencedChampSet, MutableVectorList, SequencedChampMap, SequencedChampSet, VectorList,
};

struct MapVisitor<M, K, V> {
    phantom: PhantomData<(M, K, V)>,
}

impl<'de, M, K, V> Visitor<'de> for MapVisitor<M, K, V>
where
    M: Default + Extend<(K, V)>,
    K: Deserialize<'de>,
    V: Deserialize<'de>,
{
    type Value = M;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<M, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut out = M::default();
        while let Some(entry) = access.next_entry()? {
            out.extend(Some(entry));
        }
        Ok(out)
    }
}

struct SeqVisitor<M, T> {
    phantom: PhantomData<(M, T)>,
}

impl<'de, M, T> Visitor<'de> for SeqVisitor<M, T>
where
    M: Default + Extend<T>,
    T: Deserialize<'de>,
{
    type Value = M;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<M, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut out = M::default();
        while let Some(value) = access.next_element()? {
            out.extend(Some(value));
        }
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// Maps
// ---------------------------------------------------------------------------

impl<K: Serialize, V: Serialize> Serialize for ChampMap<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self)
    }
}

impl<'de, K, V> Deserialize<'de> for ChampMap<K, V>
where
    K: Hash + Eq + Clone + Deserialize<'de>,
    V: Clone + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer
            .deserialize_map(MapVisitor::<MutableChampMap<K, V>, K, V> {
                phantom: PhantomData,
            })
            .map(MutableChampMap::into_immutable)
    }
}

impl<K: Hash + Eq + Serialize, V: Serialize> Serialize for SequencedChampMap<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self)
    }
}

impl<'de, K, V> Deserialize<'de> for SequencedChampMap<K, V>
where
    K: Hash + Eq + Clone + Deserialize<'de>,
    V: Clone + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer
            .deserialize_map(MapVisitor::<MutableSequencedChampMap<K, V>, K, V> {
                phantom: PhantomData,
            })
            .map(MutableSequencedChampMap::into_immutable)
    }
}

// ---------------------------------------------------------------------------
// Sets and lists
// ---------------------------------------------------------------------------

impl<K: Serialize> Serialize for ChampSet<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self)
    }
}

impl<'de, K> Deserialize<'de> for ChampSet<K>
where
    K: Hash + Eq + Clone + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer
            .deserialize_seq(SeqVisitor::<MutableChampSet<K>, K> {
                phantom: PhantomData,
            })
            .map(MutableChampSet::into_immutable)
    }
}

impl<K: Hash + Eq + Serialize> Serialize for SequencedChampSet<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self)
    }
}

impl<'de, K> Deserialize<'de> for SequencedChampSet<K>
where
    K: Hash + Eq + Clone + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer
            .deserialize_seq(SeqVisitor::<MutableSequencedChampSet<K>, K> {
                phantom: PhantomData,
            })
            .map(MutableSequencedChampSet::into_immutable)
    }
}

impl<T: Serialize> Serialize for VectorList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self)
    }
}

impl<'de, T> Deserialize<'de> for VectorList<T>
where
    T: Clone + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer
            .deserialize_seq(SeqVisitor::<MutableVectorList<T>, T> {
                phantom: PhantomData,
            })
            .map(MutableVectorList::into_immutable)
    }
}
