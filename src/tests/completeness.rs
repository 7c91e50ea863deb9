//! Completeness tests: insert/remove must not lose data, in any collection.

use crate::{
    ChampMap, MutableChampMap, MutableChampSet, MutableSequencedChampMap, MutableVectorList,
    SequencedChampMap,
};

// ---------------------------------------------------------------------------
// insert must return the old value when updating
// ---------------------------------------------------------------------------

#[test]
fn insert_update_chain() {
    let mut map = MutableChampMap::new();
    assert_eq!(map.insert("k", 10), None);
    assert_eq!(map.insert("k", 20), Some(10));
    assert_eq!(map.insert("k", 30), Some(20));
    assert_eq!(map.get(&"k"), Some(&30));
}

#[test]
fn sequenced_insert_update_chain() {
    let mut map = MutableSequencedChampMap::new();
    assert_eq!(map.insert("k", 10), None);
    assert_eq!(map.insert("k", 20), Some(10));
    assert_eq!(map.insert_first("k", 30), Some(20));
    assert_eq!(map.insert_last("k", 40), Some(30));
    assert_eq!(map.get(&"k"), Some(&40));
    assert_eq!(map.len(), 1);
}

#[test]
fn set_insert_reports_novelty() {
    let mut set = MutableChampSet::new();
    assert!(set.insert(1));
    assert!(!set.insert(1));
    assert!(set.remove(&1));
    assert!(!set.remove(&1));
}

// ---------------------------------------------------------------------------
// remove must return the removed value
// ---------------------------------------------------------------------------

#[test]
fn remove_returns_correct_value_among_many() {
    let mut map = MutableChampMap::new();
    for i in 0..100 {
        map.insert(i, i * 10);
    }
    assert_eq!(map.remove(&50), Some(500));
    assert_eq!(map.remove(&50), None);
    assert_eq!(map.len(), 99);
}

#[test]
fn sequenced_remove_returns_value() {
    let mut map = MutableSequencedChampMap::new();
    for i in 0..100 {
        map.insert(i, i * 10);
    }
    assert_eq!(map.remove(&50), Some(500));
    assert_eq!(map.remove(&50), None);
    assert_eq!(map.remove_first(), Ok((0, 0)));
    assert_eq!(map.remove_last(), Ok((99, 990)));
    assert_eq!(map.len(), 97);
}

#[test]
fn list_remove_returns_value() {
    let mut list: MutableVectorList<i32> = (0..100).collect();
    assert_eq!(list.remove(40), Ok(40));
    assert_eq!(list.pop_front(), Ok(0));
    assert_eq!(list.pop_back(), Ok(99));
    assert_eq!(list.len(), 97);
    assert_eq!(list.get(39), Ok(&41));
}

// ---------------------------------------------------------------------------
// every element survives a round trip through both forms
// ---------------------------------------------------------------------------

#[test]
fn map_survives_freeze_thaw() {
    let map: ChampMap<u32, String> = (0..1000).map(|i| (i, i.to_string())).collect();
    let thawed = map.to_mutable();
    let refrozen = thawed.into_immutable();
    assert_eq!(refrozen, map);
    for i in 0..1000 {
        assert_eq!(refrozen.get(&i), Some(&i.to_string()));
    }
}

#[test]
fn sequenced_map_survives_freeze_thaw() {
    let map: SequencedChampMap<u32, u32> = (0..1000).rev().map(|i| (i, i)).collect();
    let mut thawed = map.to_mutable();
    let refrozen = thawed.to_immutable();
    let keys: Vec<u32> = refrozen.keys().copied().collect();
    assert_eq!(keys, (0..1000).rev().collect::<Vec<_>>());
}
