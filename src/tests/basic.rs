use crate::{ChampMap, MutableChampMap};

#[test]
fn empty_map() {
    let map: ChampMap<String, i32> = ChampMap::new();
    assert_eq!(map.len(), 0);
    assert!(map.is_empty());
    assert_eq!(map.iter().count(), 0);
}

#[test]
fn insert_one() {
    let empty = ChampMap::new();
    let map = empty.insert("hello", 42);
    assert_eq!(map.len(), 1);
    assert!(!map.is_empty());
    assert!(empty.is_empty());
}

#[test]
fn insert_and_get() {
    let map = ChampMap::new().insert("key", 100);
    assert_eq!(map.get(&"key"), Some(&100));
    assert_eq!(map.get_key_value(&"key"), Some((&"key", &100)));
}

#[test]
fn get_missing_key() {
    let map = ChampMap::new().insert("a", 1);
    assert_eq!(map.get(&"b"), None);
}

#[test]
fn insert_multiple() {
    let mut map = ChampMap::new();
    for i in 0..10 {
        map = map.insert(i, i * 10);
    }
    assert_eq!(map.len(), 10);
    for i in 0..10 {
        assert_eq!(map.get(&i), Some(&(i * 10)));
    }
}

#[test]
fn overwrite_value() {
    let v1 = ChampMap::new().insert("k", 1);
    let v2 = v1.insert("k", 2);
    assert_eq!(v2.len(), 1);
    assert_eq!(v2.get(&"k"), Some(&2));
    assert_eq!(v1.get(&"k"), Some(&1));
}

#[test]
fn contains_key() {
    let map = ChampMap::new().insert(42, "val");
    assert!(map.contains_key(&42));
    assert!(!map.contains_key(&99));
}

#[test]
fn remove_existing() {
    let map = ChampMap::new().insert(1, "a").insert(2, "b");
    let removed = map.remove(&1);
    assert_eq!(removed.len(), 1);
    assert_eq!(removed.get(&1), None);
    assert_eq!(removed.get(&2), Some(&"b"));
}

#[test]
fn remove_missing_shares_root() {
    let map = ChampMap::new().insert(1, "a");
    let same = map.remove(&7);
    assert!(same.ptr_eq(&map));
}

#[test]
fn remove_all() {
    let mut map = ChampMap::new();
    for i in 0..100 {
        map = map.insert(i, i);
    }
    for i in 0..100 {
        map = map.remove(&i);
    }
    assert!(map.is_empty());
    assert_eq!(map.iter().count(), 0);
}

#[test]
fn borrowed_lookup() {
    let map = ChampMap::new().insert(String::from("owned"), 1);
    assert_eq!(map.get("owned"), Some(&1));
    assert!(map.contains_key("owned"));
    assert!(map.remove("owned").is_empty());
}

#[test]
fn option_keys_hold_null() {
    let map = ChampMap::new().insert(None, 0).insert(Some(1), 1);
    assert_eq!(map.get(&None::<i32>), Some(&0));
    assert_eq!(map.get(&Some(1)), Some(&1));
    assert_eq!(map.remove(&None::<i32>).len(), 1);
}

#[test]
fn keys_and_values() {
    let map: ChampMap<i32, i32> = (0..20).map(|i| (i, i * 2)).collect();
    let mut keys: Vec<i32> = map.keys().copied().collect();
    keys.sort_unstable();
    assert_eq!(keys, (0..20).collect::<Vec<_>>());
    let total: i32 = map.values().sum();
    assert_eq!(total, (0..20).map(|i| i * 2).sum::<i32>());
}

#[test]
fn iter_exact_size() {
    let map: ChampMap<u32, u32> = (0..300).map(|i| (i, i)).collect();
    let mut iter = map.iter();
    assert_eq!(iter.len(), 300);
    iter.next();
    assert_eq!(iter.len(), 299);
}

// ---------------------------------------------------------------------------
// MutableChampMap
// ---------------------------------------------------------------------------

#[test]
fn mutable_insert_returns_old_value() {
    let mut map = MutableChampMap::new();
    assert_eq!(map.insert("k", 1), None);
    assert_eq!(map.insert("k", 2), Some(1));
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&"k"), Some(&2));
}

#[test]
fn mutable_remove() {
    let mut map = MutableChampMap::new();
    map.insert(1, "a");
    map.insert(2, "b");
    assert_eq!(map.remove(&1), Some("a"));
    assert_eq!(map.remove(&1), None);
    assert_eq!(map.len(), 1);
    assert!(!map.contains_key(&1));
}

#[test]
fn mutable_get_mut() {
    let mut map = MutableChampMap::new();
    map.insert("count", 0);
    for _ in 0..5 {
        if let Some(v) = map.get_mut(&"count") {
            *v += 1;
        }
    }
    assert_eq!(map.get(&"count"), Some(&5));
    assert!(map.get_mut(&"missing").is_none());
}

#[test]
fn mutable_clear() {
    let mut map: MutableChampMap<i32, i32> = (0..50).map(|i| (i, i)).collect();
    map.clear();
    assert!(map.is_empty());
    map.insert(1, 1);
    assert_eq!(map.len(), 1);
}

#[test]
fn mutable_large_batch() {
    let mut map = MutableChampMap::new();
    for i in 0..10_000_u64 {
        map.insert(i, i + 1);
    }
    assert_eq!(map.len(), 10_000);
    for i in (0..10_000_u64).step_by(2) {
        assert_eq!(map.remove(&i), Some(i + 1));
    }
    assert_eq!(map.len(), 5_000);
    let frozen = map.into_immutable();
    for i in 0..10_000_u64 {
        assert_eq!(frozen.contains_key(&i), i % 2 == 1);
    }
}
