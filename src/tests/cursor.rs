use crate::error::Error;
use crate::{
    MutableChampMap, MutableChampSet, MutableSequencedChampMap, MutableSequencedChampSet,
    MutableVectorList,
};

#[test]
fn cursor_walks_every_entry() {
    let map: MutableChampMap<u32, u32> = (0..500).map(|i| (i, i * 2)).collect();
    let mut cursor = map.cursor();
    let mut seen = Vec::new();
    while let Some((k, v)) = cursor.next_in(&map).unwrap() {
        assert_eq!(v, k * 2);
        seen.push(k);
    }
    seen.sort_unstable();
    assert_eq!(seen, (0..500).collect::<Vec<_>>());
}

#[test]
fn cursor_order_matches_iter() {
    let map: MutableChampMap<u32, ()> = (0..300).map(|i| (i, ())).collect();
    let mut cursor = map.cursor();
    for (k, ()) in map.iter() {
        assert_eq!(cursor.next_in(&map), Ok(Some((*k, ()))));
    }
    assert_eq!(cursor.next_in(&map), Ok(None));
}

#[test]
fn insert_invalidates_cursor() {
    let mut map: MutableChampMap<u32, u32> = (0..10).map(|i| (i, i)).collect();
    let mut cursor = map.cursor();
    assert!(cursor.next_in(&map).unwrap().is_some());
    map.insert(100, 100);
    assert_eq!(cursor.next_in(&map), Err(Error::ConcurrentModification));
}

#[test]
fn value_replacement_is_not_structural() {
    let mut map: MutableChampMap<u32, u32> = (0..10).map(|i| (i, i)).collect();
    let mut cursor = map.cursor();
    map.insert(3, 33);
    assert!(cursor.next_in(&map).is_ok());
}

#[test]
fn cursor_sees_its_snapshot_only() {
    let mut map: MutableChampMap<u32, u32> = (0..10).map(|i| (i, i)).collect();
    let mut cursor = map.cursor();
    if let Some(v) = map.get_mut(&0) {
        *v = 1000;
    }
    let mut values = Vec::new();
    while let Some((_, v)) = cursor.next_in(&map).unwrap() {
        values.push(v);
    }
    assert!(!values.contains(&1000));
    assert_eq!(map.get(&0), Some(&1000));
}

#[test]
fn restart_after_failure() {
    let mut set: MutableChampSet<u32> = (0..10).collect();
    let mut cursor = set.cursor();
    set.remove(&0);
    assert_eq!(cursor.next_in(&set), Err(Error::ConcurrentModification));

    let mut fresh = set.cursor();
    let mut count = 0;
    while fresh.next_in(&set).unwrap().is_some() {
        count += 1;
    }
    assert_eq!(count, 9);
}

#[test]
fn sequenced_cursor_follows_order() {
    let mut map = MutableSequencedChampMap::new();
    for k in ["c", "a", "b"] {
        map.insert(k, k.len());
    }
    map.remove(&"a");
    let mut cursor = map.cursor();
    assert_eq!(cursor.next_in(&map), Ok(Some(("c", 1))));
    assert_eq!(cursor.next_in(&map), Ok(Some(("b", 1))));
    assert_eq!(cursor.next_in(&map), Ok(None));
}

#[test]
fn reordering_invalidates_sequenced_cursor() {
    let mut set: MutableSequencedChampSet<i32> = (0..5).collect();
    let mut cursor = set.cursor();
    set.insert_first(4);
    assert_eq!(cursor.next_in(&set), Err(Error::ConcurrentModification));
}

#[test]
fn list_cursor() {
    let mut list: MutableVectorList<i32> = (0..40).collect();
    let mut cursor = list.cursor();
    for expected in 0..40 {
        assert_eq!(cursor.next_in(&list), Ok(Some(expected)));
    }
    assert_eq!(cursor.next_in(&list), Ok(None));

    let mut cursor = list.cursor();
    list.set(0, 5).unwrap();
    assert!(cursor.next_in(&list).is_ok());
    list.push_back(40);
    assert_eq!(cursor.next_in(&list), Err(Error::ConcurrentModification));
}
