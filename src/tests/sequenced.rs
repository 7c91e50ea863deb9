use crate::error::Error;
use crate::owner::Generation;
use crate::sequenced::SequencedTrie;
use crate::{
    MutableSequencedChampMap, MutableSequencedChampSet, SequencedChampMap, SequencedChampSet,
};

fn keys<V>(trie: &SequencedTrie<&'static str, V>) -> Vec<&'static str> {
    trie.iter().map(|(k, _)| *k).collect()
}

#[test]
fn insertion_order_abc() {
    let map = SequencedChampMap::new()
        .insert("a", 1)
        .insert("b", 2)
        .insert("c", 3);
    let entries: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(entries, [("a", 1), ("b", 2), ("c", 3)]);
}

#[test]
fn reinsert_keeps_position() {
    let map = SequencedChampMap::new()
        .insert("a", 1)
        .insert("b", 2)
        .insert("a", 10);
    let entries: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(entries, [("a", 10), ("b", 2)]);
}

#[test]
fn insert_first_and_last_move_keys() {
    let mut map = MutableSequencedChampMap::new();
    for k in ["a", "b", "c", "d"] {
        map.insert(k, ());
    }
    map.insert_first("c", ());
    map.insert_last("a", ());
    map.insert_first("e", ());
    let order: Vec<_> = map.keys().copied().collect();
    assert_eq!(order, ["e", "c", "b", "d", "a"]);
    assert_eq!(map.first(), Ok((&"e", &())));
    assert_eq!(map.last(), Ok((&"a", &())));
}

#[test]
fn reverse_iteration() {
    let map: SequencedChampMap<i32, i32> = (0..100).map(|i| (i, i)).collect();
    let back: Vec<i32> = map.keys().rev().copied().collect();
    assert_eq!(back, (0..100).rev().collect::<Vec<_>>());

    let mut iter = map.iter();
    assert_eq!(iter.next(), Some((&0, &0)));
    assert_eq!(iter.next_back(), Some((&99, &99)));
    assert_eq!(iter.len(), 98);
}

#[test]
fn remove_first_and_last() {
    let map: SequencedChampMap<i32, &str> = [(1, "x"), (2, "y"), (3, "z")].into_iter().collect();
    let tail = map.remove_first().unwrap();
    assert_eq!(tail.first(), Ok((&2, &"y")));
    let middle = tail.remove_last().unwrap();
    assert_eq!(middle.len(), 1);
    assert_eq!(middle.first(), middle.last());
    assert_eq!(map.len(), 3);
}

#[test]
fn empty_first_last_fail() {
    let map: SequencedChampMap<i32, i32> = SequencedChampMap::new();
    assert_eq!(map.first(), Err(Error::EmptyCollection));
    assert_eq!(map.last(), Err(Error::EmptyCollection));
    assert!(matches!(map.remove_first(), Err(Error::EmptyCollection)));

    let mut set: MutableSequencedChampSet<i32> = MutableSequencedChampSet::new();
    assert_eq!(set.remove_last(), Err(Error::EmptyCollection));
    set.insert(1);
    assert_eq!(set.remove_last(), Ok(1));
    assert_eq!(set.first(), Err(Error::EmptyCollection));
}

#[test]
fn removing_ends_keeps_first_last_live() {
    let mut map = MutableSequencedChampMap::new();
    for i in 0..10 {
        map.insert(i, i);
    }
    for i in 1..9 {
        map.remove(&i);
    }
    assert_eq!(map.first(), Ok((&0, &0)));
    assert_eq!(map.last(), Ok((&9, &9)));
    map.remove(&0);
    assert_eq!(map.first(), Ok((&9, &9)));
}

#[test]
fn sequenced_set_order() {
    let set: SequencedChampSet<&str> = ["x", "y", "z"].into_iter().collect();
    let set = set.insert_first("z").insert("w").remove(&"x");
    let order: Vec<_> = set.iter().copied().collect();
    assert_eq!(order, ["z", "y", "w"]);
    assert_eq!(set.first(), Ok(&"z"));
    assert_eq!(set.last(), Ok(&"w"));
    assert!(set.contains(&"y"));
}

#[test]
fn order_insensitive_equality() {
    let a: SequencedChampMap<i32, i32> = [(1, 1), (2, 2)].into_iter().collect();
    let b: SequencedChampMap<i32, i32> = [(2, 2), (1, 1)].into_iter().collect();
    assert_eq!(a, b);
    assert_ne!(a, b.insert(1, 5));
}

// ---------------------------------------------------------------------------
// Renumbering
// ---------------------------------------------------------------------------

#[test]
fn renumber_on_upper_exhaustion() {
    let g = Generation::fresh();
    let mut trie = SequencedTrie::starting_at(i32::MAX - 2);
    for k in ["a", "b", "c", "d", "e"] {
        trie.insert(k, (), g);
    }
    assert_eq!(keys(&trie), ["a", "b", "c", "d", "e"]);
    assert_eq!(trie.first_sequence(), 0);
    trie.insert_last("a", (), g);
    assert_eq!(keys(&trie), ["b", "c", "d", "e", "a"]);
}

#[test]
fn renumber_on_lower_exhaustion() {
    let g = Generation::fresh();
    let mut trie = SequencedTrie::starting_at(i32::MIN + 1);
    trie.insert("m", (), g);
    for k in ["c", "b", "a"] {
        trie.insert_first(k, (), g);
    }
    assert_eq!(keys(&trie), ["a", "b", "c", "m"]);
    assert!(trie.first_sequence() > i32::MIN);
    trie.insert("z", (), g);
    assert_eq!(keys(&trie), ["a", "b", "c", "m", "z"]);
}

#[test]
fn renumber_preserves_order_under_persistent_updates() {
    let mut trie = SequencedTrie::starting_at(i32::MAX - 1);
    trie.insert("x", 1, Generation::NONE);
    let before = trie.clone();
    trie.insert("y", 2, Generation::NONE);
    trie.insert("z", 3, Generation::NONE);
    assert_eq!(keys(&trie), ["x", "y", "z"]);
    assert_eq!(keys(&before), ["x"]);
    assert_eq!(before.first_sequence(), i32::MAX - 1);
}

#[test]
fn moves_across_both_ends_of_the_sequence_range() {
    for start in [i32::MAX - 3, i32::MIN + 3] {
        let g = Generation::fresh();
        let mut trie = SequencedTrie::starting_at(start);
        let mut model: Vec<&'static str> = Vec::new();
        for k in ["a", "b", "c", "d"] {
            trie.insert(k, (), g);
            model.push(k);
        }
        for round in 0..64 {
            let k = model[round % model.len()];
            model.retain(|m| *m != k);
            if round % 2 == 0 {
                trie.insert_first(k, (), g);
                model.insert(0, k);
            } else {
                trie.insert_last(k, (), g);
                model.push(k);
            }
            assert_eq!(keys(&trie), model);
            assert_eq!(trie.len(), 4);
        }
    }
}

#[test]
fn tombstones_are_compacted() {
    let g = Generation::fresh();
    let mut trie = SequencedTrie::new();
    for i in 0..1000 {
        trie.insert(i, i, g);
    }
    for i in (1..999).filter(|i| i % 10 != 0) {
        trie.remove(&i, g);
    }
    assert_eq!(trie.len(), 101);
    assert!(trie.span() <= 2 * trie.len() + 32);
    let order: Vec<i32> = trie.iter().map(|(k, _)| *k).collect();
    let expected: Vec<i32> = (0..1000).filter(|i| *i == 999 || i % 10 == 0).collect();
    assert_eq!(order, expected);
}

#[test]
fn moves_are_compacted() {
    let g = Generation::fresh();
    let mut trie = SequencedTrie::new();
    for i in 0..8 {
        trie.insert(i, (), g);
    }
    for round in 0..1000 {
        trie.insert_last(round % 8, (), g);
    }
    assert!(trie.span() <= 2 * trie.len() + 32);
    assert_eq!(trie.len(), 8);
}

#[test]
fn empty_after_removal_resets_numbering() {
    let g = Generation::fresh();
    let mut trie = SequencedTrie::new();
    trie.insert(1, (), g);
    trie.insert_first(0, (), g);
    trie.remove(&0, g);
    trie.remove(&1, g);
    assert_eq!(trie.span(), 0);
    assert_eq!(trie.first_sequence(), 0);
}
