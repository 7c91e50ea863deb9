use super::{assert_invariants, shape};
use crate::{ChampMap, MutableChampMap};

fn build(pairs: &[(i32, i32)]) -> ChampMap<i32, i32> {
    let mut m = ChampMap::new();
    for &(k, v) in pairs {
        m = m.insert(k, v);
    }
    m
}

/// Insertion order must not affect the resulting structure.
#[test]
fn insert_order_abc_cba_bca() {
    let orders: [&[(i32, i32)]; 3] = [
        &[(1, 10), (2, 20), (3, 30)],
        &[(3, 30), (2, 20), (1, 10)],
        &[(2, 20), (3, 30), (1, 10)],
    ];

    let maps: Vec<ChampMap<i32, i32>> = orders.iter().map(|pairs| build(pairs)).collect();

    assert_eq!(shape(maps[0].trie()), shape(maps[1].trie()));
    assert_eq!(shape(maps[1].trie()), shape(maps[2].trie()));
    assert_eq!(maps[0], maps[1]);
    assert_eq!(maps[1], maps[2]);
}

/// Larger set: 1000 entries, three orderings.
#[test]
fn insert_order_1000_entries() {
    let entries: Vec<(i32, i32)> = (0..1000).map(|i| (i, i * 7)).collect();

    let forward = build(&entries);
    let reversed: Vec<_> = entries.iter().rev().copied().collect();
    let backward = build(&reversed);
    let interleaved: Vec<_> = entries
        .iter()
        .step_by(2)
        .chain(entries.iter().skip(1).step_by(2))
        .copied()
        .collect();
    let interleaved = build(&interleaved);

    assert_eq!(shape(forward.trie()), shape(backward.trie()));
    assert_eq!(shape(forward.trie()), shape(interleaved.trie()));
    assert_invariants(forward.trie());
}

/// After overwrite, order independence still holds.
#[test]
fn overwrite_preserves_canonicity() {
    let map_a = build(&[(1, 10), (2, 20), (1, 11)]);
    let map_b = build(&[(2, 20), (1, 11)]);

    assert_eq!(shape(map_a.trie()), shape(map_b.trie()));
    assert_eq!(map_a, map_b);
}

/// After delete, the trie collapses to the shape of a fresh build.
#[test]
fn delete_preserves_canonicity() {
    let full = build(&(0..500).map(|i| (i, i)).collect::<Vec<_>>());
    let mut pruned = full.clone();
    for i in (0..500).filter(|i| i % 3 != 0) {
        pruned = pruned.remove(&i);
    }
    let fresh = build(&(0..500).filter(|i| i % 3 == 0).map(|i| (i, i)).collect::<Vec<_>>());

    assert_eq!(shape(pruned.trie()), shape(fresh.trie()));
    assert_invariants(pruned.trie());
}

/// Insert everything then delete everything: back to an empty root.
#[test]
fn insert_delete_all_returns_to_empty_shape() {
    let mut map = MutableChampMap::new();
    for i in 0..2000 {
        map.insert(i, ());
    }
    for i in 0..2000 {
        map.remove(&i);
    }
    let map = map.into_immutable();
    assert_eq!(shape(map.trie()), shape(ChampMap::<i32, ()>::new().trie()));
}

/// Mutable and persistent builds of the same content agree on shape.
#[test]
fn mutable_and_persistent_builds_match() {
    let persistent = build(&(0..777).map(|i| (i, -i)).collect::<Vec<_>>());
    let mutable: ChampMap<i32, i32> = (0..777).rev().map(|i| (i, -i)).collect();

    assert_eq!(shape(persistent.trie()), shape(mutable.trie()));
    assert_invariants(mutable.trie());
}

/// Equal content implies equal iteration order, since order follows shape.
#[test]
fn iteration_order_follows_content() {
    let a = build(&(0..200).map(|i| (i, i)).collect::<Vec<_>>());
    let b = build(&(0..200).rev().map(|i| (i, i)).collect::<Vec<_>>());
    let ka: Vec<_> = a.keys().collect();
    let kb: Vec<_> = b.keys().collect();
    assert_eq!(ka, kb);
}

/// `None` is an ordinary key: its hash is fixed, so where it lands is too.
#[test]
fn null_key_has_stable_position() {
    let null_first: ChampMap<Option<i32>, i32> = std::iter::once((None, -1))
        .chain((0..300).map(|i| (Some(i), i)))
        .collect();
    let null_last: ChampMap<Option<i32>, i32> = (0..300)
        .rev()
        .map(|i| (Some(i), i))
        .chain(std::iter::once((None, -1)))
        .collect();

    assert_eq!(
        crate::hash::hash_one(&None::<i32>),
        crate::hash::hash_one(&None::<u64>)
    );
    assert_eq!(shape(null_first.trie()), shape(null_last.trie()));
    assert_eq!(null_first.get(&None), Some(&-1));
    assert_invariants(null_last.trie());
}
