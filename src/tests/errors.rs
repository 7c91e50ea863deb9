use crate::error::Error;
use crate::{MutableSequencedChampMap, MutableVectorList, SequencedChampSet, VectorList};

#[test]
fn error_messages() {
    assert_eq!(Error::EmptyCollection.to_string(), "collection is empty");
    assert_eq!(
        Error::IndexOutOfRange { index: 5, len: 2 }.to_string(),
        "index 5 out of range for length 2"
    );
    assert_eq!(
        Error::ConcurrentModification.to_string(),
        "collection was structurally modified during iteration"
    );
}

#[test]
fn errors_propagate_with_question_mark() {
    fn second_of(list: &VectorList<i32>) -> crate::Result<i32> {
        let first = *list.first()?;
        let second = *list.get(1)?;
        Ok(first + second)
    }
    assert_eq!(second_of(&VectorList::from([1, 2])), Ok(3));
    assert_eq!(second_of(&VectorList::new()), Err(Error::EmptyCollection));
    assert_eq!(
        second_of(&VectorList::from([1])),
        Err(Error::IndexOutOfRange { index: 1, len: 1 })
    );
}

#[test]
fn absent_keys_are_not_errors() {
    let mut map: MutableSequencedChampMap<i32, i32> = MutableSequencedChampMap::new();
    assert_eq!(map.get(&1), None);
    assert_eq!(map.remove(&1), None);
    assert_eq!(map.remove_first(), Err(Error::EmptyCollection));
}

#[test]
fn failed_operations_leave_collections_unchanged() {
    let mut list: MutableVectorList<i32> = (0..3).collect();
    assert!(list.insert(9, 0).is_err());
    assert!(list.remove(3).is_err());
    assert!(list.set(3, 0).is_err());
    assert_eq!(list.len(), 3);

    let set: SequencedChampSet<i32> = SequencedChampSet::new();
    assert!(set.remove_last().is_err());
    assert!(set.is_empty());
}

#[test]
fn error_is_std_error() {
    fn boxed() -> Result<(), Box<dyn std::error::Error>> {
        VectorList::<i32>::new().last()?;
        Ok(())
    }
    assert!(boxed().is_err());
}
