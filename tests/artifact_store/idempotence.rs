//! Puts with nothing uncommitted

use crate::common::*;

#[test]
fn second_put_writes_nothing() {
    let test = TestStore::new();
    let mut account = account_with_deposits(&[5, 5]);
    let id = account.id();

    test.store.put(&mut account).unwrap();
    let sequence = test.source.last_sequence_number();

    test.store.put(&mut account).unwrap();
    test.store.put(&mut account).unwrap();

    assert_eq!(test.source.version_of(id), Some(2));
    assert_eq!(test.source.last_sequence_number(), sequence);
    assert_eq!(test.store.get(id).unwrap().revision(), 2);
}

#[test]
fn untouched_new_account_is_not_stored() {
    let test = TestStore::new();
    let mut account = new_account();
    test.store.put(&mut account).unwrap();
    assert!(!test.store.has(account.id()));
    assert!(test.source.is_empty());
}

#[test]
fn reloaded_account_put_is_noop() {
    let test = TestStore::new();
    let id = test.seed(&[1, 2]);

    let mut loaded = test.store.get(id).unwrap();
    test.store.put(&mut loaded).unwrap();
    assert_eq!(test.source.version_of(id), Some(2));
}
