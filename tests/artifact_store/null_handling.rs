//! Null identities, missing objects and unknown ids

use crate::common::*;

#[test]
fn unknown_id_is_absent() {
    let test = TestStore::new();
    let id = ObjectId::new();
    assert!(!test.store.has(id));
    assert_eq!(test.store.get(id).unwrap_err(), Error::NotFound(id));
    assert!(test.store.get_at(id, 3).unwrap_err().is_not_found());
}

#[test]
fn null_id_is_never_present() {
    let test = TestStore::new();
    assert!(!test.store.has(ObjectId::NULL));
    assert_eq!(
        test.store.get(ObjectId::NULL).unwrap_err(),
        Error::NullIdentity("id")
    );
}

#[test]
fn put_nothing_is_null_pointer() {
    let test = TestStore::new();
    assert_eq!(test.store.put_opt(None), Err(Error::NullPointer("value")));
}

#[test]
fn put_null_identity_writes_nothing() {
    let test = TestStore::new();
    let mut account = Account::new(ObjectId::NULL, ledger(), Balance::default());
    account.apply_change(Deposited { amount: 1 });

    let err = test.store.put(&mut account).unwrap_err();
    assert_eq!(err, Error::NullIdentity("object.id()"));
    assert!(account.has_uncommitted_events());
    assert!(test.source.is_empty());
}

#[test]
fn put_some_delegates_to_put() {
    let test = TestStore::new();
    let mut account = account_with_deposits(&[3]);
    test.store.put_opt(Some(&mut account)).unwrap();
    assert!(test.store.has(account.id()));
}
