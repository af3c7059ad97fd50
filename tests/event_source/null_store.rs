//! The null store as an event source

use crate::common::*;
use eventide::NullStore;
use std::sync::Arc;

#[test]
fn artifact_store_over_null_source_keeps_nothing() {
    init_tracing();
    let dispatcher = ledger();
    let store = ArtifactStore::new(
        NullStore::<MemoryStream>::new(),
        MemoryStream::detached,
        move |id: ObjectId, _: Revision| Account::new(id, Arc::clone(&dispatcher), Balance::default()),
    );

    let mut account = account_with_deposits(&[10, 5]);
    let id = account.id();
    store.put(&mut account).unwrap();

    assert!(!account.has_uncommitted_events());
    assert!(!store.has(id));
    assert_eq!(store.get(id).unwrap_err(), Error::NotFound(id));
}

#[test]
fn null_store_contract() {
    let store = NullStore::<MemoryStream>::new();
    let id = ObjectId::new();
    let mut stream = MemoryStream::detached(id);

    assert!(!store.has(id));
    assert!(store.get(id).unwrap_err().is_not_found());
    assert_eq!(store.get(ObjectId::NULL).unwrap_err(), Error::NullIdentity("id"));
    store.put(&mut stream).unwrap();
    assert!(!store.has(id));
    assert_eq!(store.put_opt(None), Err(Error::NullPointer("value")));
}
