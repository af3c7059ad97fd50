//! Partial-revision replay through get_at

use crate::common::*;
use std::sync::Arc;

#[test]
fn get_at_stops_at_requested_revision() {
    let test = TestStore::new();
    let id = test.seed(&[1, 2, 4, 8, 16]);

    for (revision, amount) in [(1, 1), (2, 3), (3, 7), (4, 15), (5, 31)] {
        let account = test.store.get_at(id, revision).unwrap();
        assert_eq!(account.revision(), revision);
        assert_eq!(account.state().amount, amount);
    }
}

#[test]
fn get_at_beyond_head_is_latest() {
    let test = TestStore::new();
    let id = test.seed(&[1, 2]);
    let account = test.store.get_at(id, 100).unwrap();
    assert_eq!(account.revision(), 2);
    assert_eq!(account.state().amount, 3);
}

#[test]
fn historical_view_cannot_be_saved_over_newer_history() {
    let test = TestStore::new();
    let id = test.seed(&[1, 2, 3]);

    let mut past = test.store.get_at(id, 1).unwrap();
    past.apply_change(Deposited { amount: 100 });
    let err = test.store.put(&mut past).unwrap_err();
    assert_eq!(
        err,
        Error::ConcurrencyConflict {
            id,
            expected: 1,
            actual: 3,
        }
    );
}

#[test]
fn snapshot_factory_replays_only_the_tail() {
    let source = Arc::new(MemoryEventSource::new());
    let id = {
        let streams = source.stream_factory();
        let dispatcher = ledger();
        let store = ArtifactStore::new(Arc::clone(&source), streams, move |id: ObjectId, _: Revision| {
            Account::new(id, Arc::clone(&dispatcher), Balance::default())
        });
        let mut account = account_with_deposits(&[10, 20, 30, 40]);
        store.put(&mut account).unwrap();
        account.id()
    };

    // Pretend a snapshot of the first two deposits exists.
    let streams = source.stream_factory();
    let dispatcher = ledger();
    let store = ArtifactStore::new(Arc::clone(&source), streams, move |id: ObjectId, _: Revision| {
        let snapshot = Balance {
            amount: 30,
            transactions: 2,
            ..Balance::default()
        };
        Account::with_revision(id, 2, Arc::clone(&dispatcher), snapshot)
    });

    let account = store.get(id).unwrap();
    assert_eq!(account.revision(), 4);
    assert_eq!(account.state().amount, 100);
    assert_eq!(account.state().transactions, 4);

    let at_snapshot = store.get_at(id, 2).unwrap();
    assert_eq!(at_snapshot.state().amount, 30);
}

#[test]
fn batched_replay_matches_single_read() {
    let batched = TestStore::with_config(StoreConfig {
        replay_batch_size: Some(2),
        ..StoreConfig::default()
    });
    let id = batched.seed(&[1, 2, 3, 4, 5]);

    let whole = batched.sibling();
    let a = batched.store.get(id).unwrap();
    let b = whole.store.get(id).unwrap();
    assert_eq!(a.state(), b.state());
    assert_eq!(a.revision(), 5);
}
