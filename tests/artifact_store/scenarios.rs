//! End-to-end account scenarios

use crate::common::*;

#[test]
fn deposits_are_summed_after_reload() {
    let test = TestStore::new();
    let mut account = new_account();
    let id = account.id();
    account.apply_change(Deposited { amount: 10 });
    account.apply_change(Deposited { amount: 5 });

    test.store.put(&mut account).unwrap();
    assert!(!account.has_uncommitted_events());

    let loaded = test.store.get(id).unwrap();
    assert_eq!(loaded.state().amount, 15);
    assert_eq!(loaded.revision(), 2);
}

#[test]
fn replay_reproduces_observable_state() {
    let test = TestStore::new();
    let mut account = new_account();
    account.apply_change(Opened {
        owner: "ada".to_string(),
    });
    account.apply_change(Deposited { amount: 100 });
    account.apply_change(Withdrawn { amount: 30 });
    account.apply_change(Deposited { amount: 7 });
    let live = account.state().clone();
    let revision = account.revision();

    test.store.put(&mut account).unwrap();
    let loaded = test.store.get(account.id()).unwrap();

    assert_eq!(loaded.state(), &live);
    assert_eq!(loaded.revision(), revision);
    assert_eq!(loaded.state().owner, "ada");
    assert_eq!(loaded.state().amount, 77);
}

#[test]
fn history_accumulates_across_sessions() {
    let test = TestStore::new();
    let id = test.seed(&[1]);

    for amount in [2, 3, 4] {
        let mut account = test.store.get(id).unwrap();
        account.apply_change(Deposited { amount });
        test.store.put(&mut account).unwrap();
    }

    let account = test.store.get(id).unwrap();
    assert_eq!(account.revision(), 4);
    assert_eq!(account.state().amount, 10);
    assert_eq!(account.state().transactions, 4);
    assert_eq!(test.source.version_of(id), Some(4));
}

#[test]
fn accounts_do_not_share_history() {
    let test = TestStore::new();
    let a = test.seed(&[10, 10]);
    let b = test.seed(&[1]);

    assert_eq!(test.store.get(a).unwrap().state().amount, 20);
    assert_eq!(test.store.get(b).unwrap().state().amount, 1);
    assert_eq!(test.source.len(), 2);
}
