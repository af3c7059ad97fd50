//! Shared test utilities for all integration test suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

pub use eventide::{
    Aggregate, ArtifactStore, Error, Event, EventDispatcher, EventStream, MemoryEventSource,
    MemoryStream, ObjectId, Revision, Store, StoreConfig, MAX_REVISION,
};
use std::sync::{Arc, Once};

// ============================================================================
// Initialization
// ============================================================================

static INIT_TRACING: Once = Once::new();

/// Route `tracing` output through the test harness so `--nocapture` shows it.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

// ============================================================================
// Bank account domain
// ============================================================================

#[derive(Debug, Clone)]
pub struct Opened {
    pub owner: String,
}

#[derive(Debug, Clone)]
pub struct Deposited {
    pub amount: i64,
}

#[derive(Debug, Clone)]
pub struct Withdrawn {
    pub amount: i64,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Balance {
    pub owner: String,
    pub amount: i64,
    pub transactions: u32,
}

pub type Account = Aggregate<Balance>;

/// Dispatcher wired with every account handler.
pub fn ledger() -> Arc<EventDispatcher<Balance>> {
    let dispatcher = EventDispatcher::new();
    dispatcher.subscribe(|b: &mut Balance, e: &Opened| b.owner = e.owner.clone());
    dispatcher.subscribe(|b: &mut Balance, e: &Deposited| {
        b.amount += e.amount;
        b.transactions += 1;
    });
    dispatcher.subscribe(|b: &mut Balance, e: &Withdrawn| {
        b.amount -= e.amount;
        b.transactions += 1;
    });
    Arc::new(dispatcher)
}

/// A fresh account with a random id.
pub fn new_account() -> Account {
    Account::new(ObjectId::new(), ledger(), Balance::default())
}

/// A fresh account with every deposit applied and nothing committed.
pub fn account_with_deposits(amounts: &[i64]) -> Account {
    let mut account = new_account();
    for &amount in amounts {
        account.apply_change(Deposited { amount });
    }
    account
}

// ============================================================================
// TestStore - artifact store over an in-memory event source
// ============================================================================

/// Artifact store of accounts with direct access to its event source.
pub struct TestStore {
    pub source: Arc<MemoryEventSource>,
    pub store: Box<dyn Store<Value = Account> + Send + Sync>,
}

impl TestStore {
    /// Store with the default configuration.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Store with an explicit configuration.
    pub fn with_config(config: StoreConfig) -> Self {
        init_tracing();
        let source = Arc::new(MemoryEventSource::new());
        let store = account_store(Arc::clone(&source), config);
        Self { source, store }
    }

    /// Another store over the same event source, e.g. a second process.
    pub fn sibling(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            store: account_store(Arc::clone(&self.source), StoreConfig::default()),
        }
    }

    /// Commit `amounts` as deposits on a new account and return its id.
    pub fn seed(&self, amounts: &[i64]) -> ObjectId {
        let mut account = account_with_deposits(amounts);
        self.store.put(&mut account).unwrap();
        account.id()
    }
}

fn account_store(
    source: Arc<MemoryEventSource>,
    config: StoreConfig,
) -> Box<dyn Store<Value = Account> + Send + Sync> {
    let dispatcher = ledger();
    let streams = source.stream_factory();
    let store = ArtifactStore::with_config(
        source,
        streams,
        move |id: ObjectId, _: Revision| Account::new(id, Arc::clone(&dispatcher), Balance::default()),
        config,
    )
    .unwrap();
    Box::new(store)
}
