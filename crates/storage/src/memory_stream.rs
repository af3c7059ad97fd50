//! In-memory event stream
//!
//! ## Handles and logs
//!
//! The durable history of one identity is a [`StreamLog`] behind a
//! `parking_lot::Mutex`. A [`MemoryStream`] is a *handle* onto a log: it
//! remembers the log version it was opened at (`base_version`) and keeps its
//! own pending buffer. Several handles may point at the same log; the event
//! source hands out a fresh handle on every `get`.
//!
//! ## Persist protocol
//!
//! ```text
//! 0. claim the identity in the source's registry (source-made streams only)
//! 1. lock the log
//! 2. IF log.version != base_version: ConcurrencyConflict, nothing written
//! 3. append pending events, revisions base_version+1 ..
//! 4. allocate a global sequence number (only if something was written)
//! 5. base_version = new log version, pending cleared
//! 6. unlock, return the Commit
//! ```
//!
//! Persists on one log are serialized by the mutex, so two writers can never
//! interleave their revision ranges; the loser sees a version it did not
//! expect and fails. On conflict the pending buffer is kept so the caller can
//! inspect what was rejected.
//!
//! ## First writes
//!
//! A stream built by an event source starts on a private, empty log. Before
//! its first write it claims its identity in the source's registry: if the
//! slot is free its log is registered, otherwise the handle switches to the
//! registered log. Two racing creators therefore always meet on one log, and
//! the loser fails step 2 before anything is appended or numbered.
//!
//! ## Horizons
//!
//! A handle opened at a version below the log's current one is a historical
//! view: loads are capped at that version and any persist through it fails.

use crate::sequence::SequenceCounter;
use eventide_core::{
    Commit, Error, Event, EventSequence, EventStream, ObjectId, Result, Revision, Timestamp,
    MAX_REVISION,
};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Durable history of one identity; event `i` has revision `i + 1`
#[derive(Debug, Default)]
pub struct StreamLog {
    events: EventSequence,
}

impl StreamLog {
    /// Number of durable events, which is also the stream version
    pub fn version(&self) -> Revision {
        self.events.len() as Revision
    }

    fn window(&self, min_revision: Revision, max_revision: Revision) -> EventSequence {
        let lo = min_revision.max(1);
        let hi = max_revision.min(self.version());
        if lo > hi {
            return EventSequence::new();
        }
        self.events[(lo - 1) as usize..hi as usize].to_vec()
    }
}

/// Shared handle to a stream's durable history
pub type SharedLog = Arc<Mutex<StreamLog>>;

/// Identity to log map owned by an event source
pub type StreamRegistry = Arc<DashMap<ObjectId, SharedLog>>;

/// Handle onto an in-memory stream
pub struct MemoryStream {
    id: ObjectId,
    log: SharedLog,
    sequence: Arc<SequenceCounter>,
    registry: Option<StreamRegistry>,
    base_version: Revision,
    horizon: Revision,
    pending: EventSequence,
}

impl MemoryStream {
    /// Brand-new empty stream drawing sequence numbers from `sequence`
    pub fn new(id: ObjectId, sequence: Arc<SequenceCounter>) -> Self {
        Self {
            id,
            log: SharedLog::default(),
            sequence,
            registry: None,
            base_version: 0,
            horizon: MAX_REVISION,
            pending: EventSequence::new(),
        }
    }

    /// Brand-new empty stream with a private sequence counter
    pub fn detached(id: ObjectId) -> Self {
        Self::new(id, Arc::new(SequenceCounter::default()))
    }

    /// Open a handle onto an existing log, seeing history up to `horizon`
    pub fn open(id: ObjectId, log: SharedLog, sequence: Arc<SequenceCounter>, horizon: Revision) -> Self {
        let durable = log.lock().version();
        let (base_version, horizon) = if horizon >= durable {
            (durable, MAX_REVISION)
        } else {
            (horizon, horizon)
        };
        Self {
            id,
            log,
            sequence,
            registry: None,
            base_version,
            horizon,
            pending: EventSequence::new(),
        }
    }

    /// Bind this handle to the registry of the source it belongs to
    pub fn with_registry(mut self, registry: StreamRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Another handle onto the same log, based on its current version
    pub fn reopen(&self) -> Self {
        let stream = Self::open(self.id, Arc::clone(&self.log), Arc::clone(&self.sequence), MAX_REVISION);
        match &self.registry {
            Some(registry) => stream.with_registry(Arc::clone(registry)),
            None => stream,
        }
    }

    /// Make sure this handle writes to the log registered for its identity
    ///
    /// Registers the handle's own log when the identity is free and `register`
    /// is set; otherwise adopts the registered log. Handles without a registry
    /// are left alone.
    fn claim(&mut self, register: bool) {
        let Some(registry) = &self.registry else {
            return;
        };
        if self.id.is_null() {
            return;
        }
        let registered = match registry.entry(self.id) {
            Entry::Occupied(slot) => Arc::clone(slot.get()),
            Entry::Vacant(slot) => {
                if register {
                    slot.insert(Arc::clone(&self.log));
                    debug!(target: "eventide::stream", id = %self.id, "Registered new stream");
                }
                return;
            }
        };
        if !Arc::ptr_eq(&registered, &self.log) {
            self.log = registered;
        }
    }

    /// The log this handle writes to
    pub fn log(&self) -> &SharedLog {
        &self.log
    }

    /// Current version of the log, which may be ahead of this handle
    pub fn durable_version(&self) -> Revision {
        self.log.lock().version()
    }

    /// Highest revision this handle may load
    pub fn horizon(&self) -> Revision {
        self.horizon
    }

    /// Events saved but not yet persisted
    pub fn pending_events(&self) -> &[Event] {
        &self.pending
    }
}

impl EventStream for MemoryStream {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn version(&self) -> Revision {
        self.base_version
    }

    fn load(&self, min_revision: Revision, max_revision: Revision) -> Result<EventSequence> {
        let events = self
            .log
            .lock()
            .window(min_revision, max_revision.min(self.horizon));
        debug!(
            target: "eventide::stream",
            id = %self.id,
            min_revision,
            max_revision,
            loaded = events.len(),
            "Loaded event window"
        );
        Ok(events)
    }

    fn save(&mut self, events: &[Event]) -> Result<()> {
        self.pending.extend_from_slice(events);
        Ok(())
    }

    fn persist(&mut self) -> Result<Commit> {
        self.claim(!self.pending.is_empty());
        let mut log = self.log.lock();
        let actual = log.version();
        if actual != self.base_version {
            warn!(
                target: "eventide::stream",
                id = %self.id,
                expected = self.base_version,
                actual,
                "Rejected persist on stale stream handle"
            );
            return Err(Error::ConcurrencyConflict {
                id: self.id,
                expected: self.base_version,
                actual,
            });
        }

        let events = std::mem::take(&mut self.pending);
        let sequence_number = if events.is_empty() {
            self.sequence.current()
        } else {
            self.sequence.allocate()
        };
        log.events.extend_from_slice(&events);
        self.base_version = log.version();
        drop(log);

        debug!(
            target: "eventide::stream",
            id = %self.id,
            version = actual,
            events = events.len(),
            sequence_number,
            "Persisted stream"
        );
        Ok(Commit::new(
            ObjectId::new(),
            self.id,
            actual,
            sequence_number,
            events,
            Timestamp::now(),
        ))
    }
}

impl fmt::Debug for MemoryStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStream")
            .field("id", &self.id)
            .field("base_version", &self.base_version)
            .field("horizon", &self.horizon)
            .field("registered", &self.registry.is_some())
            .field("pending", &self.pending.len())
            .finish()
    }
}
