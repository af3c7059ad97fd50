//! Aggregate: an identified, versioned artifact and the unit of persistence
//!
//! The revision counts every event reflected in the state, whether it arrived
//! by replay or by a new change, and doubles as the optimistic-concurrency
//! version. It only ever grows.
//!
//! Aggregates are move-only. Two copies of one aggregate would carry two
//! diverging uncommitted buffers for the same identity, so there is no `Clone`.
//!
//! ## Lifecycle
//!
//! ```text
//! constructed (rev = 0, or the seeded revision)
//!   -> replaying   load_from_history, rev += n
//!   -> active      apply_change, rev += 1, buffer grows
//!   -> persisting  store put drains the buffer
//!   -> active
//! ```

use crate::artifact::Artifact;
use crate::dispatcher::EventDispatcher;
use eventide_core::{Event, EventSequence, ObjectId, Revision};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// What the artifact store needs from a persistable aggregate
pub trait AggregateRoot {
    /// Identity, fixed at construction
    fn id(&self) -> ObjectId;

    /// Events reflected in the current state
    fn revision(&self) -> Revision;

    /// Changes waiting to be persisted, oldest first
    fn uncommitted_events(&self) -> &[Event];

    /// Forget the pending changes
    fn clear_uncommitted_events(&mut self);

    /// Replay committed events, returning how many were applied
    ///
    /// [`AggregateRoot::revision`] is expected to grow by the returned count.
    fn load_from_history(&mut self, events: EventSequence) -> usize;

    /// True if changes are waiting to be persisted
    fn has_uncommitted_events(&self) -> bool {
        !self.uncommitted_events().is_empty()
    }

    /// Revision of the last persisted event the state builds on
    ///
    /// This is the stream version a save expects to find.
    fn committed_revision(&self) -> Revision {
        self.revision()
            .saturating_sub(self.uncommitted_events().len() as Revision)
    }
}

/// Artifact with identity and revision
pub struct Aggregate<S> {
    id: ObjectId,
    revision: Revision,
    artifact: Artifact<S>,
}

impl<S> Aggregate<S> {
    /// Create a blank aggregate at revision 0
    pub fn new(id: ObjectId, dispatcher: Arc<EventDispatcher<S>>, state: S) -> Self {
        Self::with_revision(id, 0, dispatcher, state)
    }

    /// Create an aggregate whose state already reflects `revision` events
    ///
    /// Used by object factories that restore from a snapshot.
    pub fn with_revision(
        id: ObjectId,
        revision: Revision,
        dispatcher: Arc<EventDispatcher<S>>,
        state: S,
    ) -> Self {
        Self {
            id,
            revision,
            artifact: Artifact::new(dispatcher, state),
        }
    }

    /// Identity
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Events reflected in the current state
    pub fn revision(&self) -> Revision {
        self.revision
    }

    /// Current state
    pub fn state(&self) -> &S {
        self.artifact.state()
    }

    /// The underlying artifact
    pub fn artifact(&self) -> &Artifact<S> {
        &self.artifact
    }

    /// Register a handler on this aggregate only
    pub fn add_handler<E, F>(&mut self, handler: F)
    where
        E: Any,
        F: Fn(&mut S, &E) + Send + Sync + 'static,
    {
        self.artifact.add_handler(handler);
    }

    /// Record a state change and advance the revision
    pub fn apply_change<E: Any + Send + Sync>(&mut self, payload: E) {
        self.artifact.apply_change(payload);
        self.revision += 1;
    }

    /// Replay committed events, advancing the revision once per event
    pub fn load_from_history<I>(&mut self, events: I) -> usize
    where
        I: IntoIterator<Item = Event>,
    {
        let replayed = self.artifact.load_from_history(events);
        self.revision += replayed as Revision;
        replayed
    }

    /// True if changes are waiting to be persisted
    pub fn has_uncommitted_events(&self) -> bool {
        self.artifact.has_uncommitted_events()
    }

    /// Changes waiting to be persisted
    pub fn uncommitted_events(&self) -> &[Event] {
        self.artifact.uncommitted_events()
    }

    /// Forget the pending changes
    pub fn clear_uncommitted_events(&mut self) {
        self.artifact.clear_uncommitted_events();
    }
}

impl<S> AggregateRoot for Aggregate<S> {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn revision(&self) -> Revision {
        self.revision
    }

    fn uncommitted_events(&self) -> &[Event] {
        self.artifact.uncommitted_events()
    }

    fn clear_uncommitted_events(&mut self) {
        self.artifact.clear_uncommitted_events();
    }

    fn load_from_history(&mut self, events: EventSequence) -> usize {
        Aggregate::load_from_history(self, events)
    }
}

impl<S: fmt::Debug> fmt::Debug for Aggregate<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aggregate")
            .field("id", &self.id)
            .field("revision", &self.revision)
            .field("artifact", &self.artifact)
            .finish()
    }
}
