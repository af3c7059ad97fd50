//! Artifact: an in-memory object that records its own state changes as events
//!
//! ## Apply vs replay
//!
//! Both paths run the event through the same handlers, so a handler cannot
//! tell a new change from a historical one. They differ only in bookkeeping:
//!
//! - [`Artifact::apply_change`] dispatches, then appends the event to the
//!   uncommitted buffer
//! - [`Artifact::load_from_history`] dispatches and records nothing, because
//!   the events are already durable
//!
//! The uncommitted buffer holds exactly the events applied since construction
//! or since the last [`Artifact::clear_uncommitted_events`], in the order they
//! were applied.
//!
//! ## Handlers
//!
//! An event reaches the shared dispatcher's handlers first, then the handlers
//! added to this artifact with [`Artifact::add_handler`], each group in
//! registration order. Handlers added to one artifact belong to it alone and
//! are dropped with it.

use crate::dispatcher::{EventDispatcher, Handler};
use eventide_core::{Event, EventSequence, EventType};
use rustc_hash::FxHashMap;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// State `S` plus the events that produced its unsaved changes
pub struct Artifact<S> {
    dispatcher: Arc<EventDispatcher<S>>,
    handlers: FxHashMap<EventType, Vec<Handler<S>>>,
    state: S,
    uncommitted: EventSequence,
}

impl<S> Artifact<S> {
    /// Create an artifact over `state` using a shared dispatcher
    pub fn new(dispatcher: Arc<EventDispatcher<S>>, state: S) -> Self {
        Self {
            dispatcher,
            handlers: FxHashMap::default(),
            state,
            uncommitted: EventSequence::new(),
        }
    }

    /// Current state
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Consume the artifact, keeping only its state
    pub fn into_state(self) -> S {
        self.state
    }

    /// The shared dispatcher
    pub fn dispatcher(&self) -> &Arc<EventDispatcher<S>> {
        &self.dispatcher
    }

    /// Register a handler for payload type `E` on this artifact only
    ///
    /// It runs after the shared dispatcher's handlers for the same event.
    pub fn add_handler<E, F>(&mut self, handler: F)
    where
        E: Any,
        F: Fn(&mut S, &E) + Send + Sync + 'static,
    {
        let handler: Handler<S> = Arc::new(move |target: &mut S, event: &Event| {
            if let Some(payload) = event.downcast_ref::<E>() {
                handler(target, payload);
            }
        });
        self.handlers
            .entry(EventType::of::<E>())
            .or_default()
            .push(handler);
    }

    /// Number of handlers added to this artifact for `event_type`
    pub fn handler_count(&self, event_type: EventType) -> usize {
        self.handlers.get(&event_type).map_or(0, Vec::len)
    }

    fn dispatch(&mut self, event: &Event) {
        self.dispatcher.dispatch(&mut self.state, event);
        if let Some(handlers) = self.handlers.get(&event.event_type()) {
            for handler in handlers {
                handler(&mut self.state, event);
            }
        }
    }

    /// Record a state change
    ///
    /// The event reaches the handlers before it is buffered as uncommitted.
    pub fn apply_change<E: Any + Send + Sync>(&mut self, payload: E) {
        self.apply_event(Event::new(payload));
    }

    /// Record an already-wrapped event
    pub fn apply_event(&mut self, event: Event) {
        self.dispatch(&event);
        self.uncommitted.push(event);
    }

    /// Replay committed events without buffering them
    ///
    /// Returns the number of events replayed.
    pub fn load_from_history<I>(&mut self, events: I) -> usize
    where
        I: IntoIterator<Item = Event>,
    {
        let mut replayed = 0;
        for event in events {
            self.dispatch(&event);
            replayed += 1;
        }
        replayed
    }

    /// True if changes are waiting to be persisted
    pub fn has_uncommitted_events(&self) -> bool {
        !self.uncommitted.is_empty()
    }

    /// Changes waiting to be persisted, oldest first
    pub fn uncommitted_events(&self) -> &[Event] {
        &self.uncommitted
    }

    /// Forget the pending changes (after they were persisted)
    pub fn clear_uncommitted_events(&mut self) {
        self.uncommitted.clear();
    }

    /// Drain the pending changes
    pub fn take_uncommitted_events(&mut self) -> EventSequence {
        std::mem::take(&mut self.uncommitted)
    }
}

impl<S: fmt::Debug> fmt::Debug for Artifact<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Artifact")
            .field("state", &self.state)
            .field("handlers", &self.handlers.values().map(Vec::len).sum::<usize>())
            .field("uncommitted", &self.uncommitted.len())
            .finish()
    }
}
