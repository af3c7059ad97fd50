//! Event dispatcher
//!
//! Registry of handlers keyed by [`EventType`]. Dispatching an event invokes,
//! synchronously and on the caller's thread, every handler registered for the
//! event's concrete type, in registration order.
//!
//! Handlers receive the dispatch target (the artifact's state) by `&mut` and
//! the event by `&`. They never see the artifact itself, so a handler cannot
//! apply further changes while a dispatch is in progress.
//!
//! A dispatcher is shared through an `Arc` by every artifact built with it and
//! is never owned by any of them. Registration takes `&self`; the table sits
//! behind a `parking_lot::RwLock`.

use eventide_core::{Event, EventType};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Type-erased handler over dispatch target `S`
pub type Handler<S> = Arc<dyn Fn(&mut S, &Event) + Send + Sync>;

/// Routes events to the handlers registered for their type
pub struct EventDispatcher<S> {
    handlers: RwLock<FxHashMap<EventType, Vec<Handler<S>>>>,
}

impl<S> EventDispatcher<S> {
    /// Create a dispatcher with no handlers
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(FxHashMap::default()),
        }
    }

    /// Register a raw handler for `event_type`
    ///
    /// The handler is called with every dispatched event carrying that
    /// discriminator, after all handlers registered before it.
    pub fn register<F>(&self, event_type: EventType, handler: F)
    where
        F: Fn(&mut S, &Event) + Send + Sync + 'static,
    {
        self.handlers
            .write()
            .entry(event_type)
            .or_default()
            .push(Arc::new(handler));
    }

    /// Register a handler for payload type `E`
    ///
    /// The payload is downcast before the handler runs.
    pub fn subscribe<E, F>(&self, handler: F)
    where
        E: Any,
        F: Fn(&mut S, &E) + Send + Sync + 'static,
    {
        self.register(EventType::of::<E>(), move |target: &mut S, event: &Event| {
            if let Some(payload) = event.downcast_ref::<E>() {
                handler(target, payload);
            }
        });
    }

    /// Invoke every handler registered for the event's type
    ///
    /// An event with no handlers is ignored.
    pub fn dispatch(&self, target: &mut S, event: &Event) {
        // Snapshot the handler list so the lock is not held while handlers run.
        let handlers = match self.handlers.read().get(&event.event_type()) {
            Some(handlers) => handlers.clone(),
            None => {
                trace!(target: "eventide::dispatch", event_type = %event.event_type(), "No handler registered");
                return;
            }
        };

        trace!(
            target: "eventide::dispatch",
            event_type = %event.event_type(),
            handlers = handlers.len(),
            "Dispatching event"
        );
        for handler in &handlers {
            handler(target, event);
        }
    }

    /// Number of handlers registered for `event_type`
    pub fn handler_count(&self, event_type: EventType) -> usize {
        self.handlers
            .read()
            .get(&event_type)
            .map_or(0, Vec::len)
    }

    /// True if at least one handler is registered for `event_type`
    pub fn handles(&self, event_type: EventType) -> bool {
        self.handler_count(event_type) > 0
    }
}

impl<S> Default for EventDispatcher<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for EventDispatcher<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handlers = self.handlers.read();
        f.debug_map()
            .entries(handlers.iter().map(|(event_type, list)| (event_type.name(), list.len())))
            .finish()
    }
}
