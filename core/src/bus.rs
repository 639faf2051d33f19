//! Synchronous, same-thread publish/subscribe channel.

use std::{collections::BTreeMap, fmt};

use crate::{Event, Topic};

/// Callback invoked for every event published on a subscribed topic.
///
/// Handlers receive the mutable context, the event, and the bus itself so they
/// can publish follow-up events, which are delivered before `emit` returns.
pub type Handler<C> = Box<dyn Fn(&mut C, &Event, &EventBus<C>)>;

/// Publish/subscribe registry generic over the context handlers mutate.
pub struct EventBus<C> {
    listeners: BTreeMap<Topic, Vec<Handler<C>>>,
}

impl<C> EventBus<C> {
    /// Creates a bus without registrations.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: BTreeMap::new(),
        }
    }

    /// Registers a handler for the topic; handlers run in registration order.
    pub fn on<F>(&mut self, topic: Topic, handler: F)
    where
        F: Fn(&mut C, &Event, &EventBus<C>) + 'static,
    {
        self.listeners
            .entry(topic)
            .or_default()
            .push(Box::new(handler));
    }

    /// Delivers the event to every handler of its topic before returning.
    pub fn emit(&self, context: &mut C, event: Event) {
        let Some(handlers) = self.listeners.get(&event.topic()) else {
            return;
        };

        for handler in handlers {
            handler(context, &event, self);
        }
    }

    /// Removes every registration.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    /// Number of handlers registered for the topic.
    #[must_use]
    pub fn listener_count(&self, topic: Topic) -> usize {
        self.listeners.get(&topic).map_or(0, Vec::len)
    }

    /// Reports whether no handler is registered on any topic.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.values().all(Vec::is_empty)
    }
}

impl<C> Default for EventBus<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for EventBus<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: BTreeMap<Topic, usize> = self
            .listeners
            .iter()
            .map(|(topic, handlers)| (*topic, handlers.len()))
            .collect();
        f.debug_struct("EventBus")
            .field("listeners", &counts)
            .finish()
    }
}
