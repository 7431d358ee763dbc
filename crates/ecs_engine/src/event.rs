//! Entity lifecycle events and their listeners.
//!
//! Listeners receive only the event, never the engine, so a listener cannot
//! register or remove listeners while a dispatch is iterating over them.

use ecs_component::Entity;

/// Emitted when an entity becomes active in, or leaves, an engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityEvent {
    Added(Entity),
    Removed(Entity),
}

impl EntityEvent {
    #[must_use]
    pub fn entity(&self) -> &Entity {
        match self {
            EntityEvent::Added(entity) | EntityEvent::Removed(entity) => entity,
        }
    }

    #[must_use]
    pub fn is_added(&self) -> bool {
        matches!(self, EntityEvent::Added(_))
    }

    #[must_use]
    pub fn is_removed(&self) -> bool {
        matches!(self, EntityEvent::Removed(_))
    }
}

/// Handle returned when registering a listener, used to remove it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl std::fmt::Display for ListenerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

type Listener = Box<dyn FnMut(&EntityEvent)>;

/// Registered listeners, notified in registration order.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    listeners: Vec<(ListenerId, Listener)>,
}

impl Listeners {
    pub(crate) fn add(&mut self, listener: impl FnMut(&EntityEvent) + 'static) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub(crate) fn dispatch(&mut self, event: &EntityEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.listeners.iter().map(|(id, _)| id))
            .finish()
    }
}
