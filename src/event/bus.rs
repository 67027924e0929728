use std::collections::HashMap;

use crate::event::{EventKind, PuzzleEvent};

/// A subscriber callback. `C` is the context the emitter lends to its handlers.
pub type Handler<C> = Box<dyn FnMut(&PuzzleEvent, &mut C)>;

/// A simple event bus with persistent and one-shot subscriptions.
///
/// Dispatch is synchronous: `emit` runs every persistent handler for the
/// event's kind in registration order, then every one-shot handler in
/// registration order, then forgets the one-shot handlers. A panicking
/// handler aborts the rest of the dispatch.
pub struct EventBus<C> {
    handlers: HashMap<EventKind, Vec<Handler<C>>>,
    once_handlers: HashMap<EventKind, Vec<Handler<C>>>,
}

impl<C> std::fmt::Debug for EventBus<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = |map: &HashMap<EventKind, Vec<Handler<C>>>| {
            map.values().map(Vec::len).sum::<usize>()
        };
        f.debug_struct("EventBus")
            .field("handlers", &format!("<{} handlers>", count(&self.handlers)))
            .field("once_handlers", &format!("<{} handlers>", count(&self.once_handlers)))
            .finish()
    }
}

impl<C> Default for EventBus<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> EventBus<C> {
    /// Creates a new event bus
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            once_handlers: HashMap::new(),
        }
    }

    /// Subscribe a handler to every future event of the given kind
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F)
    where
        F: FnMut(&PuzzleEvent, &mut C) + 'static,
    {
        self.handlers.entry(kind).or_default().push(Box::new(handler));
    }

    /// Subscribe a handler to the next event of the given kind only
    pub fn subscribe_once<F>(&mut self, kind: EventKind, handler: F)
    where
        F: FnMut(&PuzzleEvent, &mut C) + 'static,
    {
        self.once_handlers.entry(kind).or_default().push(Box::new(handler));
    }

    /// Number of one-shot handlers waiting for the given kind
    pub fn pending_once(&self, kind: EventKind) -> usize {
        self.once_handlers.get(&kind).map_or(0, Vec::len)
    }

    /// Emit an event to all registered handlers
    pub fn emit(&mut self, event: &PuzzleEvent, context: &mut C) {
        let kind = event.kind();
        if let Some(handlers) = self.handlers.get_mut(&kind) {
            for handler in handlers.iter_mut() {
                handler(event, &mut *context);
            }
        }
        if let Some(handlers) = self.once_handlers.remove(&kind) {
            for mut handler in handlers {
                handler(event, &mut *context);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_complete() -> PuzzleEvent {
        PuzzleEvent::RenderComplete { frame: 1 }
    }

    #[test]
    fn test_emit_without_subscribers_is_noop() {
        let mut bus: EventBus<Vec<&'static str>> = EventBus::new();
        let mut log = Vec::new();
        bus.emit(&render_complete(), &mut log);
        assert!(log.is_empty());
    }

    #[test]
    fn test_persistent_handlers_fire_every_time() {
        let mut bus: EventBus<u32> = EventBus::new();
        bus.subscribe(EventKind::RenderComplete, |_, count| *count += 1);

        let mut count = 0;
        bus.emit(&render_complete(), &mut count);
        bus.emit(&render_complete(), &mut count);
        assert_eq!(count, 2);
    }

    #[test]
    fn test_once_handlers_fire_once() {
        let mut bus: EventBus<u32> = EventBus::new();
        bus.subscribe_once(EventKind::RenderComplete, |_, count| *count += 1);
        assert_eq!(bus.pending_once(EventKind::RenderComplete), 1);

        let mut count = 0;
        bus.emit(&render_complete(), &mut count);
        bus.emit(&render_complete(), &mut count);
        assert_eq!(count, 1);
        assert_eq!(bus.pending_once(EventKind::RenderComplete), 0);
    }

    #[test]
    fn test_persistent_before_once_in_registration_order() {
        let mut bus: EventBus<Vec<&'static str>> = EventBus::new();
        bus.subscribe_once(EventKind::RenderComplete, |_, log| log.push("once-a"));
        bus.subscribe(EventKind::RenderComplete, |_, log| log.push("persistent-a"));
        bus.subscribe_once(EventKind::RenderComplete, |_, log| log.push("once-b"));
        bus.subscribe(EventKind::RenderComplete, |_, log| log.push("persistent-b"));

        let mut log = Vec::new();
        bus.emit(&render_complete(), &mut log);
        assert_eq!(log, vec!["persistent-a", "persistent-b", "once-a", "once-b"]);
    }

    #[test]
    fn test_kinds_are_dispatched_separately() {
        let mut bus: EventBus<Vec<&'static str>> = EventBus::new();
        bus.subscribe(EventKind::PuzzleCompleted, |_, log| log.push("completed"));
        bus.subscribe_once(EventKind::PuzzleCompleted, |_, log| log.push("completed-once"));

        let mut log = Vec::new();
        bus.emit(&render_complete(), &mut log);
        assert!(log.is_empty());
        assert_eq!(bus.pending_once(EventKind::PuzzleCompleted), 1);

        bus.emit(&PuzzleEvent::PuzzleCompleted { at: 0.0 }, &mut log);
        assert_eq!(log, vec!["completed", "completed-once"]);
    }

    #[test]
    fn test_handlers_receive_payload() {
        let mut bus: EventBus<Option<u64>> = EventBus::new();
        bus.subscribe(EventKind::RenderComplete, |event, seen| {
            if let PuzzleEvent::RenderComplete { frame } = event {
                *seen = Some(*frame);
            }
        });

        let mut seen = None;
        bus.emit(&PuzzleEvent::RenderComplete { frame: 42 }, &mut seen);
        assert_eq!(seen, Some(42));
    }
}
