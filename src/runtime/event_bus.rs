//! Observer registry. Listeners can be detached and re-attached at any time
//! between emissions.

pub type ListenerId = u64;

type Listener<E> = Box<dyn FnMut(&E)>;

pub struct EventBus<E> {
    next_id: ListenerId,
    listeners: Vec<(ListenerId, Listener<E>)>,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        EventBus {
            next_id: 1,
            listeners: Vec::new(),
        }
    }
}

impl<E> std::fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&E) + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not attached.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        before != self.listeners.len()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Delivers `event` to every listener in subscription order.
    pub fn emit(&mut self, event: &E) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_emit_reaches_all_listeners_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        let a = Rc::clone(&log);
        bus.subscribe(move |e: &i32| a.borrow_mut().push(("a", *e)));
        let b = Rc::clone(&log);
        bus.subscribe(move |e: &i32| b.borrow_mut().push(("b", *e)));
        bus.emit(&7);
        assert_eq!(*log.borrow(), vec![("a", 7), ("b", 7)]);
    }

    #[test]
    fn test_unsubscribe_detaches_listener() {
        let count = Rc::new(RefCell::new(0));
        let mut bus = EventBus::new();
        let c = Rc::clone(&count);
        let id = bus.subscribe(move |_: &()| *c.borrow_mut() += 1);
        bus.emit(&());
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.emit(&());
        assert_eq!(*count.borrow(), 1);
        assert!(bus.is_empty());
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut bus: EventBus<()> = EventBus::new();
        let first = bus.subscribe(|_| {});
        bus.unsubscribe(first);
        let second = bus.subscribe(|_| {});
        assert_ne!(first, second);
        assert_eq!(bus.len(), 1);
    }
}
