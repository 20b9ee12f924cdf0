//! Testing utilities
//!
//! This module provides [`EventEmitter`], a minimal named-event emitter used
//! throughout the crate's tests and doctests. It is also the reference
//! implementation of the [`EventSource`] capability that
//! [`from_event`](crate::from_event) composes against.
//!
//! # Examples
//!
//! ```
//! use std::rc::Rc;
//! use rivulet::prelude::*;
//! use rivulet::testing::EventEmitter;
//!
//! let emitter = Rc::new(EventEmitter::new());
//! let stream = from_event(Rc::clone(&emitter), "line");
//!
//! let mut lines = Vec::new();
//! stream.subscribe(move |line: String| lines.push(line));
//! emitter.emit("line", "hello".to_string());
//! ```

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::push::EventSource;

/// A simple single-threaded named-event emitter.
///
/// Listeners are keyed by event name; `emit` invokes every listener
/// registered for that name with a clone of the value, in registration
/// order. Deregistration during dispatch is allowed: the listener list is
/// snapshotted before callbacks run.
pub struct EventEmitter<T> {
    listeners: RefCell<HashMap<String, Vec<(u64, Rc<dyn Fn(T)>)>>>,
    next_id: Cell<u64>,
}

impl<T> fmt::Debug for EventEmitter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let events: Vec<String> = self.listeners.borrow().keys().cloned().collect();
        f.debug_struct("EventEmitter")
            .field("events", &events)
            .finish()
    }
}

impl<T: Clone + 'static> EventEmitter<T> {
    /// An emitter with no listeners.
    pub fn new() -> Self {
        EventEmitter {
            listeners: RefCell::new(HashMap::new()),
            next_id: Cell::new(0),
        }
    }

    /// Push `value` to every listener registered for `event`.
    pub fn emit(&self, event: &str, value: T) {
        let callbacks: Vec<Rc<dyn Fn(T)>> = self
            .listeners
            .borrow()
            .get(event)
            .map(|listeners| {
                listeners
                    .iter()
                    .map(|(_, callback)| Rc::clone(callback))
                    .collect()
            })
            .unwrap_or_default();

        for callback in callbacks {
            callback(value.clone());
        }
    }

    /// Number of listeners currently registered for `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners
            .borrow()
            .get(event)
            .map_or(0, |listeners| listeners.len())
    }
}

impl<T: Clone + 'static> Default for EventEmitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> EventSource<T> for EventEmitter<T> {
    type Registration = u64;

    fn on(&self, event: &str, callback: Box<dyn Fn(T)>) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners
            .borrow_mut()
            .entry(event.to_string())
            .or_default()
            .push((id, Rc::from(callback)));
        id
    }

    fn off(&self, event: &str, registration: u64) {
        if let Some(listeners) = self.listeners.borrow_mut().get_mut(event) {
            listeners.retain(|(id, _)| *id != registration);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_reaches_listeners_in_registration_order() {
        let emitter = EventEmitter::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        emitter.on(
            "n",
            Box::new(move |value: i32| sink.borrow_mut().push(("a", value))),
        );
        let sink = Rc::clone(&seen);
        emitter.on(
            "n",
            Box::new(move |value: i32| sink.borrow_mut().push(("b", value))),
        );

        emitter.emit("n", 1);
        assert_eq!(*seen.borrow(), vec![("a", 1), ("b", 1)]);
    }

    #[test]
    fn off_removes_only_the_named_registration() {
        let emitter = EventEmitter::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        let first = emitter.on(
            "n",
            Box::new(move |value: i32| sink.borrow_mut().push(value)),
        );
        let sink = Rc::clone(&seen);
        emitter.on(
            "n",
            Box::new(move |value: i32| sink.borrow_mut().push(value * 10)),
        );

        emitter.off("n", first);
        emitter.emit("n", 2);

        assert_eq!(*seen.borrow(), vec![20]);
        assert_eq!(emitter.listener_count("n"), 1);
    }

    #[test]
    fn emitting_an_unknown_event_is_a_no_op() {
        let emitter = EventEmitter::<i32>::new();
        emitter.emit("missing", 1);
        assert_eq!(emitter.listener_count("missing"), 0);
    }

    #[test]
    fn deregistration_during_dispatch_is_allowed() {
        let emitter = Rc::new(EventEmitter::new());
        let seen = Rc::new(RefCell::new(Vec::new()));

        let id = Rc::new(Cell::new(0));
        let sink = Rc::clone(&seen);
        let inner = Rc::clone(&emitter);
        let own_id = Rc::clone(&id);
        let registration = emitter.on(
            "n",
            Box::new(move |value: i32| {
                sink.borrow_mut().push(value);
                inner.off("n", own_id.get());
            }),
        );
        id.set(registration);

        emitter.emit("n", 1);
        emitter.emit("n", 2);

        assert_eq!(*seen.borrow(), vec![1]);
    }
}
