//! Constructors for push-based streams.

use std::rc::Rc;

use crate::outcome::Outcome;
use crate::push::producer::{AsyncProducer, Subscriber, Teardown};
use crate::push::stream::AsyncStream;

/// The capability contract required of an external event source.
///
/// Listeners are registered against a named event and deregistered with the
/// registration handle `on` returned; no specific emitter implementation is
/// assumed. [`testing::EventEmitter`](crate::testing::EventEmitter) is the
/// reference implementation.
pub trait EventSource<T> {
    /// Handle identifying a registered listener, passed back to
    /// [`off`](EventSource::off).
    type Registration;

    /// Add a listener for `event`.
    fn on(&self, event: &str, callback: Box<dyn Fn(T)>) -> Self::Registration;

    /// Remove a previously registered listener for `event`.
    fn off(&self, event: &str, registration: Self::Registration);
}

/// A stream over an arbitrary push-based source.
///
/// `generate` receives a [`Subscriber`] and is invoked once per subscription.
/// It may push any number of values through `subscriber.next`, synchronously
/// or across asynchronous delays, and may return a cleanup thunk to run on
/// unsubscription.
///
/// # Examples
///
/// ```
/// use rivulet::prelude::*;
///
/// # tokio_test::block_on(async {
/// let stream = create(|subscriber| {
///     for n in 1..=4 {
///         subscriber.next(n);
///     }
///     None
/// })
/// .take(4)
/// .unwrap();
///
/// assert_eq!(stream.to_array().await.unwrap(), vec![1, 2, 3, 4]);
/// # });
/// ```
pub fn create<T: 'static>(
    generate: impl Fn(&Subscriber<T>) -> Option<Teardown> + 'static,
) -> AsyncStream<T, T> {
    AsyncStream::new(AsyncProducer::new(generate, Outcome::Value))
}

/// A stream of the values an event source pushes for `event`.
///
/// Each subscription registers the stream's subscriber as a listener and
/// deregisters it on unsubscription.
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
/// use rivulet::prelude::*;
/// use rivulet::testing::EventEmitter;
///
/// let emitter = Rc::new(EventEmitter::new());
/// let clicks = from_event(Rc::clone(&emitter), "click");
///
/// let mut seen = Vec::new();
/// clicks.subscribe(move |n: u32| seen.push(n));
/// emitter.emit("click", 1u32);
/// ```
pub fn from_event<T, E>(source: Rc<E>, event: impl Into<String>) -> AsyncStream<T, T>
where
    T: 'static,
    E: EventSource<T> + 'static,
    E::Registration: 'static,
{
    let event = event.into();
    let generate = move |subscriber: &Subscriber<T>| {
        let subscriber = subscriber.clone();
        let registration = source.on(&event, Box::new(move |value| subscriber.next(value)));

        let source = Rc::clone(&source);
        let event = event.clone();
        Some(Box::new(move || source.off(&event, registration)) as Teardown)
    };

    AsyncStream::new(AsyncProducer::new(generate, Outcome::Value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::EventEmitter;
    use std::cell::RefCell;

    #[test]
    fn create_invokes_generate_per_subscription() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let stream = create(|subscriber| {
            subscriber.next(1);
            subscriber.next(2);
            None
        });

        let sink = Rc::clone(&seen);
        stream.subscribe(move |n: i32| sink.borrow_mut().push(n));
        assert_eq!(*seen.borrow(), vec![1, 2]);

        // Re-subscription runs generate again from scratch.
        let sink = Rc::clone(&seen);
        stream.subscribe(move |n: i32| sink.borrow_mut().push(n));
        assert_eq!(*seen.borrow(), vec![1, 2, 1, 2]);
    }

    #[test]
    fn create_runs_teardown_on_unsubscribe() {
        use std::cell::Cell;

        let torn_down = Rc::new(Cell::new(false));
        let flag = Rc::clone(&torn_down);
        let stream = create(move |_: &Subscriber<i32>| {
            let flag = Rc::clone(&flag);
            Some(Box::new(move || flag.set(true)) as Teardown)
        });

        stream.subscribe(|_| {});
        assert!(!torn_down.get());
        stream.unsubscribe();
        assert!(torn_down.get());
    }

    #[test]
    fn from_event_registers_and_deregisters() {
        let emitter = Rc::new(EventEmitter::new());
        let stream = from_event(Rc::clone(&emitter), "data");

        assert_eq!(emitter.listener_count("data"), 0);
        stream.subscribe(|_: String| {});
        assert_eq!(emitter.listener_count("data"), 1);
        stream.unsubscribe();
        assert_eq!(emitter.listener_count("data"), 0);
    }

    #[test]
    fn from_event_only_hears_its_own_event() {
        let emitter = Rc::new(EventEmitter::new());
        let stream = from_event(Rc::clone(&emitter), "wanted");

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        stream.subscribe(move |n: i32| sink.borrow_mut().push(n));

        emitter.emit("wanted", 1);
        emitter.emit("other", 2);
        emitter.emit("wanted", 3);

        assert_eq!(*seen.borrow(), vec![1, 3]);
    }
}
