//! Push-based producers
//!
//! An [`AsyncProducer`] adapts an external push source to the outcome
//! algebra. It owns two things: a `generate` function that wires a
//! [`Subscriber`] into the source (invoked once per subscription, optionally
//! returning a teardown thunk), and a `transform` that translates each pushed
//! source value into an [`Outcome`]. Operators compose the transform, never
//! buffered data, so values reach the consumer synchronously, in push order.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::outcome::Outcome;

/// Cleanup thunk returned by a producer's generate function; runs exactly
/// once, on unsubscription.
pub type Teardown = Box<dyn FnOnce()>;

/// The per-subscription handle an external source pushes values through.
///
/// `next` forwards to the listener while the subscription is live;
/// `unsubscribe` deactivates it so late or duplicate pushes become no-ops.
pub struct Subscriber<T> {
    listener: Rc<dyn Fn(T)>,
    active: Rc<Cell<bool>>,
}

impl<T> Clone for Subscriber<T> {
    fn clone(&self) -> Self {
        Subscriber {
            listener: Rc::clone(&self.listener),
            active: Rc::clone(&self.active),
        }
    }
}

impl<T> fmt::Debug for Subscriber<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriber")
            .field("active", &self.active.get())
            .finish()
    }
}

impl<T: 'static> Subscriber<T> {
    pub(crate) fn new(listener: impl Fn(T) + 'static) -> Self {
        Subscriber {
            listener: Rc::new(listener),
            active: Rc::new(Cell::new(true)),
        }
    }

    /// Push a value into the translation pipeline. No-op once unsubscribed.
    pub fn next(&self, value: T) {
        if self.active.get() {
            (self.listener)(value);
        }
    }

    /// Deactivate the subscription.
    pub fn unsubscribe(&self) {
        self.active.set(false);
    }

    /// True while pushed values are still being forwarded.
    pub fn is_subscribed(&self) -> bool {
        self.active.get()
    }
}

struct Live<S> {
    subscriber: Subscriber<S>,
    teardown: Option<Teardown>,
}

/// Adapts a push-based source into the outcome algebra.
///
/// `Source` is the type the external source pushes; `T` is the element type
/// after the composed transform. A producer has at most one live
/// subscription: subscribing again tears down the previous one first.
pub struct AsyncProducer<Source, T> {
    generate: Rc<dyn Fn(&Subscriber<Source>) -> Option<Teardown>>,
    transform: Rc<dyn Fn(Source) -> Outcome<T>>,
    live: Rc<RefCell<Option<Live<Source>>>>,
}

impl<Source, T> Clone for AsyncProducer<Source, T> {
    fn clone(&self) -> Self {
        AsyncProducer {
            generate: Rc::clone(&self.generate),
            transform: Rc::clone(&self.transform),
            live: Rc::clone(&self.live),
        }
    }
}

impl<Source, T> fmt::Debug for AsyncProducer<Source, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncProducer")
            .field("subscribed", &self.live.borrow().is_some())
            .finish()
    }
}

impl<Source: 'static, T: 'static> AsyncProducer<Source, T> {
    pub(crate) fn new(
        generate: impl Fn(&Subscriber<Source>) -> Option<Teardown> + 'static,
        transform: impl Fn(Source) -> Outcome<T> + 'static,
    ) -> Self {
        AsyncProducer {
            generate: Rc::new(generate),
            transform: Rc::new(transform),
            live: Rc::new(RefCell::new(None)),
        }
    }

    fn with_transform<U: 'static>(
        &self,
        transform: impl Fn(Source) -> Outcome<U> + 'static,
    ) -> AsyncProducer<Source, U> {
        AsyncProducer {
            generate: Rc::clone(&self.generate),
            transform: Rc::new(transform),
            live: Rc::new(RefCell::new(None)),
        }
    }

    /// A producer whose translated values are mapped through `f`.
    pub fn map<U: 'static>(&self, f: impl Fn(T) -> U + 'static) -> AsyncProducer<Source, U> {
        let transform = Rc::clone(&self.transform);
        self.with_transform(move |value| transform(value).map(&f))
    }

    /// A producer that translates values failing the predicate into skipped
    /// outcomes.
    pub fn keep(&self, predicate: impl Fn(&T) -> bool + 'static) -> AsyncProducer<Source, T> {
        let transform = Rc::clone(&self.transform);
        self.with_transform(move |value| transform(value).keep(&predicate))
    }

    /// A producer that translates the first value failing the predicate into
    /// the end of the stream.
    pub fn take_while(&self, predicate: impl Fn(&T) -> bool + 'static) -> AsyncProducer<Source, T> {
        let transform = Rc::clone(&self.transform);
        self.with_transform(move |value| transform(value).take_while(&predicate))
    }

    /// Activate the generate function, delivering one translated [`Outcome`]
    /// to `listener` per pushed source value.
    ///
    /// Any prior live subscription is torn down first, so duplicate delivery
    /// and leaked listeners cannot occur.
    pub fn subscribe(&self, listener: impl Fn(Outcome<T>) + 'static) {
        self.unsubscribe();

        #[cfg(feature = "tracing")]
        tracing::debug!("subscription started");

        let transform = Rc::clone(&self.transform);
        let subscriber = Subscriber::new(move |value| listener(transform(value)));

        // Register before invoking generate: a source that pushes
        // synchronously may hit its limit and unsubscribe mid-generate.
        *self.live.borrow_mut() = Some(Live {
            subscriber: subscriber.clone(),
            teardown: None,
        });
        let teardown = (self.generate)(&subscriber);

        if subscriber.is_subscribed() {
            if let Some(live) = self.live.borrow_mut().as_mut() {
                live.teardown = teardown;
                return;
            }
        }

        // Torn down during generate; run the cleanup it handed back so the
        // source is not left holding a dead listener.
        if let Some(teardown) = teardown {
            teardown();
        }
    }

    /// Tear down the live subscription, if any: the cleanup thunk runs
    /// exactly once and the subscriber is deactivated so late pushes become
    /// no-ops.
    pub fn unsubscribe(&self) {
        let live = self.live.borrow_mut().take();
        if let Some(live) = live {
            if let Some(teardown) = live.teardown {
                teardown();
            }
            live.subscriber.unsubscribe();

            #[cfg(feature = "tracing")]
            tracing::debug!("subscription torn down");
        }
    }
}
