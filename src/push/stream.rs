//! Push-based streams
//!
//! An [`AsyncStream`] pairs an [`AsyncProducer`] with the same declared-limit
//! contract as the pull-based flavor. Transforms run synchronously inside the
//! push callback before delivery, so consumers observe values in exactly the
//! order the external source pushes them — nothing is buffered or reordered.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::future::Future;
use std::rc::Rc;

use futures::channel::oneshot;

use crate::error::StreamError;
use crate::outcome::Outcome;
use crate::push::producer::AsyncProducer;
use crate::stream::{Stream, SubscribeOptions};
use crate::validate;

/// A lazily-composed stream over a push-based source.
///
/// `Source` is the type pushed by the external source; `T` is the element
/// type after composition. Cloning shares the underlying producer, including
/// its at-most-one live subscription.
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
/// use rivulet::prelude::*;
/// use rivulet::testing::EventEmitter;
///
/// # tokio_test::block_on(async {
/// let emitter = Rc::new(EventEmitter::new());
/// let doubled = from_event(Rc::clone(&emitter), "tick")
///     .map(|n: i32| n * 2)
///     .take(3)
///     .unwrap();
///
/// let result = doubled.to_array();
/// for n in 1..=3 {
///     emitter.emit("tick", n);
/// }
/// assert_eq!(result.await.unwrap(), vec![2, 4, 6]);
/// # });
/// ```
#[derive(Debug)]
pub struct AsyncStream<Source, T> {
    producer: AsyncProducer<Source, T>,
    limit: Option<usize>,
}

impl<Source, T> Clone for AsyncStream<Source, T> {
    fn clone(&self) -> Self {
        AsyncStream {
            producer: self.producer.clone(),
            limit: self.limit,
        }
    }
}

impl<Source: 'static, T: 'static> AsyncStream<Source, T> {
    pub(crate) fn new(producer: AsyncProducer<Source, T>) -> Self {
        AsyncStream {
            producer,
            limit: None,
        }
    }

    fn with_producer<U: 'static>(
        &self,
        producer: AsyncProducer<Source, U>,
    ) -> AsyncStream<Source, U> {
        AsyncStream {
            producer,
            limit: self.limit,
        }
    }

    /// The declared element limit, if one has been established.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Deliver each element to `f`, in push order.
    ///
    /// Activates the producer's generate function exactly once; subscribing
    /// again later tears the previous subscription down first. With a
    /// declared limit the stream unsubscribes itself automatically once the
    /// limit is reached or the source signals the end.
    pub fn subscribe(&self, f: impl FnMut(T) + 'static) {
        self.subscribe_with(f, SubscribeOptions::new());
    }

    /// [`subscribe`](AsyncStream::subscribe) with options. The completion
    /// callback fires exactly once, after the last value or upon reaching the
    /// limit or the end of the stream.
    pub fn subscribe_with(&self, f: impl FnMut(T) + 'static, options: SubscribeOptions) {
        let remaining = Cell::new(self.limit);
        let f = RefCell::new(f);
        let on_complete = Cell::new(options.on_complete);
        let handle = self.producer.clone();
        let pending = RefCell::new(VecDeque::new());
        let delivering = Cell::new(false);

        self.producer.subscribe(move |outcome| {
            // A callback that makes the source push again re-enters here
            // while `f` is still on the stack. Queue the outcome and let the
            // outer drain deliver it in arrival order.
            pending.borrow_mut().push_back(outcome);
            if delivering.get() {
                return;
            }
            delivering.set(true);

            loop {
                let next = pending.borrow_mut().pop_front();
                let Some(outcome) = next else { break };

                let mut done = false;
                match outcome {
                    Outcome::Value(value) => {
                        (f.borrow_mut())(value);
                        if let Some(n) = remaining.get() {
                            let n = n.saturating_sub(1);
                            remaining.set(Some(n));
                            done = n == 0;
                        }
                    }
                    Outcome::Skipped => {}
                    Outcome::End => done = true,
                }

                if done {
                    pending.borrow_mut().clear();
                    handle.unsubscribe();
                    if let Some(callback) = on_complete.take() {
                        callback();
                    }
                    break;
                }
            }

            delivering.set(false);
        });
    }

    /// Tear down the live subscription, if any.
    pub fn unsubscribe(&self) {
        self.producer.unsubscribe();
    }

    /// Collect the stream into a `Vec`, resolving once the subscription
    /// completes.
    ///
    /// The subscription is activated immediately; the returned future
    /// resolves with the values in arrival order, or rejects with
    /// [`StreamError::Unsafe`] when no limit has been declared.
    pub fn to_array(&self) -> impl Future<Output = Result<Vec<T>, StreamError>> {
        let (sender, receiver) = oneshot::channel();

        match validate::require_limit(self.limit) {
            Err(error) => {
                let _ = sender.send(Err(error));
            }
            Ok(_) => {
                let collected = Rc::new(RefCell::new(Vec::new()));
                let sink = Rc::clone(&collected);
                self.subscribe_with(
                    move |value| sink.borrow_mut().push(value),
                    SubscribeOptions::new().on_complete(move || {
                        let values = std::mem::take(&mut *collected.borrow_mut());
                        let _ = sender.send(Ok(values));
                    }),
                );
            }
        }

        async move {
            match receiver.await {
                Ok(result) => result,
                // Torn down without completing: the array never arrives,
                // matching a promise that never resolves.
                Err(_cancelled) => std::future::pending().await,
            }
        }
    }
}

impl<Source: 'static, T: 'static> Stream<T> for AsyncStream<Source, T> {
    type Mapped<U: 'static> = AsyncStream<Source, U>;

    fn map<U: 'static>(&self, f: impl Fn(T) -> U + 'static) -> AsyncStream<Source, U> {
        self.with_producer(self.producer.map(f))
    }

    fn keep(&self, predicate: impl Fn(&T) -> bool + 'static) -> Self {
        self.with_producer(self.producer.keep(predicate))
    }

    fn take(&self, n: usize) -> Result<Self, StreamError> {
        let limit = validate::limit(n)?;
        Ok(AsyncStream {
            producer: self.producer.clone(),
            limit: Some(limit),
        })
    }

    fn take_while(&self, predicate: impl Fn(&T) -> bool + 'static) -> Self {
        self.with_producer(self.producer.take_while(predicate))
    }
}
