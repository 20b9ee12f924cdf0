//! Deferred synchronous producers
//!
//! A [`SyncProducer`] is a suspended computation: a shared thunk that, when
//! run, returns exactly one [`Step`]. Operators compose by closing over the
//! source producer and rewrapping every continuation, so laziness is
//! preserved under arbitrary stacking — nothing is evaluated until a consumer
//! drives the chain.
//!
//! Composition performs no visible side effects; effects happen only inside
//! [`run`](SyncProducer::run). Producers are pure closures, so re-running one
//! recomputes the same steps from scratch.

use std::fmt;
use std::rc::Rc;

/// The continuation-carrying result of one synchronous evaluation step.
///
/// `End` is terminal and never carries a continuation; `Value` and `Skipped`
/// always do. Steps are never reused or mutated: each `run` builds a fresh
/// one.
#[derive(Clone)]
pub enum Step<T> {
    /// A produced element and the producer for the remainder.
    Value(T, SyncProducer<T>),
    /// No element this step (filtered out); the sequence continues.
    Skipped(SyncProducer<T>),
    /// The sequence is exhausted.
    End,
}

impl<T: fmt::Debug> fmt::Debug for Step<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Value(value, _) => f.debug_tuple("Value").field(value).finish(),
            Step::Skipped(_) => f.write_str("Skipped"),
            Step::End => f.write_str("End"),
        }
    }
}

/// A deferred computation yielding one [`Step`] per invocation.
pub struct SyncProducer<T> {
    thunk: Rc<dyn Fn() -> Step<T>>,
}

impl<T> Clone for SyncProducer<T> {
    fn clone(&self) -> Self {
        SyncProducer {
            thunk: Rc::clone(&self.thunk),
        }
    }
}

impl<T> fmt::Debug for SyncProducer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncProducer")
            .field("thunk", &"<thunk>")
            .finish()
    }
}

impl<T: 'static> SyncProducer<T> {
    /// Wrap a thunk as a producer.
    pub fn new(thunk: impl Fn() -> Step<T> + 'static) -> Self {
        SyncProducer {
            thunk: Rc::new(thunk),
        }
    }

    /// Force one evaluation step.
    pub fn run(&self) -> Step<T> {
        (self.thunk)()
    }

    /// A producer whose value and every continuation are mapped through `f`.
    pub fn map<U: 'static>(&self, f: impl Fn(T) -> U + 'static) -> SyncProducer<U> {
        self.map_shared(Rc::new(f))
    }

    fn map_shared<U: 'static>(&self, f: Rc<dyn Fn(T) -> U>) -> SyncProducer<U> {
        let source = self.clone();
        SyncProducer::new(move || match source.run() {
            Step::Value(value, next) => Step::Value(f(value), next.map_shared(Rc::clone(&f))),
            Step::Skipped(next) => Step::Skipped(next.map_shared(Rc::clone(&f))),
            Step::End => Step::End,
        })
    }

    /// A producer that converts values failing the predicate into skipped
    /// steps, continuing past them.
    pub fn keep(&self, predicate: impl Fn(&T) -> bool + 'static) -> SyncProducer<T> {
        self.keep_shared(Rc::new(predicate))
    }

    fn keep_shared(&self, predicate: Rc<dyn Fn(&T) -> bool>) -> SyncProducer<T> {
        let source = self.clone();
        SyncProducer::new(move || match source.run() {
            Step::Value(value, next) => {
                let rest = next.keep_shared(Rc::clone(&predicate));
                if predicate(&value) {
                    Step::Value(value, rest)
                } else {
                    Step::Skipped(rest)
                }
            }
            Step::Skipped(next) => Step::Skipped(next.keep_shared(Rc::clone(&predicate))),
            Step::End => Step::End,
        })
    }

    /// A producer that ends the sequence at the first value failing the
    /// predicate.
    pub fn take_while(&self, predicate: impl Fn(&T) -> bool + 'static) -> SyncProducer<T> {
        self.take_while_shared(Rc::new(predicate))
    }

    fn take_while_shared(&self, predicate: Rc<dyn Fn(&T) -> bool>) -> SyncProducer<T> {
        let source = self.clone();
        SyncProducer::new(move || match source.run() {
            Step::Value(value, next) => {
                if predicate(&value) {
                    Step::Value(value, next.take_while_shared(Rc::clone(&predicate)))
                } else {
                    Step::End
                }
            }
            Step::Skipped(next) => Step::Skipped(next.take_while_shared(Rc::clone(&predicate))),
            Step::End => Step::End,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting_from(n: i32) -> SyncProducer<i32> {
        SyncProducer::new(move || Step::Value(n, counting_from(n + 1)))
    }

    fn take_values(producer: &SyncProducer<i32>, count: usize) -> Vec<i32> {
        let mut values = Vec::new();
        let mut step = producer.run();
        while values.len() < count {
            match step {
                Step::Value(value, next) => {
                    values.push(value);
                    step = next.run();
                }
                Step::Skipped(next) => step = next.run(),
                Step::End => break,
            }
        }
        values
    }

    #[test]
    fn map_rewraps_every_continuation() {
        let doubled = counting_from(1).map(|n| n * 2);
        assert_eq!(take_values(&doubled, 4), vec![2, 4, 6, 8]);
    }

    #[test]
    fn keep_skips_rather_than_ending() {
        let evens = counting_from(1).keep(|n| n % 2 == 0);
        assert_eq!(take_values(&evens, 3), vec![2, 4, 6]);
    }

    #[test]
    fn keep_emits_skipped_steps_for_rejections() {
        let producer = counting_from(1).keep(|n| *n > 1);
        match producer.run() {
            Step::Skipped(next) => match next.run() {
                Step::Value(value, _) => assert_eq!(value, 2),
                other => panic!("expected a value, got {other:?}"),
            },
            other => panic!("expected a skipped step, got {other:?}"),
        }
    }

    #[test]
    fn take_while_ends_at_first_rejection() {
        let producer = counting_from(1).take_while(|n| *n < 4);
        assert_eq!(take_values(&producer, 10), vec![1, 2, 3]);
    }

    #[test]
    fn rerunning_a_producer_recomputes_from_scratch() {
        let producer = counting_from(1).map(|n| n + 10);
        assert_eq!(take_values(&producer, 2), vec![11, 12]);
        assert_eq!(take_values(&producer, 2), vec![11, 12]);
    }

    #[test]
    fn composition_is_lazy() {
        use std::cell::Cell;
        use std::rc::Rc;

        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let producer = counting_from(1).map(move |n| {
            seen.set(seen.get() + 1);
            n
        });

        assert_eq!(calls.get(), 0);
        let _ = producer.run();
        assert_eq!(calls.get(), 1);
    }
}
