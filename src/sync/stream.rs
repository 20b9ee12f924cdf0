//! Pull-based streams and the consumer driver loop
//!
//! A [`SyncStream`] wraps a [`SyncProducer`] plus an optional declared
//! element limit. The limit is the stream's safety contract: `None` means
//! unbounded, and full materialization is refused until a `take(n)` declares
//! an upper bound. Consumers drive the producer's step chain to exhaustion or
//! to that bound, guarding against compositions that filter everything out of
//! an infinite source.

use crate::error::StreamError;
use crate::stream::{Stream, SubscribeOptions, DEFAULT_MAX_LOOPS_WITHOUT_VALUE};
use crate::sync::producer::{Step, SyncProducer};
use crate::validate;

/// A lazily-evaluated, composable sequence driven by a consumer loop.
///
/// Streams are persistent values: every operator returns a brand-new stream
/// and `Clone` is cheap (the producer is reference-counted). Because
/// producers are pure closures, a sync stream may be consumed any number of
/// times; each consumption re-drives the producer from its start.
///
/// # Examples
///
/// ```
/// use rivulet::prelude::*;
///
/// let odds = sequence(1, |n| n + 2).take(4)?;
/// assert_eq!(odds.to_array()?, vec![1, 3, 5, 7]);
/// # Ok::<(), StreamError>(())
/// ```
#[derive(Debug)]
pub struct SyncStream<T> {
    producer: SyncProducer<T>,
    limit: Option<usize>,
}

impl<T> Clone for SyncStream<T> {
    fn clone(&self) -> Self {
        SyncStream {
            producer: self.producer.clone(),
            limit: self.limit,
        }
    }
}

impl<T: 'static> SyncStream<T> {
    pub(crate) fn new(producer: SyncProducer<T>) -> Self {
        SyncStream {
            producer,
            limit: None,
        }
    }

    pub(crate) fn with_limit(producer: SyncProducer<T>, limit: Option<usize>) -> Self {
        SyncStream { producer, limit }
    }

    /// The declared element limit, if one has been established.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Materialize the stream into a `Vec`, in order.
    ///
    /// Fails with [`StreamError::Unsafe`] when no limit has been declared.
    ///
    /// ```
    /// use rivulet::prelude::*;
    ///
    /// let naturals = sequence(1, |n| n + 1);
    /// assert_eq!(naturals.to_array(), Err(StreamError::Unsafe));
    /// assert_eq!(naturals.take(5)?.to_array()?, vec![1, 2, 3, 4, 5]);
    /// # Ok::<(), StreamError>(())
    /// ```
    pub fn to_array(&self) -> Result<Vec<T>, StreamError> {
        self.to_array_with(DEFAULT_MAX_LOOPS_WITHOUT_VALUE)
    }

    /// [`to_array`](SyncStream::to_array) with an explicit ceiling on
    /// consecutive non-value steps.
    pub fn to_array_with(&self, max_loops_without_value: usize) -> Result<Vec<T>, StreamError> {
        validate::require_limit(self.limit)?;
        self.to_array_unchecked_with(max_loops_without_value)
    }

    /// Materialize without the declared-limit precondition.
    ///
    /// The infinite-loop guard still applies; an unbounded stream of values
    /// (as opposed to skips) will run until the caller's patience, not the
    /// library's, runs out.
    pub fn to_array_unchecked(&self) -> Result<Vec<T>, StreamError> {
        self.to_array_unchecked_with(DEFAULT_MAX_LOOPS_WITHOUT_VALUE)
    }

    /// [`to_array_unchecked`](SyncStream::to_array_unchecked) with an
    /// explicit loop ceiling.
    pub fn to_array_unchecked_with(
        &self,
        max_loops_without_value: usize,
    ) -> Result<Vec<T>, StreamError> {
        let mut values = Vec::new();
        self.each_unchecked_with(|value| values.push(value), max_loops_without_value)?;
        Ok(values)
    }

    /// Invoke `f` once per element, in order.
    ///
    /// Same safety rules as [`to_array`](SyncStream::to_array).
    pub fn each(&self, f: impl FnMut(T)) -> Result<(), StreamError> {
        self.each_with(f, DEFAULT_MAX_LOOPS_WITHOUT_VALUE)
    }

    /// [`each`](SyncStream::each) with an explicit loop ceiling.
    pub fn each_with(
        &self,
        f: impl FnMut(T),
        max_loops_without_value: usize,
    ) -> Result<(), StreamError> {
        validate::require_limit(self.limit)?;
        self.each_unchecked_with(f, max_loops_without_value)
    }

    /// [`each`](SyncStream::each) without the declared-limit precondition.
    pub fn each_unchecked(&self, f: impl FnMut(T)) -> Result<(), StreamError> {
        self.each_unchecked_with(f, DEFAULT_MAX_LOOPS_WITHOUT_VALUE)
    }

    /// The driver loop.
    ///
    /// Pulls steps from the producer until the stream ends or the declared
    /// count of values has been emitted. A running count of consecutive
    /// skipped steps guards against predicates that never match on an
    /// infinite source: once it exceeds `max_loops_without_value` before the
    /// next value arrives, the loop fails with
    /// [`StreamError::PossibleInfiniteLoop`] instead of spinning forever.
    pub fn each_unchecked_with(
        &self,
        mut f: impl FnMut(T),
        max_loops_without_value: usize,
    ) -> Result<(), StreamError> {
        let mut remaining = self.limit;
        if remaining == Some(0) {
            return Ok(());
        }

        let mut loops_since_value = 0usize;
        let mut step = self.producer.run();

        loop {
            match step {
                Step::End => break,
                Step::Value(value, next) => {
                    f(value);
                    loops_since_value = 0;
                    if let Some(n) = remaining.as_mut() {
                        *n -= 1;
                        if *n == 0 {
                            break;
                        }
                    }
                    step = next.run();
                }
                Step::Skipped(next) => {
                    loops_since_value += 1;
                    if loops_since_value > max_loops_without_value {
                        #[cfg(feature = "tracing")]
                        tracing::debug!(
                            ceiling = max_loops_without_value,
                            "loop guard tripped without a value"
                        );
                        return Err(StreamError::PossibleInfiniteLoop);
                    }
                    step = next.run();
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(limit = ?self.limit, "stream consumed");

        Ok(())
    }

    /// Per-element callback consumption; alias for
    /// [`each`](SyncStream::each).
    pub fn subscribe(&self, f: impl FnMut(T)) -> Result<(), StreamError> {
        self.each(f)
    }

    /// [`subscribe`](SyncStream::subscribe) with options. The completion
    /// callback fires exactly once, after the loop finishes normally.
    pub fn subscribe_with(
        &self,
        f: impl FnMut(T),
        options: SubscribeOptions,
    ) -> Result<(), StreamError> {
        self.each(f)?;
        if let Some(on_complete) = options.on_complete {
            on_complete();
        }
        Ok(())
    }
}

impl<T: 'static> Stream<T> for SyncStream<T> {
    type Mapped<U: 'static> = SyncStream<U>;

    fn map<U: 'static>(&self, f: impl Fn(T) -> U + 'static) -> SyncStream<U> {
        SyncStream::with_limit(self.producer.map(f), self.limit)
    }

    fn keep(&self, predicate: impl Fn(&T) -> bool + 'static) -> Self {
        SyncStream::with_limit(self.producer.keep(predicate), self.limit)
    }

    fn take(&self, n: usize) -> Result<Self, StreamError> {
        let limit = validate::limit(n)?;
        Ok(SyncStream::with_limit(self.producer.clone(), Some(limit)))
    }

    fn take_while(&self, predicate: impl Fn(&T) -> bool + 'static) -> Self {
        SyncStream::with_limit(self.producer.take_while(predicate), self.limit)
    }
}
