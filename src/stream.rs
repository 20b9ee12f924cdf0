//! The operator surface shared by both stream flavors
//!
//! [`SyncStream`](crate::sync::SyncStream) (pull-based, driven by a loop) and
//! [`AsyncStream`](crate::push::AsyncStream) (push-based, driven by an
//! external source) expose the identical operator algebra through the
//! [`Stream`] trait. Code generic over either flavor — notably the curried
//! operator constructors in [`ops`](crate::ops) — is written against this
//! trait without caring which side it is driving.
//!
//! Operators apply left-to-right in declaration order, each wrapping the
//! previous stream's producer. Every operator returns a brand-new stream;
//! streams are persistent values and composition never mutates its input.

use crate::error::StreamError;
use crate::ops::not;

/// Default ceiling for consecutive non-value steps before the driver loop
/// gives up with [`StreamError::PossibleInfiniteLoop`].
///
/// Every consumer entry point accepts an explicit override; there is no
/// hidden mutable global state.
pub const DEFAULT_MAX_LOOPS_WITHOUT_VALUE: usize = 10_000;

/// The operator algebra over lazily-evaluated streams.
///
/// Both stream flavors implement this trait, so pipelines read the same
/// whether the underlying source is a pure generation function or an event
/// emitter:
///
/// ```
/// use rivulet::prelude::*;
///
/// let evens = sequence(1u32, |n| n + 1)
///     .map(|n| n * 2)
///     .take(3)?;
///
/// assert_eq!(evens.to_array()?, vec![2, 4, 6]);
/// # Ok::<(), StreamError>(())
/// ```
pub trait Stream<T: 'static>: Sized {
    /// The stream type produced by [`map`](Stream::map), carrying the new
    /// element type.
    type Mapped<U: 'static>: Stream<U>;

    /// Transform every element with `f`.
    fn map<U: 'static>(&self, f: impl Fn(T) -> U + 'static) -> Self::Mapped<U>;

    /// Keep only elements satisfying the predicate. Rejected elements become
    /// skipped steps; the sequence continues past them.
    fn keep(&self, predicate: impl Fn(&T) -> bool + 'static) -> Self;

    /// Drop elements satisfying the predicate. Defined as `keep` of the
    /// negated predicate.
    fn reject(&self, predicate: impl Fn(&T) -> bool + 'static) -> Self {
        self.keep(not(predicate))
    }

    /// Declare an upper bound of `n` elements, making the stream safe to
    /// fully materialize.
    ///
    /// Fails with [`StreamError::UnsafeNumber`] when `n` is zero; validation
    /// happens at call time, before any evaluation. A later `take` overwrites
    /// any earlier limit outright — `take(3)` after `take(5)` leaves the
    /// limit at 3, and `take(5)` after `take(3)` leaves it at 5. The limits
    /// are not intersected.
    fn take(&self, n: usize) -> Result<Self, StreamError>;

    /// Emit elements while the predicate holds, then end the stream at the
    /// FIRST failing element — even if later elements would satisfy the
    /// predicate again. Contrast with [`keep`](Stream::keep), which
    /// continues past rejections.
    fn take_while(&self, predicate: impl Fn(&T) -> bool + 'static) -> Self;

    /// Emit elements until the predicate first holds. Defined as
    /// `take_while` of the negated predicate.
    fn take_until(&self, predicate: impl Fn(&T) -> bool + 'static) -> Self {
        self.take_while(not(predicate))
    }
}

/// Options accepted by `subscribe_with` on both stream flavors.
#[derive(Default)]
pub struct SubscribeOptions {
    pub(crate) on_complete: Option<Box<dyn FnOnce()>>,
}

impl SubscribeOptions {
    /// Options with no completion callback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback fired exactly once, after the last value or upon
    /// reaching the declared limit or the end of the stream.
    pub fn on_complete(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }
}

impl std::fmt::Debug for SubscribeOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscribeOptions")
            .field(
                "on_complete",
                &self.on_complete.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_options_default_has_no_callback() {
        assert!(SubscribeOptions::new().on_complete.is_none());
    }

    #[test]
    fn subscribe_options_stores_callback() {
        let options = SubscribeOptions::new().on_complete(|| {});
        assert!(options.on_complete.is_some());
    }
}
