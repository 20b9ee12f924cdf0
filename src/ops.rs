//! Curried operator constructors and free-function consumers
//!
//! Each operator here is the partially-applied form of the corresponding
//! [`Stream`] method: `map(double)` returns a stream-to-stream transform that
//! can be applied directly or folded into a pipeline with [`pipe!`]. The
//! transforms return `Result` so fallible stages (`take`) compose on the same
//! railway as infallible ones, and `pipe!` short-circuits on the first error.
//!
//! ```
//! use rivulet::prelude::*;
//! use rivulet::{ops, pipe};
//!
//! let operation = pipe![
//!     ops::map(|n: u64| n * 2),
//!     ops::keep(|n| *n > 10),
//!     ops::take(2),
//! ];
//!
//! let result = operation(sequence(1, |n| n + 1))?;
//! assert_eq!(result.to_array()?, vec![12, 14]);
//! # Ok::<(), StreamError>(())
//! ```
//!
//! Method chaining and pipeline composition are equivalent: both wrap the
//! producer one layer deeper per operator and must yield identical outputs.

use std::rc::Rc;

use crate::error::StreamError;
use crate::stream::{Stream, DEFAULT_MAX_LOOPS_WITHOUT_VALUE};
use crate::sync::SyncStream;

/// Negate a predicate.
pub fn not<T: ?Sized + 'static>(
    predicate: impl Fn(&T) -> bool + 'static,
) -> impl Fn(&T) -> bool + 'static {
    move |value| !predicate(value)
}

/// Partially-applied [`Stream::map`].
pub fn map<St, T, U>(
    f: impl Fn(T) -> U + 'static,
) -> impl Fn(St) -> Result<St::Mapped<U>, StreamError>
where
    St: Stream<T>,
    T: 'static,
    U: 'static,
{
    let f = Rc::new(f);
    move |stream| {
        let f = Rc::clone(&f);
        Ok(stream.map(move |value| f(value)))
    }
}

/// Partially-applied [`Stream::keep`].
pub fn keep<St, T>(
    predicate: impl Fn(&T) -> bool + 'static,
) -> impl Fn(St) -> Result<St, StreamError>
where
    St: Stream<T>,
    T: 'static,
{
    let predicate = Rc::new(predicate);
    move |stream| {
        let predicate = Rc::clone(&predicate);
        Ok(stream.keep(move |value| predicate(value)))
    }
}

/// Partially-applied [`Stream::reject`].
pub fn reject<St, T>(
    predicate: impl Fn(&T) -> bool + 'static,
) -> impl Fn(St) -> Result<St, StreamError>
where
    St: Stream<T>,
    T: 'static,
{
    let predicate = Rc::new(predicate);
    move |stream| {
        let predicate = Rc::clone(&predicate);
        Ok(stream.reject(move |value| predicate(value)))
    }
}

/// Partially-applied [`Stream::take`].
pub fn take<St, T>(n: usize) -> impl Fn(St) -> Result<St, StreamError>
where
    St: Stream<T>,
    T: 'static,
{
    move |stream| stream.take(n)
}

/// Partially-applied [`Stream::take_while`].
pub fn take_while<St, T>(
    predicate: impl Fn(&T) -> bool + 'static,
) -> impl Fn(St) -> Result<St, StreamError>
where
    St: Stream<T>,
    T: 'static,
{
    let predicate = Rc::new(predicate);
    move |stream| {
        let predicate = Rc::clone(&predicate);
        Ok(stream.take_while(move |value| predicate(value)))
    }
}

/// Partially-applied [`Stream::take_until`].
pub fn take_until<St, T>(
    predicate: impl Fn(&T) -> bool + 'static,
) -> impl Fn(St) -> Result<St, StreamError>
where
    St: Stream<T>,
    T: 'static,
{
    let predicate = Rc::new(predicate);
    move |stream| {
        let predicate = Rc::clone(&predicate);
        Ok(stream.take_until(move |value| predicate(value)))
    }
}

/// Compose operator transforms left-to-right into a single stream-to-stream
/// transform.
///
/// The resulting closure applies each stage in declaration order and
/// short-circuits on the first error, returning
/// `Result<Stream, StreamError>`.
///
/// ```
/// use rivulet::prelude::*;
/// use rivulet::{ops, pipe};
///
/// let first_squares = pipe![
///     ops::map(|n: u32| n * n),
///     ops::take(3),
/// ];
///
/// assert_eq!(
///     first_squares(sequence(1, |n| n + 1))?.to_array()?,
///     vec![1, 4, 9],
/// );
/// # Ok::<(), StreamError>(())
/// ```
#[macro_export]
macro_rules! pipe {
    ($($op:expr),+ $(,)?) => {
        move |stream| {
            $(let stream = ($op)(stream)?;)+
            ::core::result::Result::Ok::<_, $crate::StreamError>(stream)
        }
    };
}

// Free-function consumer forms for the pull-based stream, mirroring the
// operator constructors above for callers who prefer a point-free style.

/// Materialize a limited stream into a `Vec`, in order.
pub fn to_array<T: 'static>(stream: &SyncStream<T>) -> Result<Vec<T>, StreamError> {
    stream.to_array()
}

/// [`to_array`] with an explicit infinite-loop-detection ceiling.
pub fn to_array_with<T: 'static>(
    stream: &SyncStream<T>,
    max_loops_without_value: usize,
) -> Result<Vec<T>, StreamError> {
    stream.to_array_with(max_loops_without_value)
}

/// Materialize without the declared-limit precondition. The loop guard still
/// applies.
pub fn to_array_unchecked<T: 'static>(stream: &SyncStream<T>) -> Result<Vec<T>, StreamError> {
    stream.to_array_unchecked_with(DEFAULT_MAX_LOOPS_WITHOUT_VALUE)
}

/// [`to_array_unchecked`] with an explicit loop ceiling.
pub fn to_array_unchecked_with<T: 'static>(
    stream: &SyncStream<T>,
    max_loops_without_value: usize,
) -> Result<Vec<T>, StreamError> {
    stream.to_array_unchecked_with(max_loops_without_value)
}

/// Invoke `f` once per element of a limited stream.
pub fn each<T: 'static>(f: impl FnMut(T), stream: &SyncStream<T>) -> Result<(), StreamError> {
    stream.each(f)
}

/// [`each`] with an explicit loop ceiling.
pub fn each_with<T: 'static>(
    f: impl FnMut(T),
    stream: &SyncStream<T>,
    max_loops_without_value: usize,
) -> Result<(), StreamError> {
    stream.each_with(f, max_loops_without_value)
}

/// [`each`] without the declared-limit precondition.
pub fn each_unchecked<T: 'static>(
    f: impl FnMut(T),
    stream: &SyncStream<T>,
) -> Result<(), StreamError> {
    stream.each_unchecked_with(f, DEFAULT_MAX_LOOPS_WITHOUT_VALUE)
}

/// [`each_unchecked`] with an explicit loop ceiling.
pub fn each_unchecked_with<T: 'static>(
    f: impl FnMut(T),
    stream: &SyncStream<T>,
    max_loops_without_value: usize,
) -> Result<(), StreamError> {
    stream.each_unchecked_with(f, max_loops_without_value)
}

/// Per-element callback consumption; alias for [`each`] on the pull-based
/// path.
pub fn subscribe<T: 'static>(f: impl FnMut(T), stream: &SyncStream<T>) -> Result<(), StreamError> {
    stream.each(f)
}
