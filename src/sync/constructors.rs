//! Constructors for pull-based streams.

use std::rc::Rc;

use crate::sync::producer::{Step, SyncProducer};
use crate::sync::stream::SyncStream;

/// An infinite stream seeded with `value`, where each element generates the
/// next.
///
/// The stream is unbounded, so it must be limited with `take(n)` before full
/// materialization.
///
/// # Examples
///
/// ```
/// use rivulet::prelude::*;
///
/// let powers = sequence(1u64, |n| n * 2).take(5)?;
/// assert_eq!(powers.to_array()?, vec![1, 2, 4, 8, 16]);
/// # Ok::<(), StreamError>(())
/// ```
pub fn sequence<T>(value: T, generate_next: impl Fn(&T) -> T + 'static) -> SyncStream<T>
where
    T: Clone + 'static,
{
    SyncStream::new(sequence_producer(value, Rc::new(generate_next)))
}

fn sequence_producer<T>(value: T, generate_next: Rc<dyn Fn(&T) -> T>) -> SyncProducer<T>
where
    T: Clone + 'static,
{
    SyncProducer::new(move || {
        let next_value = generate_next(&value);
        Step::Value(
            value.clone(),
            sequence_producer(next_value, Rc::clone(&generate_next)),
        )
    })
}

/// A stream over the elements of a `Vec`, in order.
///
/// The array's length is declared as the stream's limit, so the result is
/// inherently safe to materialize without an explicit `take`.
///
/// # Examples
///
/// ```
/// use rivulet::prelude::*;
///
/// let stream = from_array(vec!["a", "b", "c"]);
/// assert_eq!(stream.to_array()?, vec!["a", "b", "c"]);
/// # Ok::<(), StreamError>(())
/// ```
pub fn from_array<T>(items: Vec<T>) -> SyncStream<T>
where
    T: Clone + 'static,
{
    let len = items.len();
    SyncStream::with_limit(from_index(Rc::new(items), 0), Some(len))
}

fn from_index<T>(items: Rc<Vec<T>>, index: usize) -> SyncProducer<T>
where
    T: Clone + 'static,
{
    SyncProducer::new(move || match items.get(index) {
        Some(value) => Step::Value(value.clone(), from_index(Rc::clone(&items), index + 1)),
        None => Step::End,
    })
}

/// An infinite stream that re-invokes `f` for every element.
///
/// # Examples
///
/// ```
/// use rivulet::prelude::*;
///
/// let zeros = from_fn(|| 0).take(3)?;
/// assert_eq!(zeros.to_array()?, vec![0, 0, 0]);
/// # Ok::<(), StreamError>(())
/// ```
pub fn from_fn<T: 'static>(f: impl Fn() -> T + 'static) -> SyncStream<T> {
    SyncStream::new(from_fn_producer(Rc::new(f)))
}

fn from_fn_producer<T: 'static>(f: Rc<dyn Fn() -> T>) -> SyncProducer<T> {
    SyncProducer::new(move || Step::Value(f(), from_fn_producer(Rc::clone(&f))))
}
