//! The push-based (asynchronous) stream flavor
//!
//! Instead of being pulled by a driver loop, these streams are driven by an
//! external push source: an event emitter, or any function that accepts a
//! [`Subscriber`] and pushes values over time. The library never blocks and
//! never spawns workers; suspension happens only where the source schedules
//! its next emission. Construct with [`create`] or [`from_event`], compose
//! with the [`Stream`](crate::Stream) operators, and consume with
//! [`AsyncStream::subscribe`] or [`AsyncStream::to_array`].

mod constructors;
mod producer;
mod stream;

pub use constructors::{create, from_event, EventSource};
pub use producer::{AsyncProducer, Subscriber, Teardown};
pub use stream::AsyncStream;
