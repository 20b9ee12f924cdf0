//! The pull-based (synchronous) stream flavor
//!
//! Evaluation is single-threaded and fully cooperative: `run()` always
//! returns immediately and the driver loop is a plain iteration with no
//! yielding to any scheduler. Construct with [`sequence`], [`from_array`],
//! or [`from_fn`], compose with the [`Stream`](crate::Stream) operators, and
//! consume with the `to_array` / `each` family on [`SyncStream`].

mod constructors;
mod producer;
mod stream;

pub use constructors::{from_array, from_fn, sequence};
pub use producer::{Step, SyncProducer};
pub use stream::SyncStream;
