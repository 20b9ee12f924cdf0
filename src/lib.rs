//! # Rivulet
//!
//! > *"A small stream, composed"*
//!
//! A Rust library for lazy, composable stream processing with explicit
//! safety for unbounded sources.
//!
//! ## Philosophy
//!
//! **Rivulet** gives you array-like ergonomics (`.map().keep().take()`) over
//! data that may be infinite, asynchronous, or unbounded — while staying
//! explicit about when an unbounded computation is actually safe to fully
//! evaluate:
//!
//! - Streams are **suspended computations**: nothing runs until a consumer
//!   drives them, no matter how many operators are stacked.
//! - Materialization requires a **declared limit**: `to_array` on an
//!   unbounded stream is refused rather than left to hang the process.
//! - The driver loop **fails predictably**: compositions that filter
//!   everything out of an infinite source trip an infinite-loop guard
//!   instead of spinning forever.
//!
//! ## Quick Example
//!
//! ```rust
//! use rivulet::prelude::*;
//!
//! let naturals = sequence(1u64, |n| n + 1);
//!
//! // Unbounded: full materialization is refused.
//! assert_eq!(naturals.to_array(), Err(StreamError::Unsafe));
//!
//! // A declared limit makes the same stream safe.
//! let result = naturals
//!     .map(|n| n * 2)
//!     .keep(|n| *n > 10)
//!     .reject(|n| *n > 20)
//!     .take(2)?
//!     .map(|n| n.to_string())
//!     .to_array()?;
//!
//! assert_eq!(result, vec!["12", "14"]);
//! # Ok::<(), StreamError>(())
//! ```
//!
//! The same operator surface drives push-based sources:
//!
//! ```rust
//! use std::rc::Rc;
//! use rivulet::prelude::*;
//! use rivulet::testing::EventEmitter;
//!
//! # tokio_test::block_on(async {
//! let emitter = Rc::new(EventEmitter::new());
//! let doubled = from_event(Rc::clone(&emitter), "tick")
//!     .map(|n: i32| n * 2)
//!     .take(5)
//!     .unwrap();
//!
//! let result = doubled.to_array();
//! for n in 1..=5 {
//!     emitter.emit("tick", n);
//! }
//! assert_eq!(result.await.unwrap(), vec![2, 4, 6, 8, 10]);
//! # });
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod ops;
pub mod outcome;
pub mod push;
pub mod stream;
pub mod sync;
pub mod testing;
mod validate;

// Re-exports
pub use error::StreamError;
pub use outcome::Outcome;
pub use push::{create, from_event, AsyncProducer, AsyncStream, EventSource, Subscriber, Teardown};
pub use stream::{Stream, SubscribeOptions, DEFAULT_MAX_LOOPS_WITHOUT_VALUE};
pub use sync::{from_array, from_fn, sequence, Step, SyncProducer, SyncStream};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::StreamError;
    pub use crate::outcome::Outcome;
    pub use crate::push::{create, from_event, AsyncStream, EventSource, Subscriber};
    pub use crate::stream::{Stream, SubscribeOptions, DEFAULT_MAX_LOOPS_WITHOUT_VALUE};
    pub use crate::sync::{from_array, from_fn, sequence, SyncStream};
}
