//! Error types for stream construction and consumption
//!
//! All three variants signal programmer error rather than transient
//! conditions: the fix is to change the stream composition (add a `take`,
//! bound a predicate), not to retry.

use std::error::Error as StdError;
use std::fmt;

/// Errors produced while building or consuming a stream.
///
/// # Examples
///
/// ```
/// use rivulet::prelude::*;
///
/// let naturals = sequence(1, |n| n + 1);
/// assert_eq!(naturals.to_array(), Err(StreamError::Unsafe));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// `take` was given an element count that cannot bound a stream.
    ///
    /// The count is carried so the message can echo it back. Fractional or
    /// infinite counts are unrepresentable in `usize`, which leaves zero as
    /// the one invalid input.
    UnsafeNumber(usize),
    /// Full materialization was requested on a stream with no declared limit.
    Unsafe,
    /// The driver loop saw too many consecutive filtered-out steps without
    /// producing a value.
    PossibleInfiniteLoop,
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::UnsafeNumber(n) => {
                write!(f, "please provide a positive element count for `take`: {n}")
            }
            StreamError::Unsafe => write!(
                f,
                "stream is unsafe and could produce an infinite loop; \
                 limit your results with `take(n)`"
            ),
            StreamError::PossibleInfiniteLoop => write!(
                f,
                "possible infinite loop: check any `keep` or `reject` operations that \
                 never find a matching value or cannot find enough matching values for `take(n)`"
            ),
        }
    }
}

impl StdError for StreamError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsafe_number_echoes_the_count() {
        let message = StreamError::UnsafeNumber(0).to_string();
        assert!(message.contains("`take`"));
        assert!(message.contains('0'));
    }

    #[test]
    fn unsafe_suggests_take() {
        let message = StreamError::Unsafe.to_string();
        assert!(message.contains("take(n)"));
    }

    #[test]
    fn possible_infinite_loop_mentions_filters() {
        let message = StreamError::PossibleInfiniteLoop.to_string();
        assert!(message.contains("keep"));
        assert!(message.contains("reject"));
    }

    #[test]
    fn implements_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(StreamError::Unsafe);
        assert!(err.source().is_none());
    }
}
