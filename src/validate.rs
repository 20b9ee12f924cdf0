//! Limit validation shared by both stream flavors.

use crate::error::StreamError;

/// Validate an element count passed to `take`.
///
/// Zero cannot bound a stream under the chosen policy (no silent empty
/// stream), so it is rejected outright rather than clamped.
pub(crate) fn limit(n: usize) -> Result<usize, StreamError> {
    if n == 0 {
        return Err(StreamError::UnsafeNumber(n));
    }

    Ok(n)
}

/// Enforce the limit-before-unbounded-consumption invariant.
pub(crate) fn require_limit(limit: Option<usize>) -> Result<usize, StreamError> {
    limit.ok_or(StreamError::Unsafe)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero() {
        assert_eq!(limit(0), Err(StreamError::UnsafeNumber(0)));
    }

    #[test]
    fn accepts_positive_counts() {
        assert_eq!(limit(1), Ok(1));
        assert_eq!(limit(10_000), Ok(10_000));
    }

    #[test]
    fn require_limit_rejects_unbounded_streams() {
        assert_eq!(require_limit(None), Err(StreamError::Unsafe));
        assert_eq!(require_limit(Some(5)), Ok(5));
    }
}
