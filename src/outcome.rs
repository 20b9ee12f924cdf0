//! The atomic result of one evaluation step
//!
//! `Outcome<T>` is the leaf the whole operator algebra is built on: a step
//! either produced a value, produced nothing because a filter rejected it, or
//! announced that the sequence is exhausted. The helper methods each apply a
//! single operator's semantics to a single step; producers compose them over
//! their sources to stay lazy at every depth.
//!
//! The pull-based path pairs an `Outcome` with a continuation (see
//! [`Step`](crate::sync::Step)); the push-based path applies `Outcome`
//! transforms to each value an external source pushes.

/// One evaluation step's result.
///
/// Outcomes are immutable values: every helper consumes `self` and returns a
/// new outcome, never mutating in place.
///
/// # Examples
///
/// ```
/// use rivulet::Outcome;
///
/// let step = Outcome::Value(3).map(|n| n * 2);
/// assert_eq!(step, Outcome::Value(6));
///
/// let skipped = Outcome::Value(3).keep(|n| *n > 10);
/// assert_eq!(skipped, Outcome::Skipped);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The step produced an element.
    Value(T),
    /// The step produced no element (filtered out) but the sequence continues.
    Skipped,
    /// The sequence is exhausted. Terminal.
    End,
}

impl<T> Outcome<T> {
    /// Apply one `map` step: transform the payload of a `Value`, pass
    /// `Skipped` and `End` through unchanged.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Value(value) => Outcome::Value(f(value)),
            Outcome::Skipped => Outcome::Skipped,
            Outcome::End => Outcome::End,
        }
    }

    /// Apply one `keep` step: a `Value` failing the predicate becomes
    /// `Skipped` and the sequence continues past it.
    pub fn keep(self, predicate: impl FnOnce(&T) -> bool) -> Outcome<T> {
        match self {
            Outcome::Value(value) if predicate(&value) => Outcome::Value(value),
            Outcome::Value(_) => Outcome::Skipped,
            other => other,
        }
    }

    /// Apply one `take_while` step: a `Value` failing the predicate becomes
    /// `End` immediately. This is a hard stop, unlike [`keep`](Outcome::keep)
    /// which continues past rejected elements.
    pub fn take_while(self, predicate: impl FnOnce(&T) -> bool) -> Outcome<T> {
        match self {
            Outcome::Value(value) if predicate(&value) => Outcome::Value(value),
            Outcome::Value(_) => Outcome::End,
            other => other,
        }
    }

    /// True when this step produced an element.
    pub fn has_value(&self) -> bool {
        matches!(self, Outcome::Value(_))
    }

    /// True when the sequence is exhausted.
    pub fn is_end(&self) -> bool {
        matches!(self, Outcome::End)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_transforms_values_only() {
        assert_eq!(Outcome::Value(2).map(|n| n + 1), Outcome::Value(3));
        assert_eq!(Outcome::<i32>::Skipped.map(|n| n + 1), Outcome::Skipped);
        assert_eq!(Outcome::<i32>::End.map(|n| n + 1), Outcome::End);
    }

    #[test]
    fn keep_converts_rejected_values_to_skipped() {
        assert_eq!(Outcome::Value(5).keep(|n| *n > 3), Outcome::Value(5));
        assert_eq!(Outcome::Value(1).keep(|n| *n > 3), Outcome::Skipped);
        assert_eq!(Outcome::<i32>::Skipped.keep(|n| *n > 3), Outcome::Skipped);
        assert_eq!(Outcome::<i32>::End.keep(|n| *n > 3), Outcome::End);
    }

    #[test]
    fn take_while_converts_rejected_values_to_end() {
        assert_eq!(Outcome::Value(2).take_while(|n| *n < 4), Outcome::Value(2));
        assert_eq!(Outcome::Value(9).take_while(|n| *n < 4), Outcome::End);
        assert_eq!(
            Outcome::<i32>::Skipped.take_while(|n| *n < 4),
            Outcome::Skipped
        );
    }

    #[test]
    fn observers() {
        assert!(Outcome::Value(1).has_value());
        assert!(!Outcome::<i32>::Skipped.has_value());
        assert!(Outcome::<i32>::End.is_end());
        assert!(!Outcome::Value(1).is_end());
    }
}
