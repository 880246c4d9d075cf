//! Conversions between [`Reaction`] and standard library types.

use std::fmt;

use super::{Failure, Reaction};

// =============================================================================
// Display Implementation
// =============================================================================

impl<T: fmt::Display> fmt::Display for Reaction<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(value) => write!(formatter, "Success({value})"),
            Self::Error(failure) => write!(formatter, "Error({failure})"),
        }
    }
}

// =============================================================================
// From Implementations
// =============================================================================

impl<T> From<Result<T, Failure>> for Reaction<T> {
    /// `Ok(v)` becomes `Success(v)`, `Err(f)` becomes `Error(f)`.
    #[inline]
    fn from(result: Result<T, Failure>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(failure) => Self::Error(failure),
        }
    }
}

impl<T> From<Reaction<T>> for Result<T, Failure> {
    /// Same as [`Reaction::get`].
    #[inline]
    fn from(reaction: Reaction<T>) -> Self {
        reaction.get()
    }
}

// =============================================================================
// FromIterator Implementation
// =============================================================================

impl<T, V> FromIterator<Reaction<T>> for Reaction<V>
where
    V: FromIterator<T>,
{
    /// Collects every value, stopping at the first `Error`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use reaction::reaction::{Failure, Reaction};
    ///
    /// let all: Reaction<Vec<i32>> = vec![Reaction::success(1), Reaction::success(2)].into_iter().collect();
    /// assert_eq!(all, Reaction::Success(vec![1, 2]));
    ///
    /// let broken: Reaction<Vec<i32>> = vec![
    ///     Reaction::success(1),
    ///     Reaction::error(Failure::new("second")),
    ///     Reaction::error(Failure::new("third")),
    /// ]
    /// .into_iter()
    /// .collect();
    /// assert_eq!(broken, Reaction::Error(Failure::new("second")));
    /// ```
    fn from_iter<I: IntoIterator<Item = Reaction<T>>>(iter: I) -> Self {
        iter.into_iter().map(Reaction::get).collect::<Result<V, Failure>>().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Reaction::Success(7), "Success(7)")]
    #[case(Reaction::Error(Failure::new("boom")), "Error(boom)")]
    fn test_display(#[case] reaction: Reaction<i32>, #[case] expected: &str) {
        assert_eq!(reaction.to_string(), expected);
    }

    #[rstest]
    fn test_result_conversion_roundtrip() {
        let ok: Result<i32, Failure> = Ok(1);
        let reaction: Reaction<i32> = ok.into();
        let back: Result<i32, Failure> = reaction.into();
        assert_eq!(back, Ok(1));

        let err: Result<i32, Failure> = Err(Failure::new("x"));
        let reaction: Reaction<i32> = err.into();
        let converted: Result<i32, Failure> = reaction.into();
        assert_eq!(converted, Err(Failure::new("x")));
    }

    #[rstest]
    fn test_collect_stops_at_first_error() {
        let mut pulled = 0;
        let source = (0..5).map(|n| {
            pulled += 1;
            if n == 1 {
                Reaction::Error(Failure::new("one"))
            } else {
                Reaction::Success(n)
            }
        });
        let collected: Reaction<Vec<i32>> = source.collect();
        assert_eq!(collected, Reaction::Error(Failure::new("one")));
        assert_eq!(pulled, 2);
    }
}
