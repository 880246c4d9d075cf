//! Combinators over [`Reaction`].
//!
//! Capturing combinators (`map`, `flat_map`, `error_map`, `recover`,
//! `recover_with`, `do_on_success`, `do_on_error`, `check`) return
//! [`Captured`]: a
//! failure raised by the supplied closure becomes `Reaction::Error`, a
//! raised [`Cancelled`](super::Cancelled) comes back as `Err`.
//!
//! Eliminating combinators (`fold`, `zip`, `handle`, `map_reaction`,
//! `flat_handle`) never capture anything and return the closure's result
//! directly.

use super::{Attempt, Captured, Failure, Reaction, capture, capture_flat};

impl<T> Reaction<T> {
    // =========================================================================
    // Mapping Operations
    // =========================================================================

    /// Transforms the value of a `Success`.
    ///
    /// `Error` passes through without calling `function`.
    ///
    /// # Errors
    ///
    /// Returns `Err(Cancelled)` when `function` raised a cancellation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use reaction::reaction::{Failure, Reaction};
    ///
    /// let length = Reaction::success("5").map(|text| Ok(text.len()));
    /// assert_eq!(length, Ok(Reaction::Success(1)));
    ///
    /// let error: Reaction<&str> = Reaction::error(Failure::illegal_state("x"));
    /// assert_eq!(error.map(|text| Ok(text.len())), Ok(Reaction::Error(Failure::illegal_state("x"))));
    /// ```
    pub fn map<R, F>(self, function: F) -> Captured<R>
    where
        F: FnOnce(T) -> Attempt<R>,
    {
        match self {
            Self::Success(value) => capture(function(value)),
            Self::Error(failure) => Ok(Reaction::Error(failure)),
        }
    }

    /// Chains a computation that produces another `Reaction`.
    ///
    /// The produced reaction is returned as-is; `Error` passes through.
    ///
    /// # Errors
    ///
    /// Returns `Err(Cancelled)` when `function` raised a cancellation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use reaction::reaction::{Failure, Reaction};
    ///
    /// let halve = |n: i32| {
    ///     Ok(if n % 2 == 0 {
    ///         Reaction::success(n / 2)
    ///     } else {
    ///         Reaction::error(Failure::new("odd"))
    ///     })
    /// };
    ///
    /// assert_eq!(Reaction::success(8).flat_map(halve), Ok(Reaction::Success(4)));
    /// assert!(Reaction::success(3).flat_map(halve).unwrap().is_error());
    /// ```
    pub fn flat_map<R, F>(self, function: F) -> Captured<R>
    where
        F: FnOnce(T) -> Attempt<Reaction<R>>,
    {
        match self {
            Self::Success(value) => capture_flat(function(value)),
            Self::Error(failure) => Ok(Reaction::Error(failure)),
        }
    }

    /// Transforms the failure of an `Error`.
    ///
    /// `Success` passes through. A failure raised by `function` replaces
    /// the original one.
    ///
    /// # Errors
    ///
    /// Returns `Err(Cancelled)` when `function` raised a cancellation.
    pub fn error_map<F>(self, function: F) -> Captured<T>
    where
        F: FnOnce(Failure) -> Attempt<Failure>,
    {
        match self {
            Self::Success(value) => Ok(Self::Success(value)),
            Self::Error(failure) => match function(failure) {
                Ok(mapped) => Ok(Self::Error(mapped)),
                Err(raised) => capture(Err(raised)),
            },
        }
    }

    /// Calls `function` with exactly one populated argument and returns its
    /// result.
    ///
    /// `Success(v)` gives `(Some(v), None)`, `Error(f)` gives `(None, Some(f))`.
    pub fn map_reaction<R, F>(self, function: F) -> R
    where
        F: FnOnce(Option<T>, Option<Failure>) -> R,
    {
        match self {
            Self::Success(value) => function(Some(value), None),
            Self::Error(failure) => function(None, Some(failure)),
        }
    }

    // =========================================================================
    // Recovery
    // =========================================================================

    /// Turns an `Error` into a new reaction by running `transform` through
    /// [`Reaction::on`].
    ///
    /// A failure raised by `transform` yields a new `Error`; `Success`
    /// passes through.
    ///
    /// # Errors
    ///
    /// Returns `Err(Cancelled)` when `transform` raised a cancellation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use reaction::reaction::{Failure, Reaction};
    ///
    /// let error: Reaction<usize> = Reaction::error(Failure::new("boom"));
    /// let recovered = error.recover(|failure| Ok(failure.message().len()));
    /// assert_eq!(recovered, Ok(Reaction::Success(4)));
    /// ```
    pub fn recover<F>(self, transform: F) -> Captured<T>
    where
        F: FnOnce(Failure) -> Attempt<T>,
    {
        match self {
            Self::Success(value) => Ok(Self::Success(value)),
            Self::Error(failure) => Self::on(|| transform(failure)),
        }
    }

    /// Like [`recover`](Self::recover), for a `transform` that produces a
    /// `Reaction`; the result is flattened through
    /// [`Reaction::try_reaction`].
    ///
    /// # Errors
    ///
    /// Returns `Err(Cancelled)` when `transform` raised a cancellation.
    pub fn recover_with<F>(self, transform: F) -> Captured<T>
    where
        F: FnOnce(Failure) -> Attempt<Self>,
    {
        match self {
            Self::Success(value) => Ok(Self::Success(value)),
            Self::Error(failure) => Self::try_reaction(|| transform(failure)),
        }
    }

    // =========================================================================
    // Fold Operations
    // =========================================================================

    /// Dispatches to exactly one branch and returns its result.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use reaction::reaction::{Failure, Reaction};
    ///
    /// let describe = |reaction: Reaction<i32>| {
    ///     reaction.fold(|value| format!("value {value}"), |failure| format!("failed: {failure}"))
    /// };
    ///
    /// assert_eq!(describe(Reaction::success(1)), "value 1");
    /// assert_eq!(describe(Reaction::error(Failure::new("boom"))), "failed: boom");
    /// ```
    #[inline]
    pub fn fold<R, S, E>(self, on_success: S, on_error: E) -> R
    where
        S: FnOnce(T) -> R,
        E: FnOnce(Failure) -> R,
    {
        match self {
            Self::Success(value) => on_success(value),
            Self::Error(failure) => on_error(failure),
        }
    }

    /// Alias of [`fold`](Self::fold).
    #[inline]
    pub fn zip<R, S, E>(self, on_success: S, on_error: E) -> R
    where
        S: FnOnce(T) -> R,
        E: FnOnce(Failure) -> R,
    {
        self.fold(on_success, on_error)
    }

    /// Side-effecting [`fold`](Self::fold): runs exactly one handler.
    #[inline]
    pub fn handle<S, E>(self, on_success: S, on_error: E)
    where
        S: FnOnce(T),
        E: FnOnce(Failure),
    {
        self.fold(on_success, on_error);
    }

    /// Side-effecting [`map_reaction`](Self::map_reaction).
    #[inline]
    pub fn flat_handle<F>(self, function: F)
    where
        F: FnOnce(Option<T>, Option<Failure>),
    {
        self.map_reaction(function);
    }

    // =========================================================================
    // Side-Effect Hooks
    // =========================================================================

    /// Runs `function` on the value of a `Success` and passes `self` on.
    ///
    /// If `function` raises a failure, the result becomes that `Error`.
    ///
    /// # Errors
    ///
    /// Returns `Err(Cancelled)` when `function` raised a cancellation.
    pub fn do_on_success<F>(self, function: F) -> Captured<T>
    where
        F: FnOnce(&T) -> Attempt<()>,
    {
        match self {
            Self::Success(value) => match function(&value) {
                Ok(()) => Ok(Self::Success(value)),
                Err(raised) => capture(Err(raised)),
            },
            error @ Self::Error(_) => Ok(error),
        }
    }

    /// Runs `function` on the failure of an `Error` and passes `self` on.
    ///
    /// If `function` raises a failure, that failure replaces the original
    /// one.
    ///
    /// # Errors
    ///
    /// Returns `Err(Cancelled)` when `function` raised a cancellation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use reaction::reaction::{Failure, Raise, Reaction};
    ///
    /// let error: Reaction<i32> = Reaction::error(Failure::new("original"));
    /// let replaced = error.do_on_error(|_| Err(Raise::failure("logger offline")));
    /// assert_eq!(replaced, Ok(Reaction::Error(Failure::new("logger offline"))));
    /// ```
    pub fn do_on_error<F>(self, function: F) -> Captured<T>
    where
        F: FnOnce(&Failure) -> Attempt<()>,
    {
        match self {
            success @ Self::Success(_) => Ok(success),
            Self::Error(failure) => match function(&failure) {
                Ok(()) => Ok(Self::Error(failure)),
                Err(raised) => capture(Err(raised)),
            },
        }
    }

    /// Runs `function` exactly once, whatever the variant, and passes
    /// `self` on.
    ///
    /// Nothing raised here is captured: an `Err` from `function` is
    /// returned to the caller and the reaction is dropped.
    ///
    /// # Errors
    ///
    /// Returns whatever error `function` returned.
    pub fn do_on_complete<E, F>(self, function: F) -> Result<Self, E>
    where
        F: FnOnce() -> Result<(), E>,
    {
        function()?;
        Ok(self)
    }

    // =========================================================================
    // Assertions
    // =========================================================================

    /// Keeps a `Success` only if `predicate` holds for its value.
    ///
    /// A predicate answering `false` yields an
    /// [`Assertion`](super::FailureKind::Assertion) error carrying `message`;
    /// a failure raised by the predicate itself is captured as the `Error`.
    /// `Error` passes through without calling `predicate`.
    ///
    /// # Errors
    ///
    /// Returns `Err(Cancelled)` when `predicate` raised a cancellation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use reaction::reaction::{Failure, Reaction};
    ///
    /// let empty = Reaction::success(String::new()).check("must be non-empty", |text| Ok(!text.is_empty()));
    /// assert_eq!(empty, Ok(Reaction::Error(Failure::assertion("must be non-empty"))));
    /// ```
    pub fn check<P>(self, message: impl Into<String>, predicate: P) -> Captured<T>
    where
        P: FnOnce(&T) -> Attempt<bool>,
    {
        match self {
            Self::Success(value) => capture(predicate(&value).and_then(|holds| {
                if holds {
                    Ok(value)
                } else {
                    Err(Failure::assertion(message).into())
                }
            })),
            Self::Error(failure) => Ok(Self::Error(failure)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::{Cancelled, Raise};
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;

    fn failed<T>(message: &str) -> Reaction<T> {
        Reaction::Error(Failure::new(message))
    }

    #[rstest]
    fn test_map_on_success() {
        assert_eq!(Reaction::Success(2).map(|x| Ok(x * 10)), Ok(Reaction::Success(20)));
    }

    #[rstest]
    fn test_map_skips_function_on_error() {
        let called = Cell::new(false);
        let result = failed::<i32>("x").map(|x| {
            called.set(true);
            Ok(x)
        });
        assert_eq!(result, Ok(failed("x")));
        assert!(!called.get());
    }

    #[rstest]
    fn test_map_captures_raised_failure() {
        let result: Captured<i32> = Reaction::Success(1).map(|_| Err(Raise::failure("bad")));
        assert_eq!(result, Ok(failed("bad")));
    }

    #[rstest]
    fn test_flat_map_reraises_cancellation() {
        let result: Captured<i32> =
            Reaction::Success(1).flat_map(|_| Err(Cancelled::new().into()));
        assert_eq!(result, Err(Cancelled::new()));
    }

    #[rstest]
    fn test_error_map_rewrites_failure() {
        let result = failed::<i32>("inner").error_map(|failure| {
            Ok(Failure::new("outer").caused_by(failure))
        });
        let failure = result.unwrap().failure().unwrap();
        assert_eq!(format!("{failure:#}"), "outer: inner");
    }

    #[rstest]
    fn test_error_map_passes_success() {
        let result = Reaction::Success(1).error_map(|_| Ok(Failure::new("unused")));
        assert_eq!(result, Ok(Reaction::Success(1)));
    }

    #[rstest]
    fn test_recover_with_flattens() {
        let result = failed::<i32>("x").recover_with(|_| Ok(Reaction::Success(7)));
        assert_eq!(result, Ok(Reaction::Success(7)));
    }

    #[rstest]
    fn test_recover_raising_yields_new_error() {
        let result = failed::<i32>("first").recover(|_| Err(Raise::failure("second")));
        assert_eq!(result, Ok(failed("second")));
    }

    #[rstest]
    fn test_map_reaction_populates_exactly_one_side() {
        let success = Reaction::Success(1).map_reaction(|value, failure| (value, failure.is_some()));
        assert_eq!(success, (Some(1), false));

        let error = failed::<i32>("x").map_reaction(|value, failure| (value, failure.is_some()));
        assert_eq!(error, (None, true));
    }

    #[rstest]
    #[case::success(Reaction::Success(1), (1, 0))]
    #[case::error(failed("x"), (0, 1))]
    fn test_handle_runs_one_branch(#[case] reaction: Reaction<i32>, #[case] expected: (i32, i32)) {
        let hits = Cell::new((0, 0));
        reaction.handle(|_| hits.set((hits.get().0 + 1, hits.get().1)), |_| {
            hits.set((hits.get().0, hits.get().1 + 1));
        });
        assert_eq!(hits.get(), expected);
    }

    #[rstest]
    fn test_handle_error_branch_receives_failure() {
        let seen = Cell::new(None);
        failed::<i32>("boom").handle(|_| {}, |failure| seen.set(Some(failure)));
        assert_eq!(seen.take(), Some(Failure::new("boom")));
    }

    #[rstest]
    fn test_do_on_success_returns_self() {
        let seen = Cell::new(0);
        let result = Reaction::Success(5).do_on_success(|value| {
            seen.set(*value);
            Ok(())
        });
        assert_eq!(result, Ok(Reaction::Success(5)));
        assert_eq!(seen.get(), 5);
    }

    #[rstest]
    #[case::success(Reaction::Success(1))]
    #[case::error(failed("x"))]
    fn test_do_on_complete_propagates_error(#[case] reaction: Reaction<i32>) {
        let result: Result<Reaction<i32>, &str> = reaction.do_on_complete(|| Err("cleanup"));
        assert_eq!(result, Err("cleanup"));
    }

    #[rstest]
    fn test_check_passes_error_through() {
        let result = failed::<i32>("x").check("unused", |_| unreachable!());
        assert_eq!(result, Ok(failed("x")));
    }

    #[rstest]
    fn test_check_captures_raised_failure() {
        let result = Reaction::Success(1).check("unused", |_| Err(Raise::failure("lookup failed")));
        assert_eq!(result, Ok(failed("lookup failed")));
    }

    #[rstest]
    fn test_check_reraises_cancellation() {
        let result = Reaction::Success(1).check("unused", |_| Err(Cancelled::because("stop").into()));
        assert_eq!(result, Err(Cancelled::because("stop")));
    }
}
