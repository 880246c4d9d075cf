//! The `Reaction` type: a successful value or a captured failure.
//!
//! A [`Reaction<T>`] is either `Success(T)` or `Error(Failure)`. Fallible
//! work is wrapped with [`Reaction::on`], which runs a closure and captures
//! anything it raises, and then composed with combinators instead of
//! early returns:
//!
//! - Construction: [`Reaction::on`], [`Reaction::try_reaction`],
//!   [`Reaction::on_condition`]
//! - Unwrapping: [`Reaction::get`], [`Reaction::take_or_return`],
//!   [`Reaction::take_or_default`], [`Reaction::take_or_none`]
//! - Transformation: `map`, `flat_map`, `error_map`, `recover`, `fold`,
//!   `check` and the `do_on_*` hooks (see the `combinators` module)
//!
//! # Raising and capturing
//!
//! A closure raises by returning `Err(Raise)`. Capturing combinators turn a
//! raised [`Failure`] into `Reaction::Error`, but hand a raised
//! [`Cancelled`] straight back to the caller as the `Err` side of
//! [`Captured`]. Cancellation therefore always propagates with `?` and is
//! never mistaken for an ordinary failure.
//!
//! # Examples
//!
//! ```rust
//! use reaction::reaction::{Cancelled, Reaction};
//!
//! fn length_of(input: &str) -> Result<Reaction<usize>, Cancelled> {
//!     Reaction::on(|| Ok(input.to_string()))?
//!         .check("must be non-empty", |text| Ok(!text.is_empty()))?
//!         .map(|text| Ok(text.len()))
//! }
//!
//! assert_eq!(length_of("5").unwrap(), Reaction::Success(1));
//! assert!(length_of("").unwrap().is_error());
//! ```

mod combinators;
mod conversion;
mod failure;
mod take;

#[cfg(feature = "async")]
mod async_reaction;

pub use failure::{Attempt, Cancelled, Failure, FailureKind, Raise};
pub use take::TAKE_OR_RETURN_VIOLATION;

#[doc(hidden)]
pub use take::take_or_return_violation;

/// The result of a capturing combinator.
///
/// `Ok` carries the resulting [`Reaction`]; `Err` carries a cancellation
/// that was re-raised instead of captured.
pub type Captured<T> = Result<Reaction<T>, Cancelled>;

/// A successful value or a captured failure.
///
/// Every operation consumes the reaction and produces a new one (or a plain
/// value); a variant is never modified in place. Equality and hashing are
/// structural.
///
/// # Examples
///
/// ```rust
/// use reaction::reaction::{Failure, Reaction};
///
/// let success: Reaction<i32> = Reaction::success(42);
/// let error: Reaction<i32> = Reaction::error(Failure::new("boom"));
///
/// assert_eq!(success.get(), Ok(42));
/// assert_eq!(error.get(), Err(Failure::new("boom")));
/// ```
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Reaction<T> {
    /// The computation produced a value.
    Success(T),
    /// The computation raised a failure, captured here.
    Error(Failure),
}

/// Classifies an attempt: values and failures become a `Reaction`,
/// cancellation is re-raised.
pub(crate) fn capture<T>(attempt: Attempt<T>) -> Captured<T> {
    match attempt {
        Ok(value) => Ok(Reaction::Success(value)),
        Err(Raise::Failure(failure)) => {
            #[cfg(feature = "tracing")]
            tracing::trace!(
                kind = %failure.kind(),
                detail = failure.message(),
                "reaction captured failure"
            );
            Ok(Reaction::Error(failure))
        }
        Err(Raise::Cancelled(cancelled)) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(reason = cancelled.reason(), "reaction re-raised cancellation");
            Err(cancelled)
        }
    }
}

/// Same as [`capture`], for closures that already produce a `Reaction`.
pub(crate) fn capture_flat<T>(attempt: Attempt<Reaction<T>>) -> Captured<T> {
    capture(attempt).map(Reaction::flatten)
}

impl<T> Reaction<T> {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Wraps a value in `Success`.
    #[inline]
    pub const fn success(value: T) -> Self {
        Self::Success(value)
    }

    /// Wraps a failure in `Error`.
    #[inline]
    pub const fn error(failure: Failure) -> Self {
        Self::Error(failure)
    }

    /// Runs `computation` and classifies its outcome.
    ///
    /// `Ok(value)` becomes `Success(value)` and a raised [`Failure`] becomes
    /// `Error(failure)`. A raised [`Cancelled`] is returned as `Err`.
    ///
    /// # Errors
    ///
    /// Returns `Err(Cancelled)` when the computation raised a cancellation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use reaction::reaction::{Failure, Raise, Reaction};
    ///
    /// let parsed = Reaction::on(|| "42".parse::<i32>().map_err(|e| Raise::from(Failure::from_error(&e))));
    /// assert_eq!(parsed, Ok(Reaction::Success(42)));
    ///
    /// let failed: Result<Reaction<i32>, _> = Reaction::on(|| Err(Failure::new("boom").into()));
    /// assert_eq!(failed, Ok(Reaction::Error(Failure::new("boom"))));
    /// ```
    pub fn on<F>(computation: F) -> Captured<T>
    where
        F: FnOnce() -> Attempt<T>,
    {
        capture(computation())
    }

    /// Runs a computation that itself produces a `Reaction`.
    ///
    /// The produced reaction is returned as-is rather than nested, so
    /// `try_reaction(|| Ok(Reaction::on(..)?))` yields a flat reaction. A
    /// raised [`Failure`] becomes `Error(failure)`.
    ///
    /// # Errors
    ///
    /// Returns `Err(Cancelled)` when the computation raised a cancellation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use reaction::reaction::Reaction;
    ///
    /// let nested = Reaction::try_reaction(|| Ok(Reaction::on(|| Ok(5))?));
    /// assert_eq!(nested, Ok(Reaction::Success(5)));
    /// ```
    pub fn try_reaction<F>(computation: F) -> Captured<T>
    where
        F: FnOnce() -> Attempt<Self>,
    {
        capture_flat(computation())
    }

    // =========================================================================
    // Unwrapping
    // =========================================================================

    /// Returns the value, or re-raises the captured failure.
    ///
    /// This is the only operation that turns an `Error` back into a raised
    /// failure.
    ///
    /// # Errors
    ///
    /// Returns the captured [`Failure`] for `Error`.
    #[inline]
    pub fn get(self) -> Result<T, Failure> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Error(failure) => Err(failure),
        }
    }

    /// Returns the value, or evaluates `default` for `Error`.
    ///
    /// `default` is only called for `Error`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use reaction::reaction::{Failure, Reaction};
    ///
    /// assert_eq!(Reaction::success(1).take_or_default(|| 0), 1);
    /// assert_eq!(Reaction::<i32>::error(Failure::new("x")).take_or_default(|| 0), 0);
    /// ```
    #[inline]
    pub fn take_or_default<F>(self, default: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self {
            Self::Success(value) => value,
            Self::Error(_) => default(),
        }
    }

    /// Returns `Some(value)` for `Success`, `None` for `Error`.
    #[inline]
    pub fn take_or_none(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Error(_) => None,
        }
    }

    /// Returns `Some(failure)` for `Error`, `None` for `Success`.
    #[inline]
    pub fn failure(self) -> Option<Failure> {
        match self {
            Self::Success(_) => None,
            Self::Error(failure) => Some(failure),
        }
    }

    // =========================================================================
    // Type Checking
    // =========================================================================

    /// Returns `true` for `Success`.
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns `true` for `Error`.
    #[inline]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Borrows the value, cloning nothing.
    ///
    /// The failure of an `Error` is cloned since `Reaction<&T>` owns it.
    pub fn as_ref(&self) -> Reaction<&T> {
        match self {
            Self::Success(value) => Reaction::Success(value),
            Self::Error(failure) => Reaction::Error(failure.clone()),
        }
    }
}

impl Reaction<()> {
    /// Evaluates a condition: `true` gives `Success(())`, `false` an
    /// [`FailureKind::IllegalState`] error.
    ///
    /// # Errors
    ///
    /// Returns `Err(Cancelled)` when the predicate raised a cancellation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use reaction::reaction::{FailureKind, Reaction};
    ///
    /// assert_eq!(Reaction::on_condition(|| Ok(true)), Ok(Reaction::Success(())));
    ///
    /// let failed = Reaction::on_condition(|| Ok(false)).unwrap();
    /// assert_eq!(failed.failure().map(|f| f.kind().clone()), Some(FailureKind::IllegalState));
    /// ```
    pub fn on_condition<F>(predicate: F) -> Captured<()>
    where
        F: FnOnce() -> Attempt<bool>,
    {
        Self::try_reaction(|| {
            Ok(if predicate()? {
                Self::Success(())
            } else {
                Self::Error(Failure::illegal_state("condition not satisfied"))
            })
        })
    }
}

impl<T> Reaction<Reaction<T>> {
    /// Removes one level of nesting.
    #[inline]
    pub fn flatten(self) -> Reaction<T> {
        match self {
            Self::Success(inner) => inner,
            Self::Error(failure) => Reaction::Error(failure),
        }
    }
}
