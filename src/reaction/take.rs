//! Early exit from the enclosing scope on `Error`.
//!
//! Rust closures cannot return from the function that called them, so the
//! "take or return" operation comes in two forms:
//!
//! - [`Reaction::take_or_return`] hands the exit decision back as a
//!   [`ControlFlow`]; the caller performs the `return`/`break`.
//! - [`take_or_return!`](crate::take_or_return) expands in place, so its
//!   body can `return`, `break` or `continue` directly.
//!
//! In both forms the `Error` branch must leave the enclosing scope. Falling
//! through is a programming error and panics with
//! [`TAKE_OR_RETURN_VIOLATION`].

use std::ops::ControlFlow;

use super::{Failure, Reaction};

/// Panic message used when an `Error` handler of `take_or_return` does not
/// exit.
pub const TAKE_OR_RETURN_VIOLATION: &str =
    "take_or_return: the error handler must exit the enclosing scope";

/// Panics with [`TAKE_OR_RETURN_VIOLATION`]; called by the
/// [`take_or_return!`](crate::take_or_return) expansion.
#[doc(hidden)]
#[cold]
#[track_caller]
pub fn take_or_return_violation() -> ! {
    panic!("{TAKE_OR_RETURN_VIOLATION}")
}

impl<T> Reaction<T> {
    /// Returns `Continue(value)` for `Success`; for `Error`, asks `on_error`
    /// how to leave the enclosing scope.
    ///
    /// `on_error` must answer `Break(exit)`; the caller then returns or
    /// breaks with `exit`.
    ///
    /// # Panics
    ///
    /// Panics if `on_error` answers `Continue(())`, since there is no value
    /// to continue with.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use reaction::reaction::{Failure, Reaction};
    /// use std::ops::ControlFlow;
    ///
    /// fn describe(reaction: Reaction<i32>) -> String {
    ///     let value = match reaction.take_or_return(|failure| ControlFlow::Break(failure.to_string())) {
    ///         ControlFlow::Continue(value) => value,
    ///         ControlFlow::Break(message) => return message,
    ///     };
    ///     format!("got {value}")
    /// }
    ///
    /// assert_eq!(describe(Reaction::success(3)), "got 3");
    /// assert_eq!(describe(Reaction::error(Failure::new("boom"))), "boom");
    /// ```
    #[track_caller]
    pub fn take_or_return<B, F>(self, on_error: F) -> ControlFlow<B, T>
    where
        F: FnOnce(Failure) -> ControlFlow<B>,
    {
        match self {
            Self::Success(value) => ControlFlow::Continue(value),
            Self::Error(failure) => match on_error(failure) {
                ControlFlow::Break(exit) => ControlFlow::Break(exit),
                ControlFlow::Continue(()) => take_or_return_violation(),
            },
        }
    }
}

/// Unwraps a [`Reaction`](crate::reaction::Reaction) or runs a diverging
/// body for its failure.
///
/// The body sees the failure bound to the given name and must leave the
/// enclosing scope (`return`, `break`, `continue` or a panic). A body that
/// completes normally panics with
/// [`TAKE_OR_RETURN_VIOLATION`](crate::reaction::TAKE_OR_RETURN_VIOLATION).
///
/// # Examples
///
/// ```rust
/// use reaction::reaction::{Failure, Reaction};
/// use reaction::take_or_return;
///
/// fn total(items: Vec<Reaction<u32>>) -> Result<u32, String> {
///     let mut sum = 0;
///     for item in items {
///         sum += take_or_return!(item, |failure| return Err(failure.to_string()));
///     }
///     Ok(sum)
/// }
///
/// assert_eq!(total(vec![Reaction::success(1), Reaction::success(2)]), Ok(3));
/// assert_eq!(
///     total(vec![Reaction::success(1), Reaction::error(Failure::new("bad item"))]),
///     Err("bad item".to_string())
/// );
/// ```
#[macro_export]
macro_rules! take_or_return {
    ($reaction:expr, |$failure:pat_param| $body:expr $(,)?) => {
        match $reaction {
            $crate::reaction::Reaction::Success(value) => value,
            #[allow(unreachable_code)]
            $crate::reaction::Reaction::Error($failure) => {
                $body;
                $crate::reaction::take_or_return_violation()
            }
        }
    };
}
