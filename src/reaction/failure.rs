//! Failure types carried by [`Reaction`](super::Reaction).
//!
//! This module provides:
//!
//! - [`Failure`]: the payload of `Reaction::Error`, a message with an
//!   optional cause chain
//! - [`FailureKind`]: a coarse classification of a failure
//! - [`Cancelled`]: the cooperative-cancellation signal, which is never
//!   captured into a `Reaction`
//! - [`Raise`]: what a user-supplied closure may raise
//!
//! # Examples
//!
//! ```rust
//! use reaction::reaction::{Failure, FailureKind};
//!
//! let failure = Failure::new("cannot load profile")
//!     .caused_by(Failure::illegal_state("session expired"));
//!
//! assert_eq!(failure.kind(), &FailureKind::General);
//! assert_eq!(failure.to_string(), "cannot load profile");
//! assert_eq!(failure.chain().count(), 2);
//! ```

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

/// The return type of every closure handed to a capturing combinator.
///
/// `Err(Raise::Failure(_))` is captured into `Reaction::Error`,
/// `Err(Raise::Cancelled(_))` is re-raised to the caller.
pub type Attempt<T> = Result<T, Raise>;

// =============================================================================
// FailureKind
// =============================================================================

/// Classification of a [`Failure`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// An ordinary failure with no further classification.
    General,
    /// A required condition did not hold (produced by `Reaction::on_condition`).
    IllegalState,
    /// A checked predicate returned `false` (produced by `Reaction::check`).
    Assertion,
    /// A joined asynchronous task panicked.
    Panicked,
    /// A caller-defined category.
    Custom(Cow<'static, str>),
}

impl fmt::Display for FailureKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::General => formatter.write_str("general"),
            Self::IllegalState => formatter.write_str("illegal state"),
            Self::Assertion => formatter.write_str("assertion"),
            Self::Panicked => formatter.write_str("panicked"),
            Self::Custom(name) => formatter.write_str(name),
        }
    }
}

// =============================================================================
// Failure
// =============================================================================

/// A captured failure: a kind, a message and an optional cause.
///
/// Equality and hashing are structural over all three, including the
/// whole cause chain.
///
/// # Examples
///
/// ```rust
/// use reaction::reaction::Failure;
/// use std::error::Error;
///
/// let failure = Failure::new("outer").caused_by(Failure::new("inner"));
/// assert_eq!(failure.source().map(ToString::to_string), Some("inner".to_string()));
/// assert_eq!(format!("{failure:#}"), "outer: inner");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Failure {
    kind: FailureKind,
    message: String,
    cause: Option<Box<Self>>,
}

impl Failure {
    /// Creates a [`FailureKind::General`] failure with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_kind(FailureKind::General, message)
    }

    /// Creates a failure of the given kind.
    pub fn with_kind(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: None,
        }
    }

    /// Creates a [`FailureKind::IllegalState`] failure.
    pub fn illegal_state(message: impl Into<String>) -> Self {
        Self::with_kind(FailureKind::IllegalState, message)
    }

    /// Creates a [`FailureKind::Assertion`] failure.
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::with_kind(FailureKind::Assertion, message)
    }

    /// Creates a [`FailureKind::Panicked`] failure.
    pub fn panicked(message: impl Into<String>) -> Self {
        Self::with_kind(FailureKind::Panicked, message)
    }

    /// Creates a [`FailureKind::Custom`] failure.
    pub fn custom(kind: impl Into<Cow<'static, str>>, message: impl Into<String>) -> Self {
        Self::with_kind(FailureKind::Custom(kind.into()), message)
    }

    /// Converts any error into a failure, walking its `source()` chain.
    ///
    /// Every error in the chain becomes a [`FailureKind::General`] failure
    /// whose message is the error's `Display` output.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use reaction::reaction::Failure;
    ///
    /// let error = "x".parse::<i32>().unwrap_err();
    /// let failure = Failure::from_error(&error);
    /// assert_eq!(failure.message(), "invalid digit found in string");
    /// ```
    pub fn from_error(error: &(dyn Error + 'static)) -> Self {
        let mut messages = Vec::new();
        let mut current = Some(error);
        while let Some(error) = current {
            messages.push(error.to_string());
            current = error.source();
        }

        messages
            .into_iter()
            .rev()
            .fold(None, |cause: Option<Self>, message| {
                let failure = Self::new(message);
                Some(match cause {
                    Some(cause) => failure.caused_by(cause),
                    None => failure,
                })
            })
            .unwrap_or_else(|| Self::new(String::new()))
    }

    /// Attaches a cause, replacing any existing one.
    #[must_use]
    pub fn caused_by(mut self, cause: Self) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Returns the kind of this failure.
    pub const fn kind(&self) -> &FailureKind {
        &self.kind
    }

    /// Returns the message of this failure.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the direct cause, if any.
    pub fn cause(&self) -> Option<&Self> {
        self.cause.as_deref()
    }

    /// Iterates over this failure followed by its causes, outermost first.
    pub fn chain(&self) -> impl Iterator<Item = &Self> {
        std::iter::successors(Some(self), |failure| failure.cause.as_deref())
    }

    /// Returns the innermost cause (or `self` when there is none).
    pub fn root_cause(&self) -> &Self {
        self.chain().last().unwrap_or(self)
    }
}

impl fmt::Display for Failure {
    /// `{}` prints the message; `{:#}` prints the whole chain joined by `": "`.
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.message)?;
        if formatter.alternate() {
            for cause in self.chain().skip(1) {
                write!(formatter, ": {}", cause.message)?;
            }
        }
        Ok(())
    }
}

impl Error for Failure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_deref().map(|cause| cause as &(dyn Error + 'static))
    }
}

impl From<String> for Failure {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for Failure {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<Box<dyn Error + Send + Sync>> for Failure {
    fn from(error: Box<dyn Error + Send + Sync>) -> Self {
        Self::from_error(&*error)
    }
}

// =============================================================================
// Cancelled
// =============================================================================

/// The cooperative-cancellation signal.
///
/// A `Cancelled` raised inside a closure is never turned into
/// `Reaction::Error`: every capturing combinator hands it back as the `Err`
/// side of its [`Captured`](super::Captured) result.
///
/// # Examples
///
/// ```rust
/// use reaction::reaction::Cancelled;
///
/// assert_eq!(Cancelled::new().to_string(), "cancelled");
/// assert_eq!(Cancelled::because("shutdown").to_string(), "cancelled: shutdown");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Cancelled {
    reason: Option<String>,
}

impl Cancelled {
    /// Creates a cancellation signal without a reason.
    pub const fn new() -> Self {
        Self { reason: None }
    }

    /// Creates a cancellation signal with a reason.
    pub fn because(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
        }
    }

    /// Returns the reason, if any.
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}

impl fmt::Display for Cancelled {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            Some(reason) => write!(formatter, "cancelled: {reason}"),
            None => formatter.write_str("cancelled"),
        }
    }
}

impl Error for Cancelled {}

// =============================================================================
// Raise
// =============================================================================

/// Something a user-supplied closure raised.
///
/// Closures use `?` to raise: both [`Failure`] and [`Cancelled`] convert
/// into `Raise`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Raise {
    /// An ordinary failure, captured into `Reaction::Error`.
    Failure(Failure),
    /// A cancellation, always re-raised.
    Cancelled(Cancelled),
}

impl Raise {
    /// Shorthand for `Raise::Failure(Failure::new(message))`.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(Failure::new(message))
    }

    /// Returns `true` for the cancellation signal.
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }
}

impl fmt::Display for Raise {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failure(failure) => fmt::Display::fmt(failure, formatter),
            Self::Cancelled(cancelled) => write!(formatter, "{cancelled}"),
        }
    }
}

impl Error for Raise {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Failure(failure) => failure.source(),
            Self::Cancelled(_) => None,
        }
    }
}

impl From<Failure> for Raise {
    fn from(failure: Failure) -> Self {
        Self::Failure(failure)
    }
}

impl From<Cancelled> for Raise {
    fn from(cancelled: Cancelled) -> Self {
        Self::Cancelled(cancelled)
    }
}

impl From<String> for Raise {
    fn from(message: String) -> Self {
        Self::Failure(Failure::new(message))
    }
}

impl From<&str> for Raise {
    fn from(message: &str) -> Self {
        Self::Failure(Failure::new(message))
    }
}

impl From<Box<dyn Error + Send + Sync>> for Raise {
    fn from(error: Box<dyn Error + Send + Sync>) -> Self {
        Self::Failure(Failure::from(error))
    }
}
