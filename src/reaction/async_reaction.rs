//! Asynchronous construction of [`Reaction`] values.
//!
//! The closures handed to [`Reaction::on`] may be replaced by futures: the
//! future is awaited and its outcome classified the same way, so suspension
//! is invisible to the rest of the chain. Cancellation keeps its meaning
//! across the await point:
//!
//! - a [`Cancelled`] raised inside the future is re-raised as `Err`
//! - an aborted tokio task ([`JoinError::is_cancelled`]) is re-raised as
//!   `Err(Cancelled)` by [`Reaction::on_task`]
//! - a panicked tokio task becomes an `Error` of kind
//!   [`Panicked`](super::FailureKind::Panicked)
//!
//! # Examples
//!
//! ```rust
//! use reaction::reaction::Reaction;
//!
//! #[tokio::main]
//! async fn main() {
//!     let reaction = Reaction::on_async(async { Ok(21) }).await.unwrap();
//!     assert_eq!(reaction.map(|n| Ok(n * 2)), Ok(Reaction::Success(42)));
//! }
//! ```

use std::any::Any;
use std::future::Future;

use futures::future::try_join_all;
use tokio::task::{JoinError, JoinHandle};

use super::{Attempt, Cancelled, Captured, Failure, Raise, Reaction, capture, capture_flat};

impl<T> Reaction<T> {
    /// Awaits `computation` and classifies its outcome like
    /// [`Reaction::on`].
    ///
    /// # Errors
    ///
    /// Returns `Err(Cancelled)` when the future raised a cancellation.
    pub async fn on_async<Fut>(computation: Fut) -> Captured<T>
    where
        Fut: Future<Output = Attempt<T>>,
    {
        capture(computation.await)
    }

    /// Awaits a future that produces a `Reaction`, flattening it like
    /// [`Reaction::try_reaction`].
    ///
    /// # Errors
    ///
    /// Returns `Err(Cancelled)` when the future raised a cancellation.
    pub async fn try_reaction_async<Fut>(computation: Fut) -> Captured<T>
    where
        Fut: Future<Output = Attempt<Self>>,
    {
        capture_flat(computation.await)
    }

    /// Awaits a spawned task and classifies its outcome.
    ///
    /// An aborted task re-raises [`Cancelled`]; a panicked task is captured
    /// as a [`Panicked`](super::FailureKind::Panicked) failure.
    ///
    /// # Errors
    ///
    /// Returns `Err(Cancelled)` when the task was aborted or raised a
    /// cancellation itself.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use reaction::reaction::Reaction;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let handle = tokio::spawn(async { Ok("done") });
    ///     assert_eq!(Reaction::on_task(handle).await, Ok(Reaction::Success("done")));
    ///
    ///     let aborted = tokio::spawn(async {
    ///         std::future::pending::<()>().await;
    ///         Ok(())
    ///     });
    ///     aborted.abort();
    ///     assert!(Reaction::on_task(aborted).await.is_err());
    /// }
    /// ```
    pub async fn on_task(handle: JoinHandle<Attempt<T>>) -> Captured<T> {
        capture(handle.await.map_err(Raise::from).and_then(std::convert::identity))
    }

    /// Awaits every future concurrently and collects the values.
    ///
    /// The first cancellation raised by any future is re-raised at once and
    /// the remaining futures are dropped unfinished. Ordinary failures do not
    /// stop the others; once all complete, the first failure in input order
    /// becomes the `Error`.
    ///
    /// # Errors
    ///
    /// Returns `Err(Cancelled)` when any future raised a cancellation.
    pub async fn all_async<I, Fut>(computations: I) -> Captured<Vec<T>>
    where
        I: IntoIterator<Item = Fut>,
        Fut: Future<Output = Attempt<T>>,
    {
        let guarded = computations.into_iter().map(|computation| async move {
            match computation.await {
                Err(Raise::Cancelled(cancelled)) => Err(cancelled),
                attempt => Ok(attempt),
            }
        });
        let attempts = try_join_all(guarded).await?;

        capture(attempts.into_iter().collect())
    }
}

/// Extracts a printable message from a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "task panicked".to_string())
}

impl From<JoinError> for Raise {
    /// Aborted tasks become [`Cancelled`], panicked tasks a
    /// [`Panicked`](super::FailureKind::Panicked) failure.
    fn from(error: JoinError) -> Self {
        if error.is_cancelled() {
            return Self::Cancelled(Cancelled::because(error.to_string()));
        }

        match error.try_into_panic() {
            Ok(payload) => Self::Failure(Failure::panicked(panic_message(&*payload))),
            Err(error) => Self::Failure(Failure::new(error.to_string())),
        }
    }
}
