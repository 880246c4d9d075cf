//! # reaction
//!
//! A success-or-failure result type with fluent combinators for composing
//! fallible computations without early returns.
//!
//! ## Overview
//!
//! - **[`Reaction`](reaction::Reaction)**: `Success(T)` or `Error(Failure)`
//! - **Construction**: `on`, `try_reaction`, `on_condition` run a closure and
//!   capture what it raises
//! - **Combinators**: `map`, `flat_map`, `error_map`, `recover`, `fold`,
//!   `check`, `do_on_success`, `do_on_error`, `do_on_complete`
//! - **Unwrapping**: `get`, `take_or_return` (and [`take_or_return!`]),
//!   `take_or_default`, `take_or_none`
//! - **Cancellation**: a raised [`Cancelled`](reaction::Cancelled) is never
//!   captured; it always comes back to the caller as `Err`
//!
//! ## Feature Flags
//!
//! - `async`: future-based construction and tokio task joining (default)
//! - `tracing`: trace events when failures are captured
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use reaction::prelude::*;
//!
//! fn parse_port(input: &str) -> Captured<u16> {
//!     Reaction::on(|| input.parse::<u16>().map_err(|e| Failure::from_error(&e).into()))?
//!         .check("port must not be zero", |port| Ok(*port != 0))?
//!         .error_map(|failure| Ok(Failure::new(format!("bad port {input:?}")).caused_by(failure)))
//! }
//!
//! assert_eq!(parse_port("8080"), Ok(Reaction::Success(8080)));
//! assert!(parse_port("0").unwrap().is_error());
//! assert_eq!(
//!     parse_port("x").unwrap().failure().map(|f| f.root_cause().message().to_string()),
//!     Some("invalid digit found in string".to_string())
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types.
///
/// # Usage
///
/// ```rust
/// use reaction::prelude::*;
/// ```
pub mod prelude {
    pub use crate::reaction::*;

    pub use crate::take_or_return;
}

pub mod reaction;
