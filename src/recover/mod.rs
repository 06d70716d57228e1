//! Failure transparency and local recovery for fallible computations.
//!
//! A fallible computation is any `Fn(A) -> Result<T, E>`. This module
//! lets such a computation be used where an infallible one is statically
//! expected, and lets callers attach a local recovery policy:
//!
//! - [`Transparent`]: re-expose a fallible computation under a narrower
//!   contract — `contained` (wrap the failure with full provenance),
//!   `unchecked` (panic with the wrapped failure), `opaque` (carry the
//!   original failure value across the boundary as a type-erased
//!   payload).
//! - [`Recover`]: compose a primary computation with exactly one fallback
//!   action — `or_else`, `or_return`, `or_return_with`, `fallback_to`,
//!   `or_raise`.
//!
//! Every wrapper here is stateless: it owns its wrapped computations and
//! shares nothing across invocations. Per invocation, the primary is
//! attempted exactly once, then at most one recovery action runs.
//!
//! # Examples
//!
//! ```rust
//! use fnwrap::recover::Recover;
//!
//! let parse = |text: &str| text.parse::<i32>();
//!
//! let lenient = parse.or_return(-1);
//! assert_eq!(lenient("42"), 42);
//! assert_eq!(lenient("nope"), -1);
//!
//! let counted = parse.or_else(|text: &str| Ok::<_, ()>(text.len() as i32));
//! assert_eq!(counted("nope"), Ok(4));
//! ```

mod combinators;
mod transparency;

pub use combinators::Recover;
pub use transparency::{ContainedError, OpaqueError, Transparent};
