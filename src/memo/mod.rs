//! Memoization wrappers for pure computations.
//!
//! This module decorates a pure computation with a thread-safe cache so
//! that repeat invocations with the same input skip recomputation:
//!
//! - [`Memoized`]: keyed memoization for `Fn(&K) -> V` computations
//! - [`TryMemoized`]: keyed memoization for fallible computations;
//!   failures propagate and are never cached
//! - [`MemoizedThunk`]: memoization for zero-argument computations
//! - [`TryMemoizedThunk`]: zero-argument memoization where failed
//!   attempts are retried on the next call
//!
//! All wrappers share one guarantee: the wrapped computation runs **at
//! most once per distinct input** over the wrapper's lifetime, no matter
//! how many threads invoke it concurrently.
//!
//! Memoization assumes the wrapped computation is a function of its input
//! only. Wrapping a computation with side effects changes observable
//! behavior; that trade-off is the caller's responsibility.
//!
//! # Examples
//!
//! ## Keyed Memoization
//!
//! ```rust
//! use fnwrap::memo::Memoize;
//!
//! let fibonacci = (|n: &u64| {
//!     let mut pair = (0u64, 1u64);
//!     for _ in 0..*n {
//!         pair = (pair.1, pair.0 + pair.1);
//!     }
//!     pair.0
//! })
//! .memoized();
//!
//! assert_eq!(fibonacci.call(10), 55);
//! assert_eq!(fibonacci.call(10), 55); // served from the cache
//! ```
//!
//! ## Zero-Argument Memoization
//!
//! ```rust
//! use fnwrap::memo::MemoizedThunk;
//!
//! let config = MemoizedThunk::new(|| {
//!     // expensive startup work runs at most once
//!     vec!["a", "b", "c"]
//! });
//!
//! assert_eq!(config.force().len(), 3);
//! ```

mod cache;
mod thunk;

pub use cache::{Memoize, Memoized, TryMemoize, TryMemoized};
pub use thunk::{MemoizedThunk, ThunkPoisonedError, TryMemoizedThunk};
