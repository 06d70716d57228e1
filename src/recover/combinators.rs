//! Recovery combinators for fallible computations.
//!
//! Each combinator composes a primary computation with one fallback
//! policy, producing a new closure with the same input contract. Per
//! invocation the resulting computation performs at most two attempts:
//! the primary (exactly once), then — only if the primary failed —
//! exactly one recovery action.
//!
//! # Laws
//!
//! For every combinator `c` and every input `a` on which the primary
//! succeeds with `v`:
//!
//! ```text
//! primary.c(policy)(a) == v        (success preservation)
//! ```
//!
//! and the recovery policy is not consulted at all.
//!
//! On failure, the primary's error is either handed to the policy
//! (`or_raise`) or discarded once the fallback completes (`or_else`,
//! `or_return`, `or_return_with`, `fallback_to`) — recovery never runs
//! twice and the primary is never re-attempted within one invocation.

/// Extension trait attaching recovery policies to `Fn(A) -> Result<T, E>`
/// computations.
///
/// Implemented for every such closure or function. Combinators that may
/// re-invoke the input with the original argument (`or_else`,
/// `fallback_to`) require `A: Clone`; the clone is taken before the
/// primary runs so the argument can be replayed into the fallback.
///
/// # Examples
///
/// ```rust
/// use fnwrap::recover::Recover;
///
/// let from_cache = |_key: u32| -> Result<String, &'static str> {
///     Err("cache miss")
/// };
/// let from_store = |key: u32| Ok::<_, &'static str>(format!("record {key}"));
///
/// let lookup = from_cache.or_else(from_store);
/// assert_eq!(lookup(7), Ok("record 7".to_string()));
/// ```
pub trait Recover<A, T, E>: Fn(A) -> Result<T, E> + Sized {
    /// Attempts `self`; on failure, attempts `secondary` with the same
    /// input and returns its outcome.
    ///
    /// The primary's failure is discarded once the secondary is
    /// attempted — it is not attached to the secondary's error and not
    /// logged. The secondary may fail with a different error type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fnwrap::recover::Recover;
    ///
    /// let strict = |text: String| text.parse::<i32>();
    /// let lenient = strict.or_else(|text: String| Ok::<_, ()>(text.len() as i32));
    ///
    /// assert_eq!(lenient("42".to_string()), Ok(42));
    /// assert_eq!(lenient("four".to_string()), Ok(4));
    /// ```
    fn or_else<E2, G>(self, secondary: G) -> impl Fn(A) -> Result<T, E2>
    where
        G: Fn(A) -> Result<T, E2>,
        A: Clone,
    {
        move |input: A| match self(input.clone()) {
            Ok(value) => Ok(value),
            Err(_) => secondary(input),
        }
    }

    /// On failure, raises the failure built by `factory` from the
    /// original one.
    ///
    /// The factory receives the primary's failure by value, so the new
    /// failure can retain the original (typically as its
    /// [`source`](std::error::Error::source)) — the original is never
    /// discarded by the combinator itself. A panicking factory is a
    /// fault of the combinator's own machinery and propagates
    /// unrecovered.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fnwrap::recover::{ContainedError, Recover};
    ///
    /// let parse = |text: String| text.parse::<i32>();
    /// let described = parse.or_raise(ContainedError::new);
    ///
    /// let failure = described("nope".to_string()).unwrap_err();
    /// assert!(std::error::Error::source(&failure).is_some());
    /// ```
    fn or_raise<E2, G>(self, factory: G) -> impl Fn(A) -> Result<T, E2>
    where
        G: Fn(E) -> E2,
    {
        move |input| self(input).map_err(&factory)
    }

    /// On failure, returns a clone of `default` instead.
    ///
    /// The primary's failure is discarded.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fnwrap::recover::Recover;
    ///
    /// let parse = (|text: String| text.parse::<i32>()).or_return(0);
    /// assert_eq!(parse("3".to_string()), 3);
    /// assert_eq!(parse("x".to_string()), 0);
    /// ```
    fn or_return(self, default: T) -> impl Fn(A) -> T
    where
        T: Clone,
    {
        move |input| self(input).unwrap_or_else(|_| default.clone())
    }

    /// On failure, returns the value produced by `supplier` instead.
    ///
    /// The supplier is evaluated lazily, once per failing invocation,
    /// and never on success.
    fn or_return_with<G>(self, supplier: G) -> impl Fn(A) -> T
    where
        G: Fn() -> T,
    {
        move |input| self(input).unwrap_or_else(|_| supplier())
    }

    /// On failure, evaluates the infallible `fallback` with the same
    /// input.
    ///
    /// The primary's failure is discarded.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fnwrap::recover::Recover;
    ///
    /// let parse = |text: String| text.parse::<usize>();
    /// let measure = parse.fallback_to(|text: String| text.len());
    ///
    /// assert_eq!(measure("42".to_string()), 42);
    /// assert_eq!(measure("four".to_string()), 4);
    /// ```
    fn fallback_to<G>(self, fallback: G) -> impl Fn(A) -> T
    where
        G: Fn(A) -> T,
        A: Clone,
    {
        move |input: A| match self(input.clone()) {
            Ok(value) => value,
            Err(_) => fallback(input),
        }
    }
}

impl<A, T, E, F> Recover<A, T, E> for F where F: Fn(A) -> Result<T, E> {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn failing(_: i32) -> Result<i32, String> {
        Err("primary failed".to_string())
    }

    fn succeeding(input: i32) -> Result<i32, String> {
        Ok(input * 2)
    }

    #[rstest]
    fn or_else_returns_primary_success() {
        let combined = succeeding.or_else(|_: i32| Ok::<_, String>(0));
        assert_eq!(combined(21), Ok(42));
    }

    #[rstest]
    fn or_else_falls_back_on_failure() {
        let combined = failing.or_else(|input: i32| Ok::<_, String>(input + 1));
        assert_eq!(combined(4), Ok(5));
    }

    #[rstest]
    fn or_else_invokes_each_side_at_most_once() {
        let primary_calls = AtomicUsize::new(0);
        let secondary_calls = AtomicUsize::new(0);

        let primary = |_: i32| -> Result<i32, String> {
            primary_calls.fetch_add(1, Ordering::SeqCst);
            Err("nope".to_string())
        };
        let secondary = |input: i32| -> Result<i32, String> {
            secondary_calls.fetch_add(1, Ordering::SeqCst);
            Ok(input)
        };

        let combined = primary.or_else(secondary);
        assert_eq!(combined(9), Ok(9));
        assert_eq!(primary_calls.load(Ordering::SeqCst), 1);
        assert_eq!(secondary_calls.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    fn or_else_skips_secondary_on_success() {
        let secondary_calls = AtomicUsize::new(0);
        let secondary = |input: i32| -> Result<i32, String> {
            secondary_calls.fetch_add(1, Ordering::SeqCst);
            Ok(input)
        };

        let combined = succeeding.or_else(secondary);
        assert_eq!(combined(3), Ok(6));
        assert_eq!(secondary_calls.load(Ordering::SeqCst), 0);
    }

    #[rstest]
    fn or_else_may_change_error_type() {
        let combined = failing.or_else(|_: i32| Err::<i32, _>(404u16));
        assert_eq!(combined(1), Err(404u16));
    }

    #[rstest]
    fn or_raise_preserves_success() {
        let raised = succeeding.or_raise(|error: String| error.len());
        assert_eq!(raised(5), Ok(10));
    }

    #[rstest]
    fn or_raise_hands_original_failure_to_factory() {
        let raised = failing.or_raise(|error: String| format!("wrapped: {error}"));
        assert_eq!(raised(1), Err("wrapped: primary failed".to_string()));
    }

    #[rstest]
    fn or_return_uses_default_on_failure() {
        let total = failing.or_return(0);
        assert_eq!(total(1), 0);
    }

    #[rstest]
    fn or_return_preserves_success() {
        let total = succeeding.or_return(0);
        assert_eq!(total(4), 8);
    }

    #[rstest]
    fn or_return_with_is_lazy() {
        let supplier_calls = AtomicUsize::new(0);
        let supplier = || {
            supplier_calls.fetch_add(1, Ordering::SeqCst);
            -1
        };

        let total = succeeding.or_return_with(supplier);
        assert_eq!(total(2), 4);
        assert_eq!(supplier_calls.load(Ordering::SeqCst), 0);

        let recovered = failing.or_return_with(|| -1);
        assert_eq!(recovered(2), -1);
    }

    #[rstest]
    fn fallback_to_receives_same_input() {
        let fallback = failing.fallback_to(|input: i32| input * 100);
        assert_eq!(fallback(3), 300);
    }

    #[rstest]
    fn fallback_to_preserves_success() {
        let fallback = succeeding.fallback_to(|_: i32| -1);
        assert_eq!(fallback(6), 12);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Success preservation: a succeeding primary is returned
            /// untouched by every combinator.
            #[test]
            fn prop_success_preservation(input in any::<i32>()) {
                let primary = |x: i32| Ok::<_, String>(x.wrapping_mul(2));
                let expected = input.wrapping_mul(2);

                prop_assert_eq!(primary.or_else(|x: i32| Ok::<_, String>(x))(input), Ok(expected));
                prop_assert_eq!(primary.or_raise(|e: String| e)(input), Ok(expected));
                prop_assert_eq!(primary.or_return(0)(input), expected);
                prop_assert_eq!(primary.or_return_with(|| 0)(input), expected);
                prop_assert_eq!(primary.fallback_to(|_: i32| 0)(input), expected);
            }

            /// An always-failing primary makes `or_else` extensionally
            /// equal to the secondary.
            #[test]
            fn prop_or_else_equals_secondary_when_primary_fails(input in any::<i32>()) {
                let primary = |_: i32| Err::<i32, _>("down".to_string());
                let secondary = |x: i32| Ok::<_, String>(x.wrapping_add(1));

                prop_assert_eq!(primary.or_else(secondary)(input), secondary(input));
            }

            /// An always-failing primary makes `or_return` constant.
            #[test]
            fn prop_or_return_constant_when_primary_fails(input in any::<i32>(), default in any::<i32>()) {
                let primary = |_: i32| Err::<i32, _>("down".to_string());
                prop_assert_eq!(primary.or_return(default)(input), default);
            }
        }
    }
}
