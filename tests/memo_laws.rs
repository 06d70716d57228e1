#![cfg(feature = "memo")]
//! Property-based tests for the memoizing caches.
//!
//! The central law: memoization is observationally invisible for pure
//! computations. For every pure `f` and input `k`,
//!
//! ```text
//! memoize(f).call(k) == f(k)                      (extensional equality)
//! memoize(f).call(k) == memoize(f).call(k)        (stability)
//! ```
//!
//! and the delegate executes at most once per distinct key regardless of
//! call count.

use fnwrap::memo::{Memoized, TryMemoized};
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

proptest! {
    /// Extensional equality with the delegate.
    #[test]
    fn prop_memoized_is_extensionally_equal(keys in prop::collection::vec(any::<i64>(), 1..20)) {
        let delegate = |x: &i64| x.wrapping_mul(7).wrapping_sub(3);
        let memoized = Memoized::new(delegate);

        for key in keys {
            prop_assert_eq!(memoized.call(key), delegate(&key));
        }
    }

    /// Repeat calls with one key are stable.
    #[test]
    fn prop_memoized_calls_are_stable(key in any::<i64>(), repeats in 1usize..10) {
        let memoized = Memoized::new(|x: &i64| x.wrapping_mul(*x));
        let first = memoized.call(key);

        for _ in 0..repeats {
            prop_assert_eq!(memoized.call(key), first);
        }
    }

    /// Execution count equals the number of distinct keys.
    #[test]
    fn prop_executions_match_distinct_keys(keys in prop::collection::vec(0i32..50, 1..40)) {
        let executions = AtomicUsize::new(0);
        let memoized = Memoized::new(|x: &i32| {
            executions.fetch_add(1, Ordering::SeqCst);
            x + 1
        });

        for key in &keys {
            prop_assert_eq!(memoized.call(*key), key + 1);
        }

        let distinct: HashSet<_> = keys.iter().copied().collect();
        prop_assert_eq!(executions.load(Ordering::SeqCst), distinct.len());
        prop_assert_eq!(memoized.cached_count(), distinct.len());
    }

    /// Only successes populate the cache.
    #[test]
    fn prop_only_successes_are_cached(keys in prop::collection::vec(any::<i32>(), 1..30)) {
        let partial = TryMemoized::new(|x: &i32| {
            if x % 2 == 0 { Ok(*x) } else { Err("odd") }
        });

        for key in &keys {
            let outcome = partial.try_call(*key);
            if key % 2 == 0 {
                prop_assert_eq!(outcome, Ok(*key));
            } else {
                prop_assert_eq!(outcome, Err("odd"));
            }
        }

        let cached: HashSet<_> = keys.iter().copied().filter(|key| key % 2 == 0).collect();
        prop_assert_eq!(partial.cached_count(), cached.len());
    }
}
