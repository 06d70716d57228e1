//! Keyed memoization with a mutex-guarded cache.
//!
//! This module provides [`Memoized<K, V, F>`] and its fallible sibling
//! [`TryMemoized<K, V, E, F>`]. Both own their delegate computation and a
//! cache mapping inputs to previously computed results. The cache and its
//! guard are one explicit field: a [`parking_lot::Mutex`] around a
//! `HashMap`, held for the whole check/compute/insert sequence.
//!
//! Holding the guard across the delegate call is what yields the
//! at-most-once-per-key guarantee: a second caller with the same key blocks
//! until the first finishes and then observes the cached result. The cost
//! is that concurrent calls with *different* keys also serialize. Callers
//! that need cross-key parallelism should shard work across several
//! `Memoized` instances; distinct instances never contend.
//!
//! Entries are never evicted; the cache grows for the lifetime of the
//! wrapper.
//!
//! # Re-entry Warning
//!
//! The guard is not re-entrant. A delegate that invokes its own wrapper
//! (directly or through a cycle of wrappers) deadlocks.
//!
//! # Examples
//!
//! ```rust
//! use fnwrap::memo::Memoize;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! let executions = AtomicUsize::new(0);
//! let double = (|x: &i32| {
//!     executions.fetch_add(1, Ordering::SeqCst);
//!     x * 2
//! })
//! .memoized();
//!
//! assert_eq!(double.call(21), 42);
//! assert_eq!(double.call(21), 42);
//! assert_eq!(executions.load(Ordering::SeqCst), 1);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use parking_lot::Mutex;

/// A memoizing wrapper around a pure computation `Fn(&K) -> V`.
///
/// `Memoized` owns its delegate exclusively and invokes it at most once
/// per distinct key, caching each successful result. Repeat calls with a
/// cached key return a clone of the stored value without re-invoking the
/// delegate.
///
/// # Type Parameters
///
/// * `K` - The input (cache key) type
/// * `V` - The computed value type
/// * `F` - The delegate computation type
///
/// # Thread Safety
///
/// `Memoized` is `Send`/`Sync` when its delegate, keys, and values are.
/// All cache access for one instance is serialized through one mutex, so
/// concurrent callers are safe but may block each other, even across
/// unrelated keys. See the [module docs](self) for the rationale.
///
/// # Caching Absent Results
///
/// A computation that legitimately produces an "absent" result should
/// return `Option<T>` (or `Result`) and cache that value itself — the
/// cache then distinguishes "computed as `None`" from "not yet computed".
///
/// # Examples
///
/// ```rust
/// use fnwrap::memo::Memoized;
///
/// let lookup = Memoized::new(|name: &String| name.len());
/// assert_eq!(lookup.call("alice".to_string()), 5);
/// assert!(lookup.is_cached(&"alice".to_string()));
/// ```
pub struct Memoized<K, V, F> {
    delegate: F,
    cache: Mutex<HashMap<K, V>>,
}

static_assertions::assert_impl_all!(Memoized<i32, i32, fn(&i32) -> i32>: Send, Sync);

impl<K, V, F> Memoized<K, V, F> {
    /// Creates a memoizing wrapper around the given delegate.
    ///
    /// The delegate must be a function of its input only; memoizing a
    /// computation with side effects changes observable behavior.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fnwrap::memo::Memoized;
    ///
    /// let square = Memoized::new(|x: &i64| x * x);
    /// assert_eq!(square.call(6), 36);
    /// ```
    #[inline]
    pub fn new(delegate: F) -> Self {
        Self {
            delegate,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Returns this wrapper unchanged.
    ///
    /// Wrapping is idempotent: re-memoizing an already-memoized
    /// computation keeps the existing cache and guard instead of nesting
    /// a second cache around the first. This inherent method shadows
    /// [`Memoize::memoized`], so `f.memoized().memoized()` is the same
    /// wrapper as `f.memoized()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fnwrap::memo::{Memoize, Memoized};
    ///
    /// let once: Memoized<i32, i32, _> = (|x: &i32| x + 1).memoized();
    /// let twice: Memoized<i32, i32, _> = once.memoized();
    /// assert_eq!(twice.call(1), 2);
    /// ```
    #[inline]
    #[must_use]
    pub fn memoized(self) -> Self {
        self
    }

    /// Consumes the wrapper and returns the delegate, discarding the cache.
    #[inline]
    pub fn into_inner(self) -> F {
        self.delegate
    }

    /// Returns the number of cached entries.
    pub fn cached_count(&self) -> usize {
        self.cache.lock().len()
    }
}

impl<K: Eq + Hash, V, F> Memoized<K, V, F> {
    /// Returns whether a result for `key` is already cached.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fnwrap::memo::Memoized;
    ///
    /// let negate = Memoized::new(|x: &i32| -x);
    /// assert!(!negate.is_cached(&7));
    /// let _ = negate.call(7);
    /// assert!(negate.is_cached(&7));
    /// ```
    pub fn is_cached(&self, key: &K) -> bool {
        self.cache.lock().contains_key(key)
    }
}

impl<K, V, F> Memoized<K, V, F>
where
    K: Eq + Hash,
    V: Clone,
    F: Fn(&K) -> V,
{
    /// Returns the cached value for `key`, computing and storing it first
    /// if absent.
    ///
    /// The cache guard is held for the entire lookup/compute/insert
    /// sequence, so two concurrent calls with the same key never both
    /// invoke the delegate: the second observes the first's result. A
    /// slow delegate therefore blocks every other caller of this wrapper
    /// for its duration.
    ///
    /// If the delegate panics, no entry is stored and the panic
    /// propagates; a later call with the same key re-attempts the
    /// computation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fnwrap::memo::Memoized;
    ///
    /// let square = Memoized::new(|x: &u64| x * x);
    /// assert_eq!(square.call(5), 25);
    /// assert_eq!(square.call(5), 25);
    /// assert_eq!(square.cached_count(), 1);
    /// ```
    pub fn call(&self, key: K) -> V {
        let mut cache = self.cache.lock();
        if let Some(value) = cache.get(&key) {
            return value.clone();
        }
        let value = (self.delegate)(&key);
        cache.insert(key, value.clone());
        value
    }
}

impl<K, V, F> fmt::Debug for Memoized<K, V, F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Memoized")
            .field("cached", &self.cache.lock().len())
            .finish_non_exhaustive()
    }
}

/// A memoizing wrapper around a fallible computation `Fn(&K) -> Result<V, E>`.
///
/// Only successful results are cached. A failing invocation propagates
/// its error unmodified and leaves the key uncached, so a later call with
/// the same key re-attempts the computation.
///
/// # Examples
///
/// ```rust
/// use fnwrap::memo::TryMemoize;
///
/// let parse = (|text: &String| text.parse::<i32>()).try_memoized();
/// assert_eq!(parse.try_call("42".to_string()), Ok(42));
/// assert!(parse.try_call("nope".to_string()).is_err());
/// assert_eq!(parse.cached_count(), 1); // the failure was not cached
/// ```
pub struct TryMemoized<K, V, E, F> {
    delegate: F,
    cache: Mutex<HashMap<K, V>>,
    marker: PhantomData<fn() -> E>,
}

static_assertions::assert_impl_all!(
    TryMemoized<i32, i32, String, fn(&i32) -> Result<i32, String>>: Send, Sync
);

impl<K, V, E, F> TryMemoized<K, V, E, F> {
    /// Creates a memoizing wrapper around the given fallible delegate.
    #[inline]
    pub fn new(delegate: F) -> Self {
        Self {
            delegate,
            cache: Mutex::new(HashMap::new()),
            marker: PhantomData,
        }
    }

    /// Returns this wrapper unchanged; wrapping is idempotent.
    ///
    /// See [`Memoized::memoized`].
    #[inline]
    #[must_use]
    pub fn try_memoized(self) -> Self {
        self
    }

    /// Consumes the wrapper and returns the delegate, discarding the cache.
    #[inline]
    pub fn into_inner(self) -> F {
        self.delegate
    }

    /// Returns the number of cached (successful) entries.
    pub fn cached_count(&self) -> usize {
        self.cache.lock().len()
    }
}

impl<K: Eq + Hash, V, E, F> TryMemoized<K, V, E, F> {
    /// Returns whether a successful result for `key` is already cached.
    pub fn is_cached(&self, key: &K) -> bool {
        self.cache.lock().contains_key(key)
    }
}

impl<K, V, E, F> TryMemoized<K, V, E, F>
where
    K: Eq + Hash,
    V: Clone,
    F: Fn(&K) -> Result<V, E>,
{
    /// Returns the cached value for `key`, computing it first if absent.
    ///
    /// On success the value is stored and returned. On failure the
    /// delegate's error propagates to the caller unmodified and the key
    /// remains uncached.
    ///
    /// The cache guard is held across the delegate call, with the same
    /// at-most-once and serialization consequences as [`Memoized::call`].
    ///
    /// # Errors
    ///
    /// Returns whatever error the delegate returned for this invocation.
    pub fn try_call(&self, key: K) -> Result<V, E> {
        let mut cache = self.cache.lock();
        if let Some(value) = cache.get(&key) {
            return Ok(value.clone());
        }
        let value = (self.delegate)(&key)?;
        cache.insert(key, value.clone());
        Ok(value)
    }
}

impl<K, V, E, F> fmt::Debug for TryMemoized<K, V, E, F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("TryMemoized")
            .field("cached", &self.cache.lock().len())
            .finish_non_exhaustive()
    }
}

/// Extension trait that memoizes a pure computation.
///
/// Implemented for every `Fn(&K) -> V`. For computations that can fail,
/// use [`TryMemoize`] instead so that failures are propagated rather than
/// cached as values.
///
/// # Examples
///
/// ```rust
/// use fnwrap::memo::Memoize;
///
/// let length = (|text: &String| text.len()).memoized();
/// assert_eq!(length.call("hello".to_string()), 5);
/// ```
pub trait Memoize<K, V>: Sized {
    /// Wraps this computation in a [`Memoized`] cache.
    fn memoized(self) -> Memoized<K, V, Self>;
}

impl<K, V, F> Memoize<K, V> for F
where
    F: Fn(&K) -> V,
{
    #[inline]
    fn memoized(self) -> Memoized<K, V, Self> {
        Memoized::new(self)
    }
}

/// Extension trait that memoizes a fallible computation.
///
/// Implemented for every `Fn(&K) -> Result<V, E>`. Only `Ok` results are
/// cached; see [`TryMemoized`].
pub trait TryMemoize<K, V, E>: Sized {
    /// Wraps this computation in a [`TryMemoized`] cache.
    fn try_memoized(self) -> TryMemoized<K, V, E, Self>;
}

impl<K, V, E, F> TryMemoize<K, V, E> for F
where
    F: Fn(&K) -> Result<V, E>,
{
    #[inline]
    fn try_memoized(self) -> TryMemoized<K, V, E, Self> {
        TryMemoized::new(self)
    }
}
