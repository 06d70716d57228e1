//! Memoization for zero-argument computations.
//!
//! A thunk is a computation with no input: the cache holds at most one
//! entry, so the keyed machinery of [`Memoized`](super::Memoized)
//! collapses to a three-state cell behind a mutex.
//!
//! Two flavors are provided:
//!
//! - [`MemoizedThunk`]: the initializer is an `FnOnce` and runs at most
//!   once. If it panics mid-flight the thunk is **poisoned** and every
//!   later [`force`](MemoizedThunk::force) panics.
//! - [`TryMemoizedThunk`]: the initializer is a re-invocable `Fn`
//!   returning `Result`; failed attempts propagate their error and are
//!   retried on the next call, matching the keyed caches' rule that only
//!   successes are stored.
//!
//! The guard is held while the initializer runs, so concurrent callers
//! block until the single in-flight computation finishes and then read
//! the cached value. Calling `force` from inside the initializer
//! deadlocks.

use std::fmt;
use std::marker::PhantomData;
use std::mem;

use parking_lot::Mutex;

/// Error returned when a [`MemoizedThunk`] cannot produce a value because
/// its initializer panicked on an earlier call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThunkPoisonedError;

impl fmt::Display for ThunkPoisonedError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "MemoizedThunk: initializer panicked on a previous call")
    }
}

impl std::error::Error for ThunkPoisonedError {}

enum ThunkState<T, F> {
    Pending(F),
    Ready(T),
    Poisoned,
}

/// A thread-safe memoized zero-argument computation.
///
/// The initializer runs on the first call to [`force`](Self::force) and
/// its result is cached; later calls return a clone of the cached value.
/// Multiple threads may call `force` concurrently: exactly one executes
/// the initializer, the rest wait and read the cached result.
///
/// # Examples
///
/// ```rust
/// use fnwrap::memo::MemoizedThunk;
/// use std::sync::Arc;
/// use std::thread;
///
/// let shared = Arc::new(MemoizedThunk::new(|| 42));
///
/// let handles: Vec<_> = (0..4)
///     .map(|_| {
///         let shared = Arc::clone(&shared);
///         thread::spawn(move || shared.force())
///     })
///     .collect();
///
/// for handle in handles {
///     assert_eq!(handle.join().unwrap(), 42);
/// }
/// ```
pub struct MemoizedThunk<T, F = fn() -> T> {
    state: Mutex<ThunkState<T, F>>,
}

static_assertions::assert_impl_all!(MemoizedThunk<i32, fn() -> i32>: Send, Sync);

impl<T, F> MemoizedThunk<T, F> {
    /// Creates a thunk that will run `initializer` on first use.
    #[inline]
    pub const fn new(initializer: F) -> Self {
        Self {
            state: Mutex::new(ThunkState::Pending(initializer)),
        }
    }

    /// Returns whether the value has been computed.
    pub fn is_forced(&self) -> bool {
        matches!(&*self.state.lock(), ThunkState::Ready(_))
    }

    /// Returns whether the initializer panicked on an earlier call.
    pub fn is_poisoned(&self) -> bool {
        matches!(&*self.state.lock(), ThunkState::Poisoned)
    }
}

impl<T> MemoizedThunk<T, fn() -> T> {
    /// Creates a thunk that is already computed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fnwrap::memo::MemoizedThunk;
    ///
    /// let ready = MemoizedThunk::new_with_value(7);
    /// assert!(ready.is_forced());
    /// assert_eq!(ready.force(), 7);
    /// ```
    #[inline]
    pub const fn new_with_value(value: T) -> Self {
        Self {
            state: Mutex::new(ThunkState::Ready(value)),
        }
    }
}

impl<T: Clone, F> MemoizedThunk<T, F> {
    /// Returns a clone of the value if it has been computed.
    ///
    /// Unlike [`force`](Self::force), this never triggers computation.
    pub fn get(&self) -> Option<T> {
        match &*self.state.lock() {
            ThunkState::Ready(value) => Some(value.clone()),
            ThunkState::Pending(_) | ThunkState::Poisoned => None,
        }
    }
}

impl<T: Clone, F: FnOnce() -> T> MemoizedThunk<T, F> {
    /// Forces the computation and returns (a clone of) the value.
    ///
    /// # Panics
    ///
    /// Panics if the initializer panicked on this or an earlier call.
    pub fn force(&self) -> T {
        match self.try_force() {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        }
    }

    /// Forces the computation, reporting poisoning as an error instead of
    /// panicking.
    ///
    /// The state is moved to `Poisoned` before the initializer runs and
    /// to `Ready` after it returns, so a panic inside the initializer
    /// leaves the thunk poisoned rather than half-initialized. The panic
    /// itself propagates to the caller that triggered it; subsequent
    /// callers get `Err(ThunkPoisonedError)`.
    ///
    /// # Errors
    ///
    /// Returns [`ThunkPoisonedError`] if a previous initialization
    /// attempt panicked.
    pub fn try_force(&self) -> Result<T, ThunkPoisonedError> {
        let mut state = self.state.lock();
        match &*state {
            ThunkState::Ready(value) => Ok(value.clone()),
            ThunkState::Poisoned => Err(ThunkPoisonedError),
            ThunkState::Pending(_) => {
                let ThunkState::Pending(initializer) =
                    mem::replace(&mut *state, ThunkState::Poisoned)
                else {
                    unreachable!("state checked above")
                };
                let value = initializer();
                *state = ThunkState::Ready(value.clone());
                Ok(value)
            }
        }
    }
}

impl<T: Default> Default for MemoizedThunk<T> {
    fn default() -> Self {
        Self::new(T::default)
    }
}

impl<T: fmt::Debug, F> fmt::Debug for MemoizedThunk<T, F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.state.lock() {
            ThunkState::Ready(value) => fmt::Debug::fmt(value, formatter),
            ThunkState::Pending(_) => formatter.write_str("<pending>"),
            ThunkState::Poisoned => formatter.write_str("<poisoned>"),
        }
    }
}

enum TryThunkState<T, F> {
    Unforced(F),
    Ready(T),
}

/// A thread-safe memoized zero-argument computation that can fail.
///
/// The initializer is re-invocable: a failed attempt returns its error to
/// the caller and leaves the thunk unforced, so the next call attempts
/// the computation again. Only a successful value is cached.
///
/// # Examples
///
/// ```rust
/// use fnwrap::memo::TryMemoizedThunk;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// let attempts = AtomicUsize::new(0);
/// let flaky = TryMemoizedThunk::new(|| {
///     if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
///         Err("warming up")
///     } else {
///         Ok(42)
///     }
/// });
///
/// assert_eq!(flaky.try_force(), Err("warming up"));
/// assert_eq!(flaky.try_force(), Ok(42));
/// assert_eq!(flaky.try_force(), Ok(42)); // cached, no third attempt
/// assert_eq!(attempts.load(Ordering::SeqCst), 2);
/// ```
pub struct TryMemoizedThunk<T, E, F = fn() -> Result<T, E>> {
    state: Mutex<TryThunkState<T, F>>,
    marker: PhantomData<fn() -> E>,
}

static_assertions::assert_impl_all!(
    TryMemoizedThunk<i32, String, fn() -> Result<i32, String>>: Send, Sync
);

impl<T, E, F> TryMemoizedThunk<T, E, F> {
    /// Creates a fallible thunk that will run `initializer` on first use.
    #[inline]
    pub const fn new(initializer: F) -> Self {
        Self {
            state: Mutex::new(TryThunkState::Unforced(initializer)),
            marker: PhantomData,
        }
    }

    /// Returns whether a successful value has been computed.
    pub fn is_forced(&self) -> bool {
        matches!(&*self.state.lock(), TryThunkState::Ready(_))
    }
}

impl<T: Clone, E, F: Fn() -> Result<T, E>> TryMemoizedThunk<T, E, F> {
    /// Forces the computation, caching the value on success.
    ///
    /// # Errors
    ///
    /// Returns the initializer's error unmodified; the thunk stays
    /// unforced and the next call re-attempts the computation.
    pub fn try_force(&self) -> Result<T, E> {
        let mut state = self.state.lock();
        let value = match &*state {
            TryThunkState::Ready(value) => return Ok(value.clone()),
            TryThunkState::Unforced(initializer) => initializer()?,
        };
        *state = TryThunkState::Ready(value.clone());
        Ok(value)
    }
}

impl<T: fmt::Debug, E, F> fmt::Debug for TryMemoizedThunk<T, E, F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.state.lock() {
            TryThunkState::Ready(value) => fmt::Debug::fmt(value, formatter),
            TryThunkState::Unforced(_) => formatter.write_str("<unforced>"),
        }
    }
}
