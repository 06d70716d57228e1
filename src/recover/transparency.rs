//! Transparency views: using a fallible computation under a narrower
//! failure contract.
//!
//! Some call sites cannot express a computation's failure type
//! statically — an `Iterator::map` adapter, a callback slot typed
//! `Fn(A) -> T`, a boundary that only understands one error type. The
//! [`Transparent`] trait re-exposes a `Fn(A) -> Result<T, E>` under such
//! contracts, with one of three policies chosen at wrap time:
//!
//! - **Containing** ([`contained`](Transparent::contained) /
//!   [`unchecked`](Transparent::unchecked)): the failure is captured and
//!   re-raised as an owned [`ContainedError`] carrying the original's
//!   message and the original as its cause. Nothing is dropped. This is
//!   the recommended default policy.
//! - **Transparent** ([`opaque`](Transparent::opaque)): the original
//!   failure value crosses the boundary unmodified, as a type-erased
//!   [`OpaqueError`] payload. Call sites that know the original type
//!   recover it with [`OpaqueError::downcast`]; all others see only an
//!   opaque failure and pass it along.
//!
//! `unchecked` is the containing policy for call sites that statically
//! require an infallible computation: the wrapper is raised as a panic
//! payload, Rust's native unchecked failure category. Panics raised by
//! the wrapped computation itself pass through unchanged.
//!
//! # Examples
//!
//! ```rust
//! use fnwrap::recover::{OpaqueError, Transparent};
//! use std::num::ParseIntError;
//!
//! let parse = (|text: &str| text.parse::<i32>()).opaque();
//!
//! let failure: OpaqueError = parse("nope").unwrap_err();
//! // only callers that re-declare the original type can see inside
//! assert!(failure.is::<ParseIntError>());
//! ```

use std::any::Any;
use std::error::Error;
use std::fmt;
use std::panic::panic_any;

/// Owned wrapper for a failure captured by the containing policy.
///
/// Carries a message derived from the original failure's `Display`
/// rendering and retains the original as its
/// [`source`](Error::source), so no provenance is lost when the typed
/// failure is erased.
///
/// # Examples
///
/// ```rust
/// use fnwrap::recover::ContainedError;
/// use std::error::Error;
///
/// let original = "boom".parse::<i32>().unwrap_err();
/// let contained = ContainedError::new(original.clone());
///
/// assert_eq!(contained.to_string(), original.to_string());
/// assert!(contained.source().is_some());
/// ```
#[derive(Debug)]
pub struct ContainedError {
    message: String,
    source: Box<dyn Error + Send + Sync + 'static>,
}

impl ContainedError {
    /// Wraps `source`, deriving the message from its `Display` output.
    pub fn new<E>(source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            message: source.to_string(),
            source: Box::new(source),
        }
    }

    /// Returns the message derived from the original failure.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Consumes the wrapper and returns the original failure.
    pub fn into_source(self) -> Box<dyn Error + Send + Sync + 'static> {
        self.source
    }
}

impl fmt::Display for ContainedError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.message)
    }
}

impl Error for ContainedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&*self.source)
    }
}

/// A failure carried across a transparent view as a type-erased payload.
///
/// The original failure value is boxed unmodified; it is not required to
/// implement [`Error`] or even `Debug`. A caller that knows the original
/// type recovers it by value with [`downcast`](Self::downcast); everyone
/// else can only propagate the opaque failure.
///
/// # Examples
///
/// ```rust
/// use fnwrap::recover::OpaqueError;
///
/// #[derive(Debug, PartialEq)]
/// struct QuotaExceeded(u32);
///
/// let failure = OpaqueError::new(QuotaExceeded(99));
/// assert_eq!(failure.downcast::<QuotaExceeded>().unwrap(), QuotaExceeded(99));
/// ```
pub struct OpaqueError {
    payload: Box<dyn Any + Send>,
}

impl OpaqueError {
    /// Erases `failure` into an opaque payload.
    pub fn new<E>(failure: E) -> Self
    where
        E: Any + Send,
    {
        Self {
            payload: Box::new(failure),
        }
    }

    /// Returns whether the payload is of type `E`.
    pub fn is<E: Any>(&self) -> bool {
        self.payload.is::<E>()
    }

    /// Returns a reference to the payload if it is of type `E`.
    pub fn downcast_ref<E: Any>(&self) -> Option<&E> {
        self.payload.downcast_ref::<E>()
    }

    /// Recovers the original failure by value.
    ///
    /// # Errors
    ///
    /// Returns `self` unchanged when the payload is not of type `E`, so
    /// a non-matching guess costs nothing.
    pub fn downcast<E: Any>(self) -> Result<E, Self> {
        match self.payload.downcast::<E>() {
            Ok(original) => Ok(*original),
            Err(payload) => Err(Self { payload }),
        }
    }
}

impl fmt::Debug for OpaqueError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("OpaqueError").finish_non_exhaustive()
    }
}

impl fmt::Display for OpaqueError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("opaque failure raised through a transparent view")
    }
}

impl Error for OpaqueError {}

/// Extension trait re-exposing a `Fn(A) -> Result<T, E>` under a
/// narrower failure contract.
///
/// See the [module docs](self) for how to choose between the containing
/// and transparent policies.
pub trait Transparent<A, T, E>: Fn(A) -> Result<T, E> + Sized {
    /// Containing policy: failures are wrapped into [`ContainedError`].
    ///
    /// On success the value is returned unchanged. On failure the typed
    /// error is captured into a [`ContainedError`] carrying its message
    /// and the original as cause.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fnwrap::recover::Transparent;
    /// use std::num::ParseIntError;
    ///
    /// let parse = (|text: &str| text.parse::<i32>()).contained();
    ///
    /// let failure = parse("nope").unwrap_err();
    /// assert!(std::error::Error::source(&failure)
    ///     .unwrap()
    ///     .downcast_ref::<ParseIntError>()
    ///     .is_some());
    /// ```
    fn contained(self) -> impl Fn(A) -> Result<T, ContainedError>
    where
        E: Error + Send + Sync + 'static,
    {
        move |input| self(input).map_err(ContainedError::new)
    }

    /// Containing policy for call sites that require an infallible
    /// computation.
    ///
    /// On failure, raises the [`ContainedError`] wrapper as a panic
    /// payload — catchable with [`std::panic::catch_unwind`] and
    /// downcastable back to the wrapper, cause included. Panics raised
    /// by the wrapped computation itself pass through unchanged.
    ///
    /// # Panics
    ///
    /// Panics with a [`ContainedError`] payload whenever the wrapped
    /// computation returns `Err`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fnwrap::recover::Transparent;
    ///
    /// let parse = (|text: &str| text.parse::<u8>()).unchecked();
    /// let values: Vec<u8> = ["1", "2", "3"].into_iter().map(parse).collect();
    /// assert_eq!(values, vec![1, 2, 3]);
    /// ```
    fn unchecked(self) -> impl Fn(A) -> T
    where
        E: Error + Send + Sync + 'static,
    {
        move |input| match self(input) {
            Ok(value) => value,
            Err(failure) => panic_any(ContainedError::new(failure)),
        }
    }

    /// Transparent policy: the original failure value crosses the
    /// boundary unmodified.
    ///
    /// On failure, the error is moved into an [`OpaqueError`] payload
    /// with no wrapping and no message derivation. Call sites that know
    /// the original type re-declare it via
    /// [`OpaqueError::downcast`]; others see an opaque failure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fnwrap::recover::Transparent;
    ///
    /// #[derive(Debug, PartialEq)]
    /// struct Rejected(&'static str);
    ///
    /// let gate = (|age: u32| if age >= 18 { Ok(age) } else { Err(Rejected("minor")) }).opaque();
    ///
    /// assert_eq!(gate(30).unwrap(), 30);
    /// let failure = gate(12).unwrap_err();
    /// assert_eq!(failure.downcast::<Rejected>().unwrap(), Rejected("minor"));
    /// ```
    fn opaque(self) -> impl Fn(A) -> Result<T, OpaqueError>
    where
        E: Any + Send,
    {
        move |input| self(input).map_err(OpaqueError::new)
    }
}

impl<A, T, E, F> Transparent<A, T, E> for F where F: Fn(A) -> Result<T, E> {}
