//! Absence-aware resolution of values pulled out of external entities.
//!
//! A resolver closure expresses every optional step with `?` on `Option`, so a
//! chain such as `release.tender?.value?.amount` collapses to `None` as soon as
//! one link is missing. Anything else the closure does wrong (a panic, a
//! non-absence error) is left to propagate.

use crate::utils::error::IntegrationError;

/// Classifies an error as "the value is simply not there".
pub trait Absence {
    fn is_absence(&self) -> bool;
}

impl Absence for IntegrationError {
    fn is_absence(&self) -> bool {
        matches!(self, IntegrationError::MissingFieldError { .. })
    }
}

/// Runs `resolver` exactly once and returns what it produced.
///
/// Panics raised inside `resolver` are not intercepted.
///
/// ```
/// use releases_integration::resolve;
///
/// struct Value { amount: Option<i64> }
/// struct Tender { value: Option<Value> }
///
/// let tender = Tender { value: None };
/// assert_eq!(resolve(|| tender.value.as_ref()?.amount), None);
///
/// let tender = Tender { value: Some(Value { amount: Some(42) }) };
/// assert_eq!(resolve(|| tender.value.as_ref()?.amount), Some(42));
/// ```
pub fn resolve<T, F>(resolver: F) -> Option<T>
where
    F: FnOnce() -> Option<T>,
{
    let resolved = resolver();
    tracing::trace!(present = resolved.is_some(), "resolved value");
    resolved
}

/// Fallible variant of [`resolve`]: absence-category errors become `Ok(None)`,
/// every other error is returned as is.
pub fn try_resolve<T, E, F>(resolver: F) -> Result<Option<T>, E>
where
    E: Absence,
    F: FnOnce() -> Result<Option<T>, E>,
{
    match resolver() {
        Ok(resolved) => {
            tracing::trace!(present = resolved.is_some(), "resolved value");
            Ok(resolved)
        }
        Err(e) if e.is_absence() => {
            tracing::trace!("resolver reported absence");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Turns an absence-category error on a single `Result` into `Ok(None)`.
pub trait OptionalExt<T, E> {
    fn optional(self) -> Result<Option<T>, E>;
}

impl<T, E: Absence> OptionalExt<T, E> for Result<T, E> {
    fn optional(self) -> Result<Option<T>, E> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(e) if e.is_absence() => Ok(None),
            Err(e) => Err(e),
        }
    }
}
