//! Best-effort results that remember why they fell back.

use crate::error::Error;

/// Outcome of a best-effort extraction.
///
/// Both variants carry a usable value. `Degraded` holds the default that
/// was substituted and the error that forced it, so callers can tell an
/// empty document apart from one that could not be read.
#[derive(Debug)]
pub enum Extraction<T> {
    /// Extraction ran to completion.
    Complete(T),
    /// Extraction failed; `value` is the fallback.
    Degraded { value: T, cause: Error },
}

impl<T> Extraction<T> {
    /// Wrap a fallback value together with its cause.
    pub fn degraded(value: T, cause: Error) -> Self {
        Extraction::Degraded { value, cause }
    }

    /// Borrow the carried value.
    pub fn value(&self) -> &T {
        match self {
            Extraction::Complete(value) => value,
            Extraction::Degraded { value, .. } => value,
        }
    }

    /// Take the carried value, discarding any cause.
    pub fn into_value(self) -> T {
        match self {
            Extraction::Complete(value) => value,
            Extraction::Degraded { value, .. } => value,
        }
    }

    /// Whether a fallback was substituted.
    pub fn is_degraded(&self) -> bool {
        matches!(self, Extraction::Degraded { .. })
    }

    /// The error that forced the fallback, if any.
    pub fn cause(&self) -> Option<&Error> {
        match self {
            Extraction::Complete(_) => None,
            Extraction::Degraded { cause, .. } => Some(cause),
        }
    }

    /// Map the carried value, keeping the degradation marker.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Extraction<U> {
        match self {
            Extraction::Complete(value) => Extraction::Complete(f(value)),
            Extraction::Degraded { value, cause } => Extraction::Degraded {
                value: f(value),
                cause,
            },
        }
    }
}

impl<T: Default> Extraction<T> {
    /// Turn a fallible result into an extraction, using `T::default()` on error.
    pub fn or_default(result: crate::error::Result<T>) -> Self {
        match result {
            Ok(value) => Extraction::Complete(value),
            Err(cause) => Extraction::degraded(T::default(), cause),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_value() {
        let ex = Extraction::Complete(3);
        assert!(!ex.is_degraded());
        assert!(ex.cause().is_none());
        assert_eq!(ex.into_value(), 3);
    }

    #[test]
    fn test_or_default_on_error() {
        let ex: Extraction<String> = Extraction::or_default(Err(Error::Encrypted));
        assert!(ex.is_degraded());
        assert!(matches!(ex.cause(), Some(Error::Encrypted)));
        assert_eq!(ex.value(), "");
    }

    #[test]
    fn test_map_keeps_marker() {
        let ex = Extraction::degraded(2, Error::UnknownFormat).map(|v| v * 10);
        assert!(ex.is_degraded());
        assert_eq!(*ex.value(), 20);
    }
}
