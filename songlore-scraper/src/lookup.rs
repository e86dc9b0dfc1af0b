use std::future::Future;

use songlore_core::SourceKind;

/// Outcome of one lookup step against an external source.
///
/// `NotFound` is a routine, well-formed "nothing here" and drives fallback.
/// `TransientError` is only ever seen inside the retry loop; once retries
/// are exhausted it degrades to `NotFound`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
    TransientError(String),
    FatalError(String),
}

/// Lookup yielding an about-text.
pub type LookupResult = Lookup<String>;

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(t) => Some(t),
            _ => None,
        }
    }

    pub fn and_then<U>(self, f: impl FnOnce(T) -> Lookup<U>) -> Lookup<U> {
        match self.into_found() {
            Ok(t) => f(t),
            Err(other) => other,
        }
    }

    /// Split into the found value or the non-found outcome retyped for the caller.
    pub fn into_found<U>(self) -> Result<T, Lookup<U>> {
        match self {
            Lookup::Found(t) => Ok(t),
            Lookup::NotFound => Err(Lookup::NotFound),
            Lookup::TransientError(cause) => Err(Lookup::TransientError(cause)),
            Lookup::FatalError(cause) => Err(Lookup::FatalError(cause)),
        }
    }
}

impl<T> std::fmt::Display for Lookup<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lookup::Found(_) => write!(f, "found"),
            Lookup::NotFound => write!(f, "not found"),
            Lookup::TransientError(cause) => write!(f, "transient error: {}", cause),
            Lookup::FatalError(cause) => write!(f, "error: {}", cause),
        }
    }
}

/// A single external source of about-texts.
///
/// Implementations own their protocol and retry policy and never fail
/// outright: every problem is folded into the returned [`LookupResult`].
pub trait AboutSource: Send + Sync {
    fn kind(&self) -> SourceKind;

    fn lookup(&self, title: &str, artist: &str) -> impl Future<Output = LookupResult> + Send;
}

#[cfg(test)]
#[path = "tests/lookup_tests.rs"]
mod tests;
