use songlore_core::{SourceKind, UNAVAILABLE_SENTINEL};

use crate::lookup::{AboutSource, Lookup, LookupResult};

/// Outcome of resolving one song against the ranked sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found { text: String, source: SourceKind },
    Unavailable,
}

impl Resolution {
    pub fn text(&self) -> Option<&str> {
        match self {
            Resolution::Found { text, .. } => Some(text),
            Resolution::Unavailable => None,
        }
    }

    pub fn source(&self) -> Option<SourceKind> {
        match self {
            Resolution::Found { source, .. } => Some(*source),
            Resolution::Unavailable => None,
        }
    }
}

/// Tries the primary source, then the secondary only if the primary came
/// up empty.
pub struct FallbackResolver<P, S> {
    primary: P,
    secondary: S,
}

impl<P: AboutSource, S: AboutSource> FallbackResolver<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn secondary(&self) -> &S {
        &self.secondary
    }

    pub async fn resolve(&self, artist: &str, title: &str) -> Resolution {
        let primary = usable(self.primary.lookup(title, artist).await);
        if let Lookup::Found(text) = primary {
            return Resolution::Found {
                text,
                source: self.primary.kind(),
            };
        }
        log_miss(self.primary.kind(), title, &primary);

        let secondary = usable(self.secondary.lookup(title, artist).await);
        match secondary {
            Lookup::Found(text) => Resolution::Found {
                text,
                source: self.secondary.kind(),
            },
            other => {
                log_miss(self.secondary.kind(), title, &other);
                Resolution::Unavailable
            }
        }
    }
}

/// Blank text, or text equal to the reserved sentinel, counts as a miss.
fn usable(result: LookupResult) -> LookupResult {
    match result {
        Lookup::Found(text) if text.trim().is_empty() || text.trim() == UNAVAILABLE_SENTINEL => {
            Lookup::NotFound
        }
        other => other,
    }
}

fn log_miss(source: SourceKind, title: &str, result: &LookupResult) {
    match result {
        Lookup::FatalError(cause) | Lookup::TransientError(cause) => {
            log::warn!("{} lookup failed for '{}': {}", source.display_name(), title, cause)
        }
        _ => log::debug!("{}: nothing for '{}'", source.display_name(), title),
    }
}

#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod tests;
