/// External sources an about-text can come from.
///
/// Order of declaration is lookup priority: the resolver always asks
/// `Genius` first and only falls back to `LastFm` when it comes up empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Genius,
    LastFm,
}

impl SourceKind {
    /// Full display name for the source.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Genius => "Genius",
            Self::LastFm => "Last.fm",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_full_name() {
        assert_eq!(SourceKind::Genius.to_string(), "Genius");
        assert_eq!(SourceKind::LastFm.to_string(), "Last.fm");
    }
}
