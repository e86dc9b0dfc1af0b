/// Errors raised while setting up or running an enrichment.
///
/// Per-request failures never surface as `ScrapeError`; they are folded
/// into [`Lookup`](crate::lookup::Lookup) outcomes inside each source.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Why a single row produced no enriched record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowFailure {
    #[error("invalid song title")]
    InvalidTitle,

    #[error("lyrics field is missing")]
    MissingLyrics,

    #[error("row processing panicked: {0}")]
    Panicked(String),

    #[error("row did not finish within {0:?}")]
    TimedOut(std::time::Duration),
}
