use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Reading or writing a dataset failed
    #[error("Dataset error: {0}")]
    Dataset(#[from] songlore_lib::DatasetError),

    /// Source client setup failed
    #[error("{0}")]
    Scrape(#[from] songlore_scraper::ScrapeError),

    /// Topic table could not be loaded
    #[error("Topic table error: {0}")]
    Topics(#[from] songlore_core::TopicError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Runtime creation or async error
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }
}
