use thiserror::Error;

/// Errors that can occur while reading or writing a song dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// I/O error while opening or writing the file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV layer rejected the file
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is not in the header row
    #[error("Missing required column '{0}'")]
    MissingColumn(String),
}

impl DatasetError {
    pub fn missing_column(name: impl Into<String>) -> Self {
        Self::MissingColumn(name.into())
    }
}
