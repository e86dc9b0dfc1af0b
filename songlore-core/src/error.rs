/// Errors raised while building a topic table.
#[derive(Debug, thiserror::Error)]
pub enum TopicError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Topic table is empty")]
    Empty,

    #[error("Topic #{index} has an empty label")]
    EmptyLabel { index: usize },

    #[error("Topic '{label}' has no keywords")]
    NoKeywords { label: String },

    #[error("Topic '{label}' is defined more than once")]
    Duplicate { label: String },
}
