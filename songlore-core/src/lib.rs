pub mod error;
pub mod normalize;
pub mod record;
pub mod source;
pub mod topic;

pub use error::TopicError;
pub use normalize::{normalize, normalize_str};
pub use record::{EnrichedRecord, OutputRow, SongRecord};
pub use source::SourceKind;
pub use topic::{DEFAULT_TOPIC, TopicRule, TopicTable, classify};

/// Reserved about-text meaning "neither source had anything".
///
/// Treated as absent wherever it shows up in source data or old outputs.
pub const UNAVAILABLE_SENTINEL: &str = "About section not available";
