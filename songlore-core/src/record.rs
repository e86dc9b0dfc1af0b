use serde::{Deserialize, Serialize};

use crate::source::SourceKind;

/// One row of the input lyrics dataset.
///
/// Missing CSV values for text columns deserialize to empty strings, except
/// `lyrics`, which stays `None` so the enricher can reject the row instead of
/// classifying against nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongRecord {
    /// Opaque row identity, carried through to the output and to log lines.
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub lyrics: Option<String>,
}

impl SongRecord {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        lyrics: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            tag: String::new(),
            artist: artist.into(),
            lyrics: Some(lyrics.into()),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// A title is usable for lookups when it has at least one non-whitespace character.
    pub fn has_valid_title(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

/// A song record after enrichment.
///
/// `record.lyrics` holds the normalized lyrics. `about_text`, when present,
/// is normalized too and never equals the unavailable sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedRecord {
    pub record: SongRecord,
    pub about_text: Option<String>,
    /// Which source produced `about_text`.
    pub about_source: Option<SourceKind>,
    /// Topic label; never empty (falls back to "other").
    pub topic: String,
}

impl EnrichedRecord {
    pub fn id(&self) -> &str {
        &self.record.id
    }

    /// True if this record carries an about-text worth writing out.
    pub fn has_about(&self) -> bool {
        self.about_text
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty() && t != crate::UNAVAILABLE_SENTINEL)
    }
}

/// The flat shape written to the output CSV: every input column plus
/// `about_section` and `topic`.
#[derive(Debug, Clone, Serialize)]
pub struct OutputRow<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub tag: &'a str,
    pub artist: &'a str,
    pub lyrics: &'a str,
    pub about_section: Option<&'a str>,
    pub topic: &'a str,
}

impl<'a> From<&'a EnrichedRecord> for OutputRow<'a> {
    fn from(rec: &'a EnrichedRecord) -> Self {
        Self {
            id: &rec.record.id,
            title: &rec.record.title,
            tag: &rec.record.tag,
            artist: &rec.record.artist,
            lyrics: rec.record.lyrics.as_deref().unwrap_or_default(),
            about_section: rec.about_text.as_deref(),
            topic: &rec.topic,
        }
    }
}
