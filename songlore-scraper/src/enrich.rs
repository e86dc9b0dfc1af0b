use songlore_core::{EnrichedRecord, SongRecord, TopicTable, normalize_str};

use crate::client::SourceConfig;
use crate::error::{RowFailure, ScrapeError};
use crate::genius::GeniusSource;
use crate::lastfm::LastFmSource;
use crate::lookup::AboutSource;
use crate::resolver::{FallbackResolver, Resolution};

/// The production enricher: Genius first, Last.fm as fallback.
pub type SourceEnricher = RowEnricher<GeniusSource, LastFmSource>;

/// Turns one song record into an enriched record.
///
/// Shared read-only by every worker of a run.
pub struct RowEnricher<P, S> {
    resolver: FallbackResolver<P, S>,
    topics: TopicTable,
}

impl<P: AboutSource, S: AboutSource> RowEnricher<P, S> {
    pub fn new(resolver: FallbackResolver<P, S>, topics: TopicTable) -> Self {
        Self { resolver, topics }
    }

    pub fn resolver(&self) -> &FallbackResolver<P, S> {
        &self.resolver
    }

    /// Validate, resolve, normalize and classify one row.
    ///
    /// Rows that fail validation never reach a source.
    pub async fn enrich(&self, row: &SongRecord) -> Result<EnrichedRecord, RowFailure> {
        if let Err(failure) = validate(row) {
            log::warn!("Row {}: {}", row.id, failure);
            return Err(failure);
        }

        let resolution = self.resolver.resolve(&row.artist, &row.title).await;
        Ok(self.assemble(row, resolution))
    }

    fn assemble(&self, row: &SongRecord, resolution: Resolution) -> EnrichedRecord {
        let lyrics = normalize_str(row.lyrics.as_deref().unwrap_or_default());
        let (about_text, about_source) = match resolution {
            Resolution::Found { text, source } => (Some(normalize_str(&text)), Some(source)),
            Resolution::Unavailable => (None, None),
        };

        let classified = format!("{} {}", lyrics, about_text.as_deref().unwrap_or_default());
        let topic = self.topics.classify(&classified).to_string();

        EnrichedRecord {
            record: SongRecord {
                lyrics: Some(lyrics),
                ..row.clone()
            },
            about_text,
            about_source,
            topic,
        }
    }
}

/// Reject rows that cannot be enriched, before any network access.
pub fn validate(row: &SongRecord) -> Result<(), RowFailure> {
    if !row.has_valid_title() {
        return Err(RowFailure::InvalidTitle);
    }
    if row.lyrics.is_none() {
        return Err(RowFailure::MissingLyrics);
    }
    Ok(())
}

/// Build the Genius/Last.fm enricher from a source config.
pub fn create_enricher(
    config: &SourceConfig,
    topics: TopicTable,
) -> Result<SourceEnricher, ScrapeError> {
    let resolver = FallbackResolver::new(GeniusSource::new(config)?, LastFmSource::new(config)?);
    Ok(RowEnricher::new(resolver, topics))
}

#[cfg(test)]
#[path = "tests/enrich_tests.rs"]
mod tests;
