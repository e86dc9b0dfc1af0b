pub mod client;
pub mod credentials;
pub mod enrich;
pub mod error;
pub mod filter;
pub mod genius;
pub mod html;
pub mod lastfm;
pub mod log;
pub mod lookup;
pub mod resolver;
pub mod retry;
pub mod run;
pub mod types;

#[cfg(test)]
#[path = "tests/fakes.rs"]
mod fakes;

pub use client::SourceConfig;
pub use credentials::{
    CredentialSource, CredentialSources, Credentials, config_path, credential_sources,
    save_to_file,
};
pub use enrich::{RowEnricher, SourceEnricher, create_enricher, validate};
pub use error::{RowFailure, ScrapeError};
pub use filter::{audit_missing_about, filter_matches};
pub use genius::GeniusSource;
pub use lastfm::LastFmSource;
pub use log::{EnrichLog, LogEntry, LogSummary};
pub use lookup::{AboutSource, Lookup, LookupResult};
pub use resolver::{FallbackResolver, Resolution};
pub use retry::RetryPolicy;
pub use run::{EnrichEvent, EnrichOptions, EnrichRun, RowOutcome, enrich_all};
