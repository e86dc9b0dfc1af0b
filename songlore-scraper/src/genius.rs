use songlore_core::SourceKind;

use crate::client::{HttpClient, SourceConfig};
use crate::error::ScrapeError;
use crate::html::extract_about;
use crate::lookup::{AboutSource, Lookup, LookupResult};
use crate::types::{GeniusSearchResponse, GeniusSong};

/// Primary source: Genius search plus the song page's about block.
pub struct GeniusSource {
    client: HttpClient,
    base_url: String,
    token: Option<String>,
}

impl GeniusSource {
    pub fn new(config: &SourceConfig) -> Result<Self, ScrapeError> {
        Ok(Self {
            client: HttpClient::new(SourceKind::Genius, config)?,
            base_url: config.genius_base_url.trim_end_matches('/').to_string(),
            token: config.credentials.genius_token.clone(),
        })
    }

    /// Search for the song and pick the first matching hit.
    pub async fn search(&self, title: &str, artist: &str) -> Lookup<GeniusSong> {
        let url = format!("{}/search", self.base_url);
        let query = format!("{} {}", title, artist);
        self.client
            .get_with(
                "search",
                |http| {
                    let request = http.get(&url).query(&[("q", query.as_str())]);
                    match &self.token {
                        Some(token) => request.bearer_auth(token),
                        None => request,
                    }
                },
                |body| match serde_json::from_str::<GeniusSearchResponse>(&body) {
                    Ok(resp) => pick_hit(resp, title, artist),
                    Err(e) => Lookup::FatalError(format!("malformed search response: {}", e)),
                },
            )
            .await
    }

    /// Fetch a song page and extract its about-text.
    pub async fn fetch_about(&self, song_url: &str) -> LookupResult {
        self.client
            .get_with(
                "page",
                |http| http.get(song_url),
                |html| extract_about(&html).map_or(Lookup::NotFound, Lookup::Found),
            )
            .await
    }
}

fn pick_hit(resp: GeniusSearchResponse, title: &str, artist: &str) -> Lookup<GeniusSong> {
    resp.response
        .hits
        .into_iter()
        .map(|hit| hit.result)
        .find(|song| song.matches(title, artist) && !song.url.is_empty())
        .map_or(Lookup::NotFound, Lookup::Found)
}

impl AboutSource for GeniusSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Genius
    }

    async fn lookup(&self, title: &str, artist: &str) -> LookupResult {
        let song = match self.search(title, artist).await.into_found() {
            Ok(song) => song,
            Err(miss) => {
                log::debug!("Genius search for '{}' by '{}': {}", title, artist, miss);
                return miss;
            }
        };
        log::debug!("Genius hit for '{}': {}", title, song.url);
        self.fetch_about(&song.url).await
    }
}

#[cfg(test)]
#[path = "tests/genius_tests.rs"]
mod tests;
