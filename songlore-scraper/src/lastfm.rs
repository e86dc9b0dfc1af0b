use songlore_core::SourceKind;

use crate::client::{HttpClient, SourceConfig};
use crate::error::ScrapeError;
use crate::lookup::{AboutSource, Lookup, LookupResult};
use crate::types::LastFmTrackResponse;

/// Secondary source: Last.fm `track.getInfo` wiki content.
pub struct LastFmSource {
    client: HttpClient,
    base_url: String,
    api_key: String,
}

impl LastFmSource {
    pub fn new(config: &SourceConfig) -> Result<Self, ScrapeError> {
        Ok(Self {
            client: HttpClient::new(SourceKind::LastFm, config)?,
            base_url: config.lastfm_base_url.clone(),
            api_key: config.credentials.lastfm_api_key.clone().unwrap_or_default(),
        })
    }
}

impl AboutSource for LastFmSource {
    fn kind(&self) -> SourceKind {
        SourceKind::LastFm
    }

    async fn lookup(&self, title: &str, artist: &str) -> LookupResult {
        let result = self
            .client
            .get_with(
                "track.getInfo",
                |http| {
                    http.get(&self.base_url).query(&[
                        ("method", "track.getInfo"),
                        ("api_key", self.api_key.as_str()),
                        ("artist", artist),
                        ("track", title),
                        ("format", "json"),
                    ])
                },
                interpret_track_info,
            )
            .await;
        log::debug!("Last.fm lookup for '{}' by '{}': {}", title, artist, result);
        result
    }
}

/// Interpret a `track.getInfo` body. Error payloads share the endpoint and
/// may arrive with a 200 status.
pub(crate) fn interpret_track_info(body: String) -> LookupResult {
    let resp: LastFmTrackResponse = match serde_json::from_str(&body) {
        Ok(resp) => resp,
        Err(e) => return Lookup::FatalError(format!("malformed track.getInfo response: {}", e)),
    };

    if let Some(code) = resp.error {
        return classify_api_error(code, resp.message.as_deref());
    }

    resp.wiki_content()
        .map_or(Lookup::NotFound, |content| Lookup::Found(content.to_string()))
}

/// Map a Last.fm API error code onto a lookup outcome.
fn classify_api_error(code: i64, message: Option<&str>) -> LookupResult {
    let cause = format!("Last.fm error {}: {}", code, message.unwrap_or("unknown error"));
    match code {
        // Track not found
        6 => Lookup::NotFound,
        // Backend failure, service offline, temporary error, rate limit
        8 | 11 | 16 | 29 => Lookup::TransientError(cause),
        _ => Lookup::FatalError(cause),
    }
}

#[cfg(test)]
#[path = "tests/lastfm_tests.rs"]
mod tests;
