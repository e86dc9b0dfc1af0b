use serde::Deserialize;

/// Top-level response wrapper from the Genius `search` endpoint.
#[derive(Debug, Deserialize)]
pub struct GeniusSearchResponse {
    pub response: GeniusSearchData,
}

#[derive(Debug, Deserialize)]
pub struct GeniusSearchData {
    #[serde(default)]
    pub hits: Vec<GeniusHit>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeniusHit {
    pub result: GeniusSong,
}

/// A song as it appears in Genius search hits.
#[derive(Debug, Deserialize, Clone)]
pub struct GeniusSong {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub primary_artist: Option<GeniusArtist>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeniusArtist {
    #[serde(default)]
    pub name: String,
}

impl GeniusSong {
    pub fn artist_name(&self) -> &str {
        self.primary_artist
            .as_ref()
            .map(|a| a.name.as_str())
            .unwrap_or_default()
    }

    /// True if this hit's title contains `title` and its primary artist
    /// contains `artist`, both compared case-insensitively.
    pub fn matches(&self, title: &str, artist: &str) -> bool {
        self.title.to_lowercase().contains(&title.to_lowercase())
            && self.artist_name().to_lowercase().contains(&artist.to_lowercase())
    }
}

/// Response from Last.fm `track.getInfo`.
///
/// Error responses (`{"error": 6, "message": "..."}`) share the endpoint, so
/// every field is optional.
#[derive(Debug, Deserialize, Default)]
pub struct LastFmTrackResponse {
    #[serde(default)]
    pub track: Option<LastFmTrack>,
    #[serde(default)]
    pub error: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct LastFmTrack {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub wiki: Option<LastFmWiki>,
}

#[derive(Debug, Deserialize, Default)]
pub struct LastFmWiki {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl LastFmTrackResponse {
    /// The `track.wiki.content` field, if present and non-blank.
    pub fn wiki_content(&self) -> Option<&str> {
        self.track
            .as_ref()?
            .wiki
            .as_ref()?
            .content
            .as_deref()
            .filter(|c| !c.trim().is_empty())
    }
}
