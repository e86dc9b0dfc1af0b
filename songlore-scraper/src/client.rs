use reqwest::{Method, RequestBuilder, StatusCode};
use tokio::time::Duration;

use songlore_core::SourceKind;

use crate::credentials::Credentials;
use crate::error::ScrapeError;
use crate::lookup::Lookup;
use crate::retry::{Attempt, RetryPolicy, parse_retry_after};

pub const GENIUS_BASE_URL: &str = "https://api.genius.com";
pub const LASTFM_BASE_URL: &str = "https://ws.audioscrobbler.com/2.0/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const USER_AGENT: &str = concat!("songlore/", env!("CARGO_PKG_VERSION"));

/// Everything a source client needs, fixed before the first request.
///
/// Built once per run and handed to each source, which keeps its own copy.
/// Tests point the base URLs at a mock server.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub credentials: Credentials,
    pub genius_base_url: String,
    pub lastfm_base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    pub retry: RetryPolicy,
}

impl SourceConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            genius_base_url: GENIUS_BASE_URL.to_string(),
            lastfm_base_url: LASTFM_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: USER_AGENT.to_string(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_genius_base_url(mut self, url: impl Into<String>) -> Self {
        self.genius_base_url = url.into();
        self
    }

    pub fn with_lastfm_base_url(mut self, url: impl Into<String>) -> Self {
        self.lastfm_base_url = url.into();
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// Pooled HTTP client shared by all lookups against one source.
pub(crate) struct HttpClient {
    http: reqwest::Client,
    retry: RetryPolicy,
    source: SourceKind,
}

impl HttpClient {
    pub(crate) fn new(source: SourceKind, config: &SourceConfig) -> Result<Self, ScrapeError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            http,
            retry: config.retry.clone(),
            source,
        })
    }

    /// GET with retries, passing each 2xx body through `interpret`.
    ///
    /// `interpret` runs inside the retry loop, so a body that reports a
    /// transient condition is retried like a transient status code.
    pub(crate) async fn get_with<T, B, I>(&self, what: &str, build: B, interpret: I) -> Lookup<T>
    where
        T: Send,
        B: Fn(&reqwest::Client) -> RequestBuilder + Sync,
        I: Fn(String) -> Lookup<T> + Sync,
    {
        let label = format!("{} {}", self.source.display_name(), what);
        let (build, interpret) = (&build, &interpret);
        self.retry
            .run(&Method::GET, &label, || {
                let request = build(&self.http);
                async move { send_once(request).await.and_then(interpret) }
            })
            .await
    }
}

/// Send one request and classify the response.
async fn send_once(request: RequestBuilder) -> Attempt<String> {
    let resp = match request.send().await {
        Ok(resp) => resp,
        Err(e) => return classify_transport_error(e).into(),
    };

    let status = resp.status();
    if status.is_success() {
        return match resp.text().await {
            Ok(body) => Lookup::Found(body).into(),
            Err(e) => classify_transport_error(e).into(),
        };
    }

    if RetryPolicy::is_retryable_status(status) {
        return Attempt {
            outcome: Lookup::TransientError(format!("HTTP {}", status)),
            retry_after: parse_retry_after(resp.headers()),
        };
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Lookup::FatalError(format!("credentials rejected (HTTP {})", status)).into();
    }

    Lookup::NotFound.into()
}

fn classify_transport_error(e: reqwest::Error) -> Lookup<String> {
    if e.is_timeout() || e.is_connect() {
        Lookup::TransientError(e.to_string())
    } else {
        Lookup::FatalError(e.to_string())
    }
}
