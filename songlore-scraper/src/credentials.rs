use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::ScrapeError;

/// Environment variable holding the Genius API bearer token.
pub const GENIUS_ENV: &str = "GENIUS_API_KEY";
/// Environment variable holding the Last.fm API key.
pub const LASTFM_ENV: &str = "LASTFM_API_KEY";
/// Dotenv file read from the working directory.
pub const DOTENV_FILE: &str = ".env";

/// API credentials for both sources.
///
/// Either may be missing. Nothing is validated up front: a missing or bad
/// credential surfaces as authentication failures during lookups.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub genius_token: Option<String>,
    pub lastfm_api_key: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("genius_token", &self.genius_token.as_deref().map(mask_value))
            .field("lastfm_api_key", &self.lastfm_api_key.as_deref().map(mask_value))
            .finish()
    }
}

/// Where a credential field's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the `.env` file in the working directory.
    DotEnv(&'static str),
    /// Loaded from the config file.
    ConfigFile,
    /// Not set anywhere.
    Missing,
}

impl std::fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::DotEnv(var) => write!(f, "{} in {}", var, DOTENV_FILE),
            Self::ConfigFile => write!(f, "config file"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// Provenance of each credential field.
#[derive(Debug)]
pub struct CredentialSources {
    pub genius_token: CredentialSource,
    pub lastfm_api_key: CredentialSource,
}

/// TOML config file format.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct ConfigFile {
    genius: Option<GeniusConfig>,
    lastfm: Option<LastFmConfig>,
}

#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct GeniusConfig {
    token: Option<String>,
}

#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct LastFmConfig {
    api_key: Option<String>,
}

impl ConfigFile {
    fn genius_token(&self) -> Option<String> {
        self.genius.as_ref().and_then(|g| g.token.clone())
    }

    fn lastfm_api_key(&self) -> Option<String> {
        self.lastfm.as_ref().and_then(|l| l.api_key.clone())
    }
}

impl Credentials {
    /// Load credentials. Priority: env vars > `.env` > config file.
    pub fn load() -> Self {
        Self::load_from(
            |var| std::env::var(var).ok(),
            Path::new(DOTENV_FILE),
            &config_path(),
        )
    }

    fn load_from(
        env: impl Fn(&str) -> Option<String>,
        dotenv_path: &Path,
        config_path: &Path,
    ) -> Self {
        let dotenv = load_dotenv_file(dotenv_path);
        let config = load_config_file(config_path);
        Self::resolve(
            |var| {
                env(var)
                    .filter(|v| !v.trim().is_empty())
                    .or_else(|| dotenv.get(var).cloned())
            },
            config.as_ref(),
        )
    }

    fn resolve(env: impl Fn(&str) -> Option<String>, config: Option<&ConfigFile>) -> Self {
        let non_empty = |v: String| (!v.trim().is_empty()).then_some(v);
        Self {
            genius_token: env(GENIUS_ENV)
                .and_then(non_empty)
                .or_else(|| config.and_then(|c| c.genius_token()).and_then(non_empty)),
            lastfm_api_key: env(LASTFM_ENV)
                .and_then(non_empty)
                .or_else(|| config.and_then(|c| c.lastfm_api_key()).and_then(non_empty)),
        }
    }

    /// Names of the environment variables whose credential is not set.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.genius_token.is_none() {
            missing.push(GENIUS_ENV);
        }
        if self.lastfm_api_key.is_none() {
            missing.push(LASTFM_ENV);
        }
        missing
    }
}

/// Mask a secret for display, keeping the first two characters.
pub fn mask_value(s: &str) -> String {
    let prefix: String = s.chars().take(2).collect();
    if s.chars().count() <= 2 {
        "****".to_string()
    } else {
        format!("{}****", prefix)
    }
}

/// Return the path to the credentials config file.
pub fn config_path() -> PathBuf {
    songlore_lib::settings::config_dir().join("credentials.toml")
}

/// Save credentials to the config file, creating parent directories as needed.
/// Returns the path the file was written to.
pub fn save_to_file(creds: &Credentials) -> Result<PathBuf, ScrapeError> {
    let path = config_path();
    save_to_path(creds, &path)?;
    Ok(path)
}

fn save_to_path(creds: &Credentials, path: &Path) -> Result<(), ScrapeError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let config = ConfigFile {
        genius: Some(GeniusConfig {
            token: creds.genius_token.clone(),
        }),
        lastfm: Some(LastFmConfig {
            api_key: creds.lastfm_api_key.clone(),
        }),
    };

    let toml_str = toml::to_string_pretty(&config)
        .map_err(|e| ScrapeError::Config(format!("Failed to serialize config: {}", e)))?;

    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Determine where each credential field is coming from.
pub fn credential_sources() -> CredentialSources {
    let config = load_config_file(&config_path());
    let dotenv = load_dotenv_file(Path::new(DOTENV_FILE));

    let source = |var: &'static str, in_file: bool| {
        if std::env::var(var).is_ok_and(|v| !v.trim().is_empty()) {
            CredentialSource::EnvVar(var)
        } else if dotenv.contains_key(var) {
            CredentialSource::DotEnv(var)
        } else if in_file {
            CredentialSource::ConfigFile
        } else {
            CredentialSource::Missing
        }
    };

    CredentialSources {
        genius_token: source(
            GENIUS_ENV,
            config.as_ref().and_then(|c| c.genius_token()).is_some(),
        ),
        lastfm_api_key: source(
            LASTFM_ENV,
            config.as_ref().and_then(|c| c.lastfm_api_key()).is_some(),
        ),
    }
}

/// Read `KEY=value` pairs from a dotenv file without touching the process
/// environment. A missing file is empty; unparsable lines are skipped.
fn load_dotenv_file(path: &Path) -> HashMap<String, String> {
    let Ok(iter) = dotenvy::from_path_iter(path) else {
        return HashMap::new();
    };
    iter.filter_map(|item| match item {
        Ok((key, value)) => (!value.trim().is_empty()).then_some((key, value)),
        Err(e) => {
            log::warn!("Skipping line in {}: {}", path.display(), e);
            None
        }
    })
    .collect()
}

fn load_config_file(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            log::warn!("Ignoring credentials file {}: {}", path.display(), e);
            None
        }
    }
}
