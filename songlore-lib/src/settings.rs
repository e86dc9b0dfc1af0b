//! Shared settings file (`~/.config/songlore/settings.toml`).
//!
//! Holds defaults for `songlore enrich` so long runs don't need a wall of
//! flags. Resolution order for every field: CLI flag, then the `[enrich]`
//! table here, then the built-in default.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Directory holding all songlore config files.
pub fn config_dir() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("songlore")
}

/// Canonical path to the shared settings file.
pub fn settings_path() -> PathBuf {
    config_dir().join("settings.toml")
}

/// `[enrich]` table of the settings file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichSettings {
    pub workers: Option<usize>,
    pub max_rows: Option<usize>,
    pub sample_size: Option<usize>,
    pub seed: Option<u64>,
    pub row_timeout_secs: Option<u64>,
    pub topics: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct SettingsFile {
    #[serde(default)]
    enrich: EnrichSettings,
}

/// Load `[enrich]` from the default settings path.
///
/// A missing file yields defaults. An unreadable or invalid file is logged
/// and also yields defaults; settings never block a run.
pub fn load_enrich_settings() -> EnrichSettings {
    let path = settings_path();
    match load_enrich_settings_from(&path) {
        Ok(settings) => settings,
        Err(e) if e.kind() == io::ErrorKind::NotFound => EnrichSettings::default(),
        Err(e) => {
            log::warn!("Ignoring settings file {}: {}", path.display(), e);
            EnrichSettings::default()
        }
    }
}

/// Load `[enrich]` from a specific file.
pub fn load_enrich_settings_from(path: &Path) -> io::Result<EnrichSettings> {
    let contents = std::fs::read_to_string(path)?;
    let file: SettingsFile = toml::from_str(&contents)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(file.enrich)
}

/// Load the full settings file as a pretty-printed TOML string for display.
pub fn load_settings_string() -> Option<String> {
    let contents = std::fs::read_to_string(settings_path()).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    toml::to_string_pretty(&doc).ok()
}
