use std::io::Write;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use songlore_scraper::credentials::{DOTENV_FILE, GENIUS_ENV, LASTFM_ENV, mask_value};
use songlore_scraper::{CredentialSource, Credentials};

use crate::error::CliError;

/// Show current credentials and their sources.
pub(crate) fn run_config_show() {
    let path = songlore_scraper::config_path();
    let sources = songlore_scraper::credential_sources();
    let creds = Credentials::load();

    log::info!(
        "{}",
        "Source Credentials".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    let status = if path.exists() {
        "(exists)".if_supports_color(Stdout, |t| t.green()).to_string()
    } else {
        "(not found)".if_supports_color(Stdout, |t| t.dimmed()).to_string()
    };
    log::info!(
        "  Config file: {} {}",
        path.display().if_supports_color(Stdout, |t| t.cyan()),
        status,
    );
    log::info!("");

    let fields: [(&str, &CredentialSource, Option<String>); 2] = [
        (
            "genius token",
            &sources.genius_token,
            creds.genius_token.as_deref().map(mask_value),
        ),
        (
            "lastfm api_key",
            &sources.lastfm_api_key,
            creds.lastfm_api_key.as_deref().map(mask_value),
        ),
    ];

    for (name, source, value) in fields {
        let source_str = format!("({})", source);
        match value {
            Some(v) => {
                log::info!(
                    "  {} {} {}",
                    format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
                    v,
                    source_str.if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
            None => {
                log::info!(
                    "  {} {} {}",
                    format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
                    "not set".if_supports_color(Stdout, |t| t.yellow()),
                    source_str.if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
        }
    }

    log::info!("");
    log::info!(
        "{}",
        format!(
            "Environment variables {} and {} (or a {} file) override the config file.",
            GENIUS_ENV, LASTFM_ENV, DOTENV_FILE
        )
        .if_supports_color(Stdout, |t| t.dimmed()),
    );

    log::info!("");
    log::info!(
        "  Settings file: {}",
        songlore_lib::settings::settings_path()
            .display()
            .if_supports_color(Stdout, |t| t.cyan()),
    );
    if let Some(settings) = songlore_lib::settings::load_settings_string() {
        for line in settings.lines() {
            log::info!("    {}", line);
        }
    }
}

/// Interactively set up credentials.
pub(crate) fn run_config_setup() -> Result<(), CliError> {
    println!(
        "{}",
        "Credential Setup".if_supports_color(Stdout, |t| t.bold()),
    );
    println!(
        "  {}",
        "Press Enter to keep the current value.".if_supports_color(Stdout, |t| t.dimmed()),
    );
    println!();

    let existing = Credentials::load();

    let read_line = |prompt: &str, current: Option<&str>| -> Result<Option<String>, CliError> {
        match current {
            Some(value) => print!("  {} [{}]: ", prompt, mask_value(value)),
            None => print!("  {}: ", prompt),
        }
        std::io::stdout().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;
        let trimmed = input.trim();
        if trimmed.is_empty() {
            Ok(current.map(str::to_string))
        } else {
            Ok(Some(trimmed.to_string()))
        }
    };

    let genius_token = read_line("Genius API token", existing.genius_token.as_deref())?;
    let lastfm_api_key = read_line("Last.fm API key", existing.lastfm_api_key.as_deref())?;

    let creds = Credentials {
        genius_token,
        lastfm_api_key,
    };

    let path = songlore_scraper::save_to_file(&creds)?;
    println!();
    println!(
        "{} Credentials saved to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}

/// Print the config file path.
pub(crate) fn run_config_path() {
    log::info!("{}", songlore_scraper::config_path().display());
}
