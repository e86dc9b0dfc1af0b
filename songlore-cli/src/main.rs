//! songlore CLI
//!
//! Command-line interface for enriching song lyrics datasets with
//! about-texts from Genius and Last.fm.

mod cli_types;
mod commands;
mod error;
mod progress;

use std::io::Write;

use clap::Parser;
use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cli_types::{Cli, Commands, ConfigAction};
use error::CliError;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    if let Err(e) = run(cli) {
        log::error!(
            "{} {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            e,
        );
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Enrich(args) => commands::enrich::run_enrich(args, cli.quiet),
        Commands::Classify { text, topics } => {
            commands::topics::run_classify(&text, topics.topics.as_deref())
        }
        Commands::Topics { topics } => commands::topics::run_topics(topics.topics.as_deref()),
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                commands::config::run_config_show();
                Ok(())
            }
            ConfigAction::Setup => commands::config::run_config_setup(),
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
        },
    }
}

/// Install the global logger.
///
/// Normal output goes through `log::info!` as plain lines on stdout. Library
/// warnings and errors get a level prefix; the CLI's own already carry a
/// symbol. `-q` keeps warnings and errors only; `-v` adds debug messages
/// with timestamps and targets. `RUST_LOG` overrides both.
fn init_logging(quiet: bool, verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stdout);

    if verbose {
        builder.format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}: {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        });
    } else {
        builder.format(|buf, record| {
            let own = record.target() == "songlore" || record.target().starts_with("songlore::");
            if own || record.level() > Level::Warn {
                writeln!(buf, "{}", record.args())
            } else {
                writeln!(
                    buf,
                    "{}: {}",
                    record.level().as_str().to_lowercase(),
                    record.args()
                )
            }
        });
    }

    builder.init();
}
