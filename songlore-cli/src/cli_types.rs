//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "songlore")]
#[command(about = "Enrich song lyrics datasets with about-texts and topics", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Topic table selection shared by every command that classifies.
#[derive(Args, Clone)]
pub(crate) struct TopicArgs {
    /// TOML file of [[topic]] rules replacing the built-in table
    #[arg(long)]
    pub topics: Option<PathBuf>,
}

#[derive(Args)]
pub(crate) struct EnrichArgs {
    /// Input CSV with id, title, tag, artist and lyrics columns
    pub input: PathBuf,

    /// Output CSV (default: matched_songs_with_about.csv)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Read at most this many data rows from the input
    #[arg(long)]
    pub max_rows: Option<usize>,

    /// Number of rows to sample for enrichment
    #[arg(long)]
    pub sample: Option<usize>,

    /// Seed for the sampling RNG
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of concurrent workers
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Give up on a row after this many seconds
    #[arg(long)]
    pub row_timeout: Option<u64>,

    #[command(flatten)]
    pub topics: TopicArgs,

    /// Disable the enrichment log file
    #[arg(long)]
    pub no_log: bool,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Look up about-texts for a sample of songs and write the matches
    Enrich(EnrichArgs),

    /// Print the topic for a piece of text
    Classify {
        /// Text to classify (multiple words are joined with spaces)
        #[arg(required = true)]
        text: Vec<String>,

        #[command(flatten)]
        topics: TopicArgs,
    },

    /// List the active topic table in precedence order
    Topics {
        #[command(flatten)]
        topics: TopicArgs,
    },

    /// Manage Genius and Last.fm credentials
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show current credentials and their sources
    Show,

    /// Interactively set up credentials
    Setup,

    /// Print the config file path
    Path,
}
