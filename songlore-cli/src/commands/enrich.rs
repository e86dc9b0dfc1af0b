use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use tokio::time::Duration;

use songlore_lib::dataset::{DEFAULT_MAX_ROWS, DEFAULT_SAMPLE_SIZE, DEFAULT_SEED};
use songlore_lib::{EnrichSettings, async_util::run_with_events};
use songlore_scraper::run::DEFAULT_WORKERS;
use songlore_scraper::{
    Credentials, EnrichEvent, EnrichOptions, LogEntry, SourceConfig, audit_missing_about,
    create_enricher, enrich_all, filter_matches,
};

use crate::cli_types::EnrichArgs;
use crate::commands::topics::load_topic_table;
use crate::error::CliError;
use crate::progress::RunProgress;

const DEFAULT_OUTPUT: &str = "matched_songs_with_about.csv";

/// Per-run parameters after merging flags, the settings file and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RunParams {
    max_rows: usize,
    sample_size: usize,
    seed: u64,
    workers: usize,
    row_timeout: Option<Duration>,
    topics: Option<PathBuf>,
}

impl RunParams {
    fn resolve(args: &EnrichArgs, settings: &EnrichSettings) -> Self {
        Self {
            max_rows: args.max_rows.or(settings.max_rows).unwrap_or(DEFAULT_MAX_ROWS),
            sample_size: args
                .sample
                .or(settings.sample_size)
                .unwrap_or(DEFAULT_SAMPLE_SIZE),
            seed: args.seed.or(settings.seed).unwrap_or(DEFAULT_SEED),
            workers: args
                .workers
                .or(settings.workers)
                .unwrap_or(DEFAULT_WORKERS)
                .max(1),
            row_timeout: args
                .row_timeout
                .or(settings.row_timeout_secs)
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            topics: args.topics.topics.clone().or_else(|| settings.topics.clone()),
        }
    }
}

/// Run the enrich command.
pub(crate) fn run_enrich(args: EnrichArgs, quiet: bool) -> Result<(), CliError> {
    let settings = songlore_lib::settings::load_enrich_settings();
    let params = RunParams::resolve(&args, &settings);
    let output = args.output.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    let topics = load_topic_table(params.topics.as_deref())?;

    let credentials = Credentials::load();
    for var in credentials.missing() {
        log::warn!(
            "{} {} is not set; lookups against that source will fail",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            var,
        );
    }

    log::info!(
        "Enriching songs from: {}",
        args.input.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    let read = songlore_lib::read_records(&args.input, params.max_rows)?;
    log::info!(
        "{}",
        format!(
            "Read {} rows (limit {}, skipped {} malformed)",
            read.records.len(),
            params.max_rows,
            read.skipped
        )
        .if_supports_color(Stdout, |t| t.dimmed()),
    );

    let rows = songlore_lib::sample(read.records, params.sample_size, params.seed);
    log::info!(
        "{}",
        format!(
            "Sampled {} rows (seed {}), {} workers",
            rows.len(),
            params.seed,
            params.workers
        )
        .if_supports_color(Stdout, |t| t.dimmed()),
    );
    log::info!("");

    let config = SourceConfig::new(credentials);
    let enricher = Arc::new(create_enricher(&config, topics)?);
    let options = EnrichOptions {
        workers: params.workers,
        row_timeout: params.row_timeout,
    };

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {}", e)))?;

    let mut progress = RunProgress::new(quiet);
    let run = rt.block_on(async {
        let (event_tx, event_rx) = tokio::sync::mpsc::unbounded_channel::<EnrichEvent>();
        run_with_events(
            enrich_all(enricher, rows, &options, event_tx),
            event_rx,
            |e| progress.handle(e),
        )
        .await
    });
    progress.finish();

    let summary = run.log.summary();
    print_problems(&args.input, run.log.entries());

    if !args.no_log {
        let log_path = log_path_for(&output);
        if let Err(e) = run.log.write_to_file(&log_path) {
            log::warn!("Warning: could not write enrichment log: {}", e);
        } else {
            log::debug!("Enrichment log written to {}", log_path.display());
        }
    }

    let matches = filter_matches(run.into_results());
    audit_missing_about(&matches);
    let written = songlore_lib::write_enriched(&output, &matches)?;

    log::info!("{}", "Summary:".if_supports_color(Stdout, |t| t.bold()));
    log::info!(
        "  {} {} rows matched (genius: {}, lastfm: {})",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        summary.total_matched,
        summary.by_genius,
        summary.by_lastfm,
    );
    if summary.total_unavailable > 0 {
        log::info!(
            "  {} {} rows without an about-text",
            "?".if_supports_color(Stdout, |t| t.yellow()),
            summary.total_unavailable,
        );
    }
    if summary.total_rejected > 0 {
        log::info!(
            "  {} {} rows rejected",
            "~".if_supports_color(Stdout, |t| t.yellow()),
            summary.total_rejected,
        );
    }
    if summary.total_failed > 0 {
        log::warn!(
            "  {} {} rows failed",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            summary.total_failed,
        );
    }
    log::info!(
        "  {} {} rows written to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        written,
        output.display().if_supports_color(Stdout, |t| t.cyan()),
    );

    Ok(())
}

/// Failed rows are worth a line each; rejected ones only in debug output.
fn print_problems(input: &Path, entries: &[LogEntry]) {
    let quiet = log::max_level() < LevelFilter::Info;
    for (level, line) in problem_lines(input, entries, quiet) {
        log::log!(level, "{}", line);
    }
}

/// Report lines for failed and rejected rows, in log order.
///
/// With `header` set and at least one failure, the input path leads so
/// quiet runs still name the file the failures belong to.
fn problem_lines(input: &Path, entries: &[LogEntry], header: bool) -> Vec<(Level, String)> {
    let mut lines = Vec::new();
    if header && entries.iter().any(|e| matches!(e, LogEntry::Failed { .. })) {
        lines.push((Level::Warn, format!("{}:", input.display())));
    }
    for entry in entries {
        match entry {
            LogEntry::Failed { id, message } => {
                lines.push((Level::Warn, format!("  {} row {}: {}", "\u{2718}", id, message)));
            }
            LogEntry::Rejected { id, reason } => {
                lines.push((Level::Debug, format!("  ~ row {}: {}", id, reason)));
            }
            _ => {}
        }
    }
    lines
}

/// `out/songs.csv` gets its log at `out/songs.log`.
fn log_path_for(output: &Path) -> PathBuf {
    output.with_extension("log")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli_types::TopicArgs;

    fn args() -> EnrichArgs {
        EnrichArgs {
            input: PathBuf::from("songs.csv"),
            output: None,
            max_rows: None,
            sample: None,
            seed: None,
            workers: None,
            row_timeout: None,
            topics: TopicArgs { topics: None },
            no_log: false,
        }
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let params = RunParams::resolve(&args(), &EnrichSettings::default());
        assert_eq!(
            params,
            RunParams {
                max_rows: 500_000,
                sample_size: 150_000,
                seed: 1,
                workers: 20,
                row_timeout: None,
                topics: None,
            }
        );
    }

    #[test]
    fn test_flags_beat_settings() {
        let settings = EnrichSettings {
            workers: Some(8),
            seed: Some(42),
            row_timeout_secs: Some(30),
            topics: Some(PathBuf::from("settings-topics.toml")),
            ..Default::default()
        };
        let mut args = args();
        args.workers = Some(4);
        args.topics.topics = Some(PathBuf::from("flag-topics.toml"));

        let params = RunParams::resolve(&args, &settings);
        assert_eq!(params.workers, 4);
        assert_eq!(params.seed, 42);
        assert_eq!(params.row_timeout, Some(Duration::from_secs(30)));
        assert_eq!(params.topics, Some(PathBuf::from("flag-topics.toml")));
    }

    #[test]
    fn test_zero_workers_and_timeout_are_clamped() {
        let mut args = args();
        args.workers = Some(0);
        args.row_timeout = Some(0);
        let params = RunParams::resolve(&args, &EnrichSettings::default());
        assert_eq!(params.workers, 1);
        assert_eq!(params.row_timeout, None);
    }

    #[test]
    fn test_log_path_sits_next_to_output() {
        assert_eq!(
            log_path_for(Path::new("out/songs.csv")),
            PathBuf::from("out/songs.log")
        );
    }

    fn problem_entries() -> Vec<LogEntry> {
        vec![
            LogEntry::Rejected {
                id: "1".to_string(),
                reason: "invalid song title".to_string(),
            },
            LogEntry::Failed {
                id: "2".to_string(),
                message: "row processing panicked: boom".to_string(),
            },
        ]
    }

    #[test]
    fn test_quiet_header_precedes_failed_rows() {
        let lines = problem_lines(Path::new("songs.csv"), &problem_entries(), true);
        assert_eq!(lines[0], (Level::Warn, "songs.csv:".to_string()));
        assert_eq!(lines[1].0, Level::Debug);
        assert_eq!(lines[2].0, Level::Warn);
        assert!(lines[2].1.contains("row 2: row processing panicked: boom"));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_no_header_without_failures_or_when_verbose() {
        let rejected_only = &problem_entries()[..1];
        assert_eq!(problem_lines(Path::new("songs.csv"), rejected_only, true).len(), 1);

        let lines = problem_lines(Path::new("songs.csv"), &problem_entries(), false);
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|(_, line)| line != "songs.csv:"));
    }
}
