//! Concurrent enrichment of a batch of rows.
//!
//! A fixed pool of workers pulls rows from a bounded queue and runs each one
//! through the [`RowEnricher`] to completion. A panic or deadline inside one
//! row becomes that row's [`RowFailure`]; it never reaches the worker or the
//! other rows, and there is no run-level abort.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::mpsc;
use tokio::time::Duration;

use songlore_core::{EnrichedRecord, SongRecord};
use songlore_lib::WorkerPool;

use crate::enrich::RowEnricher;
use crate::error::RowFailure;
use crate::log::{EnrichLog, LogEntry};
use crate::lookup::AboutSource;

pub const DEFAULT_WORKERS: usize = 20;

/// Options for an enrichment run.
#[derive(Debug, Clone)]
pub struct EnrichOptions {
    /// Number of concurrent workers
    pub workers: usize,
    /// Per-row deadline. `None` lets a row take as long as its lookups do.
    pub row_timeout: Option<Duration>,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            row_timeout: None,
        }
    }
}

/// Progress events emitted during a run, consumed by the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrichEvent {
    /// Dispatch is starting.
    Started { total: usize, workers: usize },
    /// A row was picked up by a worker.
    RowStarted { index: usize, id: String },
    /// A row produced a record; `matched` if it carries an about-text.
    RowFinished {
        index: usize,
        id: String,
        matched: bool,
    },
    /// A row produced no record.
    RowFailed {
        index: usize,
        id: String,
        reason: String,
    },
    /// All rows processed.
    Done,
}

/// What happened to one input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowOutcome {
    /// Position of the row in the input batch.
    pub index: usize,
    pub id: String,
    pub title: String,
    pub result: Result<EnrichedRecord, RowFailure>,
}

impl RowOutcome {
    pub fn log_entry(&self) -> LogEntry {
        match &self.result {
            Ok(rec) => match (rec.about_source, rec.has_about()) {
                (Some(source), true) => LogEntry::Matched {
                    id: self.id.clone(),
                    title: self.title.clone(),
                    source,
                    topic: rec.topic.clone(),
                },
                _ => LogEntry::Unavailable {
                    id: self.id.clone(),
                    title: self.title.clone(),
                    topic: rec.topic.clone(),
                },
            },
            Err(failure @ (RowFailure::InvalidTitle | RowFailure::MissingLyrics)) => {
                LogEntry::Rejected {
                    id: self.id.clone(),
                    reason: failure.to_string(),
                }
            }
            Err(failure) => LogEntry::Failed {
                id: self.id.clone(),
                message: failure.to_string(),
            },
        }
    }
}

/// Everything a run produced, in input order.
#[derive(Debug)]
pub struct EnrichRun {
    pub outcomes: Vec<RowOutcome>,
    pub log: EnrichLog,
}

impl EnrichRun {
    /// Per-row results, dropping the bookkeeping.
    pub fn into_results(self) -> impl Iterator<Item = Result<EnrichedRecord, RowFailure>> {
        self.outcomes.into_iter().map(|outcome| outcome.result)
    }
}

/// Enrich every row with a fixed pool of workers.
///
/// Every input row yields exactly one [`RowOutcome`]. Results are held in
/// memory until the run finishes.
pub async fn enrich_all<P, S>(
    enricher: Arc<RowEnricher<P, S>>,
    rows: Vec<SongRecord>,
    options: &EnrichOptions,
    events: mpsc::UnboundedSender<EnrichEvent>,
) -> EnrichRun
where
    P: AboutSource + 'static,
    S: AboutSource + 'static,
{
    let total = rows.len();
    let workers = options.workers.max(1);
    let _ = events.send(EnrichEvent::Started { total, workers });

    let row_timeout = options.row_timeout;
    let worker_events = events.clone();
    let items: Vec<(usize, SongRecord)> = rows.into_iter().enumerate().collect();
    let mut pool = WorkerPool::start(workers, items, move |(index, row)| {
        let enricher = enricher.clone();
        let events = worker_events.clone();
        async move { process_row(&enricher, index, row, row_timeout, &events).await }
    });

    let mut outcomes = Vec::with_capacity(total);
    let mut log = EnrichLog::new();
    while let Some(outcome) = pool.recv().await {
        log.add(outcome.log_entry());
        outcomes.push(outcome);
    }
    outcomes.sort_by_key(|outcome| outcome.index);

    let _ = events.send(EnrichEvent::Done);
    EnrichRun { outcomes, log }
}

async fn process_row<P, S>(
    enricher: &RowEnricher<P, S>,
    index: usize,
    row: SongRecord,
    row_timeout: Option<Duration>,
    events: &mpsc::UnboundedSender<EnrichEvent>,
) -> RowOutcome
where
    P: AboutSource,
    S: AboutSource,
{
    let _ = events.send(EnrichEvent::RowStarted {
        index,
        id: row.id.clone(),
    });

    let work = AssertUnwindSafe(enricher.enrich(&row)).catch_unwind();
    let caught = match row_timeout {
        Some(limit) => match tokio::time::timeout(limit, work).await {
            Ok(caught) => caught,
            Err(_) => Ok(Err(RowFailure::TimedOut(limit))),
        },
        None => work.await,
    };
    let result = caught.unwrap_or_else(|payload| Err(RowFailure::Panicked(panic_message(&*payload))));

    let event = match &result {
        Ok(rec) => EnrichEvent::RowFinished {
            index,
            id: row.id.clone(),
            matched: rec.has_about(),
        },
        Err(failure) => {
            if matches!(failure, RowFailure::Panicked(_) | RowFailure::TimedOut(_)) {
                log::error!("Row {}: {}", row.id, failure);
            }
            EnrichEvent::RowFailed {
                index,
                id: row.id.clone(),
                reason: failure.to_string(),
            }
        }
    };
    let _ = events.send(event);

    RowOutcome {
        index,
        id: row.id,
        title: row.title,
        result,
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
#[path = "tests/run_tests.rs"]
mod tests;
