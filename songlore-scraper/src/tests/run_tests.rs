use super::*;

use songlore_core::{SourceKind, TopicTable};

use crate::fakes::FakeSource;
use crate::resolver::FallbackResolver;

fn enricher(primary: FakeSource, secondary: FakeSource) -> Arc<RowEnricher<FakeSource, FakeSource>> {
    Arc::new(RowEnricher::new(
        FallbackResolver::new(primary, secondary),
        TopicTable::default(),
    ))
}

fn rows(n: usize) -> Vec<SongRecord> {
    (0..n)
        .map(|i| SongRecord::new(i.to_string(), format!("Song {}", i), "Artist", "lyrics"))
        .collect()
}

fn drain(mut rx: mpsc::UnboundedReceiver<EnrichEvent>) -> Vec<EnrichEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn test_every_row_gets_one_outcome() {
    let enricher = enricher(
        FakeSource::found(SourceKind::Genius, "about love"),
        FakeSource::not_found(SourceKind::LastFm),
    );
    let (tx, rx) = mpsc::unbounded_channel();
    let options = EnrichOptions {
        workers: 4,
        ..Default::default()
    };

    let run = enrich_all(enricher.clone(), rows(25), &options, tx).await;

    assert_eq!(run.outcomes.len(), 25);
    let indices: Vec<usize> = run.outcomes.iter().map(|o| o.index).collect();
    assert_eq!(indices, (0..25).collect::<Vec<_>>());
    assert!(run.outcomes.iter().all(|o| o.result.as_ref().is_ok_and(|r| r.has_about())));
    assert_eq!(run.log.summary().by_genius, 25);
    assert_eq!(enricher.resolver().secondary().calls(), 0);

    let events = drain(rx);
    assert_eq!(events.first(), Some(&EnrichEvent::Started { total: 25, workers: 4 }));
    assert_eq!(events.last(), Some(&EnrichEvent::Done));
    let started = events
        .iter()
        .filter(|e| matches!(e, EnrichEvent::RowStarted { .. }))
        .count();
    let finished = events
        .iter()
        .filter(|e| matches!(e, EnrichEvent::RowFinished { matched: true, .. }))
        .count();
    assert_eq!(started, 25);
    assert_eq!(finished, 25);
}

#[tokio::test]
async fn test_panic_is_contained_to_its_row() {
    let enricher = enricher(
        FakeSource::found(SourceKind::Genius, "about").panicking_on("Song 3"),
        FakeSource::not_found(SourceKind::LastFm),
    );
    let (tx, rx) = mpsc::unbounded_channel();
    let options = EnrichOptions {
        workers: 2,
        ..Default::default()
    };

    let run = enrich_all(enricher, rows(8), &options, tx).await;

    assert_eq!(run.outcomes.len(), 8);
    for outcome in &run.outcomes {
        if outcome.index == 3 {
            match &outcome.result {
                Err(RowFailure::Panicked(msg)) => assert!(msg.contains("Song 3"), "{msg}"),
                other => panic!("expected panic failure, got {other:?}"),
            }
        } else {
            assert!(outcome.result.is_ok(), "row {} failed", outcome.index);
        }
    }
    let summary = run.log.summary();
    assert_eq!(summary.total_failed, 1);
    assert_eq!(summary.total_matched, 7);
    assert!(drain(rx).iter().any(|e| matches!(
        e,
        EnrichEvent::RowFailed { index: 3, .. }
    )));
}

#[tokio::test]
async fn test_row_timeout_becomes_failure() {
    let enricher = enricher(
        FakeSource::found(SourceKind::Genius, "about").with_delay(Duration::from_secs(5)),
        FakeSource::not_found(SourceKind::LastFm),
    );
    let (tx, _rx) = mpsc::unbounded_channel();
    let options = EnrichOptions {
        workers: 3,
        row_timeout: Some(Duration::from_millis(20)),
    };

    let run = enrich_all(enricher, rows(3), &options, tx).await;
    for outcome in &run.outcomes {
        assert_eq!(
            outcome.result,
            Err(RowFailure::TimedOut(Duration::from_millis(20)))
        );
    }
}

#[tokio::test]
async fn test_invalid_rows_are_rejected_not_failed() {
    let enricher = enricher(
        FakeSource::not_found(SourceKind::Genius),
        FakeSource::found(SourceKind::LastFm, "about"),
    );
    let mut input = rows(3);
    input[1].title = "  ".to_string();
    input[2].lyrics = None;
    let (tx, _rx) = mpsc::unbounded_channel();

    let run = enrich_all(enricher.clone(), input, &EnrichOptions::default(), tx).await;

    let summary = run.log.summary();
    assert_eq!(summary.total_rejected, 2);
    assert_eq!(summary.by_lastfm, 1);
    assert_eq!(enricher.resolver().primary().calls(), 1);
    assert_eq!(run.outcomes[1].result, Err(RowFailure::InvalidTitle));
    assert_eq!(run.outcomes[2].result, Err(RowFailure::MissingLyrics));
}

#[tokio::test]
async fn test_empty_batch() {
    let enricher = enricher(
        FakeSource::not_found(SourceKind::Genius),
        FakeSource::not_found(SourceKind::LastFm),
    );
    let (tx, rx) = mpsc::unbounded_channel();
    let run = enrich_all(enricher, Vec::new(), &EnrichOptions::default(), tx).await;

    assert!(run.outcomes.is_empty());
    assert_eq!(
        drain(rx),
        vec![EnrichEvent::Started { total: 0, workers: DEFAULT_WORKERS }, EnrichEvent::Done]
    );
}

#[tokio::test]
async fn test_unavailable_rows_are_logged() {
    let enricher = enricher(
        FakeSource::not_found(SourceKind::Genius),
        FakeSource::not_found(SourceKind::LastFm),
    );
    let (tx, _rx) = mpsc::unbounded_channel();
    let run = enrich_all(enricher, rows(2), &EnrichOptions::default(), tx).await;

    assert_eq!(run.log.summary().total_unavailable, 2);
    assert_eq!(run.into_results().filter(|r| r.is_ok()).count(), 2);
}
