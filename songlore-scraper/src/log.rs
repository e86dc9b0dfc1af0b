use std::path::Path;

use songlore_core::SourceKind;

/// A single entry in the enrichment log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    Matched {
        id: String,
        title: String,
        source: SourceKind,
        topic: String,
    },
    Unavailable {
        id: String,
        title: String,
        topic: String,
    },
    Rejected {
        id: String,
        reason: String,
    },
    Failed {
        id: String,
        message: String,
    },
}

/// Collects per-row outcomes and writes a log file.
#[derive(Debug, Default)]
pub struct EnrichLog {
    entries: Vec<LogEntry>,
}

impl EnrichLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn summary(&self) -> LogSummary {
        let mut summary = LogSummary::default();
        for entry in &self.entries {
            match entry {
                LogEntry::Matched { source, .. } => {
                    summary.total_matched += 1;
                    match source {
                        SourceKind::Genius => summary.by_genius += 1,
                        SourceKind::LastFm => summary.by_lastfm += 1,
                    }
                }
                LogEntry::Unavailable { .. } => summary.total_unavailable += 1,
                LogEntry::Rejected { .. } => summary.total_rejected += 1,
                LogEntry::Failed { .. } => summary.total_failed += 1,
            }
        }
        summary
    }

    /// Write the log to a file.
    pub fn write_to_file(&self, path: &Path) -> std::io::Result<()> {
        use std::io::Write;

        let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
        let summary = self.summary();

        writeln!(file, "=== Enrichment Log ===")?;
        writeln!(
            file,
            "Date: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(file)?;
        writeln!(file, "--- Summary ---")?;
        writeln!(file, "Rows processed: {}", summary.total())?;
        writeln!(
            file,
            "Matched: {} (genius: {}, lastfm: {})",
            summary.total_matched, summary.by_genius, summary.by_lastfm
        )?;
        writeln!(file, "Unavailable: {}", summary.total_unavailable)?;
        writeln!(file, "Rejected: {}", summary.total_rejected)?;
        writeln!(file, "Failed: {}", summary.total_failed)?;
        writeln!(file)?;
        writeln!(file, "--- Details ---")?;
        writeln!(file)?;

        for entry in &self.entries {
            match entry {
                LogEntry::Matched {
                    id,
                    title,
                    source,
                    topic,
                } => {
                    writeln!(
                        file,
                        "[OK] {} \"{}\" (about from {}, topic {})",
                        id,
                        title,
                        source.display_name(),
                        topic
                    )?;
                }
                LogEntry::Unavailable { id, title, topic } => {
                    writeln!(file, "[NO ABOUT] {} \"{}\" (topic {})", id, title, topic)?;
                }
                LogEntry::Rejected { id, reason } => {
                    writeln!(file, "[REJECTED] {}: {}", id, reason)?;
                }
                LogEntry::Failed { id, message } => {
                    writeln!(file, "[ERROR] {}: {}", id, message)?;
                }
            }
        }

        file.flush()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LogSummary {
    pub total_matched: usize,
    pub total_unavailable: usize,
    pub total_rejected: usize,
    pub total_failed: usize,
    pub by_genius: usize,
    pub by_lastfm: usize,
}

impl LogSummary {
    pub fn total(&self) -> usize {
        self.total_matched + self.total_unavailable + self.total_rejected + self.total_failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_log() -> EnrichLog {
        let mut log = EnrichLog::new();
        log.add(LogEntry::Matched {
            id: "1".to_string(),
            title: "Love Song".to_string(),
            source: SourceKind::Genius,
            topic: "love".to_string(),
        });
        log.add(LogEntry::Matched {
            id: "2".to_string(),
            title: "War Song".to_string(),
            source: SourceKind::LastFm,
            topic: "war".to_string(),
        });
        log.add(LogEntry::Unavailable {
            id: "3".to_string(),
            title: "Obscure".to_string(),
            topic: "other".to_string(),
        });
        log.add(LogEntry::Rejected {
            id: "4".to_string(),
            reason: "invalid song title".to_string(),
        });
        log.add(LogEntry::Failed {
            id: "5".to_string(),
            message: "row processing panicked: boom".to_string(),
        });
        log
    }

    #[test]
    fn test_summary_counts() {
        let summary = sample_log().summary();
        assert_eq!(summary.total_matched, 2);
        assert_eq!(summary.by_genius, 1);
        assert_eq!(summary.by_lastfm, 1);
        assert_eq!(summary.total_unavailable, 1);
        assert_eq!(summary.total_rejected, 1);
        assert_eq!(summary.total_failed, 1);
        assert_eq!(summary.total(), 5);
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("enrich.log");
        sample_log().write_to_file(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("=== Enrichment Log ==="));
        assert!(text.contains("Matched: 2 (genius: 1, lastfm: 1)"));
        assert!(text.contains("[OK] 1 \"Love Song\" (about from Genius, topic love)"));
        assert!(text.contains("[NO ABOUT] 3 \"Obscure\" (topic other)"));
        assert!(text.contains("[REJECTED] 4: invalid song title"));
        assert!(text.contains("[ERROR] 5: row processing panicked: boom"));
    }
}
