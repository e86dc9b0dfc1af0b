//! Song dataset CSV ingestion, seeded sampling, and enriched output.
//!
//! The input needs at least the columns in [`REQUIRED_COLUMNS`]; any other
//! columns are ignored. Output carries the same columns plus
//! `about_section` and `topic`.

use std::io::{Read, Write};
use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use songlore_core::{EnrichedRecord, OutputRow, SongRecord};

use crate::error::DatasetError;

/// Columns the input file must provide.
pub const REQUIRED_COLUMNS: &[&str] = &["id", "title", "tag", "artist", "lyrics"];

/// Rows read from the head of the input by default.
pub const DEFAULT_MAX_ROWS: usize = 500_000;

/// Rows drawn from those by default.
pub const DEFAULT_SAMPLE_SIZE: usize = 150_000;

/// Seed used for sampling unless overridden.
pub const DEFAULT_SEED: u64 = 1;

/// Outcome of reading the head of a dataset.
#[derive(Debug, Default)]
pub struct ReadSummary {
    pub records: Vec<SongRecord>,
    /// Rows the CSV layer could not decode; logged and skipped.
    pub skipped: usize,
}

/// Read up to `max_rows` data rows from a CSV file.
pub fn read_records(path: &Path, max_rows: usize) -> Result<ReadSummary, DatasetError> {
    let file = std::fs::File::open(path)?;
    read_records_from(file, max_rows)
}

/// Read up to `max_rows` data rows from any reader.
///
/// Malformed rows count towards `max_rows` (they occupy a line of the
/// input) but are skipped with a warning.
pub fn read_records_from<R: Read>(reader: R, max_rows: usize) -> Result<ReadSummary, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h.trim() == *column) {
            return Err(DatasetError::missing_column(*column));
        }
    }

    let mut summary = ReadSummary::default();
    for (line, result) in reader.deserialize::<SongRecord>().take(max_rows).enumerate() {
        match result {
            Ok(record) => summary.records.push(record),
            Err(e) => {
                log::warn!("Skipping malformed dataset row {}: {e}", line + 1);
                summary.skipped += 1;
            }
        }
    }

    Ok(summary)
}

/// Draw `size` records uniformly at random with a seeded RNG.
///
/// The same `(records, size, seed)` always yields the same sample. Input
/// order is preserved and no record is picked twice. When the dataset is
/// not larger than `size`, every record is returned.
pub fn sample(records: Vec<SongRecord>, size: usize, seed: u64) -> Vec<SongRecord> {
    let len = records.len();
    if size >= len {
        return records;
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut keep = vec![false; len];
    for index in rand::seq::index::sample(&mut rng, len, size) {
        keep[index] = true;
    }

    records
        .into_iter()
        .zip(keep)
        .filter_map(|(record, kept)| kept.then_some(record))
        .collect()
}

/// Write enriched records to a CSV file, returning the number of rows written.
pub fn write_enriched(path: &Path, records: &[EnrichedRecord]) -> Result<usize, DatasetError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    write_enriched_to(file, records)
}

/// Write enriched records as CSV to any writer.
pub fn write_enriched_to<W: Write>(writer: W, records: &[EnrichedRecord]) -> Result<usize, DatasetError> {
    let mut writer = csv::Writer::from_writer(writer);
    if records.is_empty() {
        // serde-driven headers are only emitted with the first row
        writer.write_record(REQUIRED_COLUMNS.iter().chain(&["about_section", "topic"]))?;
    }
    for record in records {
        writer.serialize(OutputRow::from(record))?;
    }
    writer.flush()?;
    Ok(records.len())
}

#[cfg(test)]
#[path = "tests/dataset_tests.rs"]
mod tests;
