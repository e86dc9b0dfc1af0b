use songlore_core::EnrichedRecord;

use crate::error::RowFailure;

/// Keep the records that carry a usable about-text, in input order.
///
/// Failed rows and rows that resolved to nothing are dropped.
pub fn filter_matches<I>(results: I) -> Vec<EnrichedRecord>
where
    I: IntoIterator<Item = Result<EnrichedRecord, RowFailure>>,
{
    results
        .into_iter()
        .filter_map(Result::ok)
        .filter(EnrichedRecord::has_about)
        .collect()
}

/// Log every record that lacks an about-text and return how many there were.
///
/// Run after [`filter_matches`] this should always find nothing; a non-zero
/// count is a defect worth reporting, not a reason to stop.
pub fn audit_missing_about(records: &[EnrichedRecord]) -> usize {
    let mut missing = 0;
    for rec in records.iter().filter(|rec| !rec.has_about()) {
        log::error!("Row {} ('{}') has no about-text after filtering", rec.id(), rec.record.title);
        missing += 1;
    }
    missing
}
