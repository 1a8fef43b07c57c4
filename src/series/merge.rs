//! Merge per-instrument series into one globally date-ordered dataset.

use crate::domain::{InstrumentSeries, MergedDataset, PriceRecord};

/// Concatenate all series in input order, tag each record with its owning
/// instrument's display name, and sort by date ascending.
///
/// The sort is stable and keyed solely on date, so records on the same date
/// keep the relative order of (instrument position, then intra-series date
/// order). Purely structural; prices pass through untouched.
pub fn merge_series(series_list: &[InstrumentSeries]) -> MergedDataset {
    let mut records: Vec<PriceRecord> = Vec::new();
    for series in series_list {
        for (&date, &close) in &series.closes {
            records.push(PriceRecord {
                date,
                close,
                instrument: series.request.name.clone(),
            });
        }
    }

    records.sort_by_key(|r| r.date);

    MergedDataset { records }
}
