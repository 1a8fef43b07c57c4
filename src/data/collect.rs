//! Per-instrument collection: drive bounded pagination through a fetcher and
//! accumulate accepted rows into a date-keyed series.

use crate::data::fetch::PageFetcher;
use crate::data::parse::parse_row;
use crate::domain::{InstrumentRequest, InstrumentSeries};
use crate::error::AppError;

/// Collection output: the series plus row-level accounting for the run
/// summary. Rejected rows are counted, never reported individually.
#[derive(Debug, Clone)]
pub struct Collection {
    pub series: InstrumentSeries,
    pub rows_seen: usize,
    pub rows_rejected: usize,
}

/// Fetch pages `1..=pages` for one instrument and accumulate valid records.
///
/// Pagination always runs through all `pages` requests: a page with zero valid
/// rows is an expected layout artifact, not an end-of-data signal. Duplicate
/// dates across pages overwrite (last write wins). A fetcher failure is fatal
/// for the whole collection run; there is no partial-result recovery here.
pub fn collect_series(
    request: &InstrumentRequest,
    fetcher: &mut dyn PageFetcher,
    pages: u32,
) -> Result<Collection, AppError> {
    let mut out = Collection {
        series: InstrumentSeries::new(request.clone()),
        rows_seen: 0,
        rows_rejected: 0,
    };

    for page in 1..=pages {
        let rows = fetcher.fetch_page(&request.code, page)?;
        for row in &rows {
            out.rows_seen += 1;
            match parse_row(row) {
                Ok(close) => out.series.insert(close),
                Err(_) => out.rows_rejected += 1,
            }
        }
    }

    Ok(out)
}
