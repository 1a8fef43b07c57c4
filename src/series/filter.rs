//! Date-range resolution and filtering of the merged dataset.
//!
//! Defaulting rules: an absent start falls back to the oldest collected date;
//! an absent end falls back to the caller's "today" (a live clock read in the
//! pipeline, a fixed date in tests). A supplied-but-unparsable date is fatal
//! rather than silently defaulted, since a default could mask a user typo.

use chrono::NaiveDate;

use crate::domain::{DateRange, MergedDataset};
use crate::error::{AppError, ErrorCode};

/// Resolve the requested window against the dataset.
pub fn resolve_range(
    dataset: &MergedDataset,
    requested_start: Option<&str>,
    requested_end: Option<&str>,
    today: NaiveDate,
) -> Result<DateRange, AppError> {
    let start = match requested_start {
        Some(raw) => parse_input_date(raw, "start")?,
        None => {
            dataset
                .date_span()
                .map(|(min, _)| min)
                .ok_or_else(|| {
                    AppError::new(
                        ErrorCode::NoDataAvailable,
                        "No records were collected, so no default start date exists.",
                    )
                })?
        }
    };

    let end = match requested_end {
        Some(raw) => parse_input_date(raw, "end")?,
        None => today,
    };

    if start > end {
        return Err(AppError::new(
            ErrorCode::InvertedRange,
            format!("Start date {start} is after end date {end}."),
        ));
    }

    Ok(DateRange { start, end })
}

/// Keep every record with `start <= date <= end`, preserving order.
/// Idempotent: re-filtering with the same range is a no-op.
pub fn apply_range(dataset: &MergedDataset, range: DateRange) -> MergedDataset {
    MergedDataset {
        records: dataset
            .records
            .iter()
            .filter(|r| range.start <= r.date && r.date <= range.end)
            .cloned()
            .collect(),
    }
}

fn parse_input_date(raw: &str, which: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::new(
            ErrorCode::InvalidDateInput,
            format!("Invalid {which} date '{raw}' (expected YYYY-MM-DD)."),
        )
    })
}
