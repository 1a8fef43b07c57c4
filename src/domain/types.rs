//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during collection and filtering
//! - exported to CSV/JSON
//! - handed to the chart front-end without further conversion

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One requested instrument: a display name plus the code that addresses it
/// at the data source.
///
/// Both fields are non-empty; the CLI layer drops malformed entries before a
/// request is ever constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstrumentRequest {
    pub name: String,
    pub code: String,
}

impl InstrumentRequest {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }
}

/// A parsed daily close before it is tagged with an instrument label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyClose {
    pub date: NaiveDate,
    /// Non-negative, finite.
    pub close: f64,
}

/// One tagged record of the merged dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub date: NaiveDate,
    pub close: f64,
    pub instrument: String,
}

/// One instrument's chronologically keyed close prices.
///
/// Keyed by date so that a date repeated across pages overwrites the earlier
/// value (last write wins). Iteration order is date-ascending, which is what
/// the merger relies on for its tie-break guarantee.
#[derive(Debug, Clone)]
pub struct InstrumentSeries {
    pub request: InstrumentRequest,
    pub closes: BTreeMap<NaiveDate, f64>,
}

impl InstrumentSeries {
    pub fn new(request: InstrumentRequest) -> Self {
        Self {
            request,
            closes: BTreeMap::new(),
        }
    }

    /// Insert-or-overwrite by date key.
    pub fn insert(&mut self, close: DailyClose) {
        self.closes.insert(close.date, close.close);
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }
}

/// All instruments' records in one date-ordered dataset.
///
/// Records with equal dates keep the relative order of (a) the instrument's
/// position in the collection sequence, then (b) intra-series date order.
/// A filtered dataset is the same type: an order-preserving subsequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MergedDataset {
    pub records: Vec<PriceRecord>,
}

impl MergedDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct instrument labels in first-appearance order.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for r in &self.records {
            if !labels.contains(&r.instrument.as_str()) {
                labels.push(&r.instrument);
            }
        }
        labels
    }

    /// Minimum and maximum dates present, or `None` for an empty dataset.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.records.iter().map(|r| r.date).min()?;
        let max = self.records.iter().map(|r| r.date).max()?;
        Some((min, max))
    }
}

/// Resolved inclusive date window, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags and interactive prompts (plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub instruments: Vec<InstrumentRequest>,
    /// Raw user-supplied date strings; parsing happens during range
    /// resolution so a typo is reported rather than silently defaulted.
    pub start: Option<String>,
    pub end: Option<String>,
    /// Pages fetched per instrument (collection width, not a correctness
    /// bound): the source truncates history, and the default covers roughly
    /// five months of trading days at ten data rows per page.
    pub pages: u32,

    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

/// Default collection width, matching the source's retention window.
pub const DEFAULT_PAGE_COUNT: u32 = 9;

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn series_insert_overwrites_on_duplicate_date() {
        let mut series = InstrumentSeries::new(InstrumentRequest::new("A", "000001"));
        series.insert(DailyClose {
            date: date(2024, 1, 2),
            close: 70_000.0,
        });
        series.insert(DailyClose {
            date: date(2024, 1, 2),
            close: 71_000.0,
        });

        assert_eq!(series.len(), 1);
        assert_eq!(series.closes[&date(2024, 1, 2)], 71_000.0);
    }

    #[test]
    fn labels_keep_first_appearance_order() {
        let dataset = MergedDataset {
            records: vec![
                PriceRecord {
                    date: date(2024, 1, 2),
                    close: 1.0,
                    instrument: "B".to_string(),
                },
                PriceRecord {
                    date: date(2024, 1, 2),
                    close: 2.0,
                    instrument: "A".to_string(),
                },
                PriceRecord {
                    date: date(2024, 1, 3),
                    close: 3.0,
                    instrument: "B".to_string(),
                },
            ],
        };

        assert_eq!(dataset.labels(), vec!["B", "A"]);
        assert_eq!(dataset.date_span(), Some((date(2024, 1, 2), date(2024, 1, 3))));
    }
}
