//! Shared collection pipeline used by both the chart and dump front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! collect (per instrument, paginated) -> merge -> resolve range -> filter
//!
//! The front-ends then focus on presentation (widgets vs printing).

use chrono::{Local, NaiveDate};

use crate::data::{NaverSession, PageFetcher, collect_series};
use crate::domain::{DateRange, InstrumentSeries, MergedDataset, RunConfig};
use crate::error::{AppError, ErrorCode};
use crate::series::{apply_range, merge_series, resolve_range};

/// Row-level accounting for one instrument, carried into the run summary.
#[derive(Debug, Clone)]
pub struct InstrumentStats {
    pub name: String,
    pub code: String,
    pub records: usize,
    pub rows_seen: usize,
    pub rows_rejected: usize,
}

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub merged: MergedDataset,
    pub filtered: MergedDataset,
    pub range: DateRange,
    pub stats: Vec<InstrumentStats>,
}

/// Execute the full pipeline against the live data source.
///
/// The fetch session is opened here, before any collection begins, and is
/// dropped when this function returns (on success and on error), which is the
/// one-open/one-close lifecycle the session requires.
pub fn run_collect(config: &RunConfig) -> Result<RunOutput, AppError> {
    let mut session = NaverSession::from_env()?;
    run_with_fetcher(config, &mut session, Local::now().date_naive())
}

/// Execute the pipeline with an injected fetcher and clock.
///
/// This is the seam tests use: a fake fetcher and a fixed "today".
pub fn run_with_fetcher(
    config: &RunConfig,
    fetcher: &mut dyn PageFetcher,
    today: NaiveDate,
) -> Result<RunOutput, AppError> {
    if config.instruments.is_empty() {
        return Err(AppError::new(
            ErrorCode::NoValidInstruments,
            "No valid instruments configured; nothing to collect.",
        ));
    }

    // Strictly sequential: the fetcher is one exclusive session, so only one
    // navigation may be in flight at a time.
    let mut all: Vec<InstrumentSeries> = Vec::with_capacity(config.instruments.len());
    let mut stats = Vec::with_capacity(config.instruments.len());
    for request in &config.instruments {
        let collected = collect_series(request, fetcher, config.pages)?;
        stats.push(InstrumentStats {
            name: request.name.clone(),
            code: request.code.clone(),
            records: collected.series.len(),
            rows_seen: collected.rows_seen,
            rows_rejected: collected.rows_rejected,
        });
        all.push(collected.series);
    }

    let merged = merge_series(&all);
    let range = resolve_range(&merged, config.start.as_deref(), config.end.as_deref(), today)?;
    let filtered = apply_range(&merged, range);

    Ok(RunOutput {
        merged,
        filtered,
        range,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RawRow;
    use crate::data::parse::MIN_CELLS;
    use crate::domain::InstrumentRequest;

    fn data_row(date: &str, close: &str) -> RawRow {
        let mut cells = vec![date.to_string(), close.to_string()];
        cells.extend(std::iter::repeat_n("0".to_string(), MIN_CELLS - 2));
        cells
    }

    /// One canned page per instrument code.
    struct PerCodeFetcher;

    impl PageFetcher for PerCodeFetcher {
        fn fetch_page(&mut self, code: &str, page: u32) -> Result<Vec<RawRow>, AppError> {
            if page > 1 {
                return Ok(Vec::new());
            }
            Ok(match code {
                "A1" => vec![data_row("2024.01.02", "100"), data_row("2024.01.03", "101")],
                _ => vec![data_row("2024.01.02", "200"), data_row("2024.01.04", "201")],
            })
        }
    }

    fn config() -> RunConfig {
        RunConfig {
            instruments: vec![
                InstrumentRequest::new("A", "A1"),
                InstrumentRequest::new("B", "B1"),
            ],
            start: None,
            end: None,
            pages: 2,
            export_csv: None,
            export_json: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn pipeline_merges_and_filters_across_instruments() {
        let run = run_with_fetcher(&config(), &mut PerCodeFetcher, today()).unwrap();

        let order: Vec<&str> = run.filtered.records.iter().map(|r| r.instrument.as_str()).collect();
        assert_eq!(order, vec!["A", "B", "A", "B"]);
        assert_eq!(run.range.start, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(run.range.end, today());
        assert_eq!(run.filtered.labels(), vec!["A", "B"]);
        assert_eq!(run.stats.len(), 2);
        assert_eq!(run.stats[0].records, 2);
    }

    #[test]
    fn empty_instrument_list_is_fatal_before_any_fetch() {
        let mut cfg = config();
        cfg.instruments.clear();
        let err = run_with_fetcher(&cfg, &mut PerCodeFetcher, today()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::NoValidInstruments);
    }

    #[test]
    fn explicit_window_restricts_the_output() {
        let mut cfg = config();
        cfg.start = Some("2024-01-03".to_string());
        cfg.end = Some("2024-01-04".to_string());

        let run = run_with_fetcher(&cfg, &mut PerCodeFetcher, today()).unwrap();
        assert_eq!(run.merged.len(), 4);
        assert_eq!(run.filtered.len(), 2);
    }
}
