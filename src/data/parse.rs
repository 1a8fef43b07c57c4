//! Row-level parsing: one raw table row -> one typed daily close.
//!
//! Rejection is a typed result rather than an exception-style skip so the
//! decision is inspectable and testable independent of the collection loop.
//! Rejections are absorbed (and counted) by the collector; nothing at this
//! layer logs or aborts.

use chrono::NaiveDate;

use crate::data::fetch::RawRow;
use crate::domain::DailyClose;

/// Data rows on a quote page carry seven cells (date, close, change, open,
/// high, low, volume); anything shorter is a header/separator artifact.
pub const MIN_CELLS: usize = 7;

/// Why a row was not turned into a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowReject {
    /// Fewer than `MIN_CELLS` cells: not a data row at all.
    StructuralMismatch,
    /// The date cell is empty after trimming.
    EmptyDate,
    /// The date cell does not parse as a calendar date.
    BadDate,
    /// The close cell does not parse as a non-negative finite number.
    BadPrice,
}

/// Parse one raw row. Pure function of its input.
pub fn parse_row(row: &RawRow) -> Result<DailyClose, RowReject> {
    if row.len() < MIN_CELLS {
        return Err(RowReject::StructuralMismatch);
    }

    let date_text = row[0].trim();
    if date_text.is_empty() {
        return Err(RowReject::EmptyDate);
    }
    let date = parse_trade_date(date_text).ok_or(RowReject::BadDate)?;

    // The source renders prices with thousand separators ("70,500").
    let price_text: String = row[1].trim().replace(',', "");
    let close = price_text.parse::<f64>().map_err(|_| RowReject::BadPrice)?;
    if !close.is_finite() || close < 0.0 {
        return Err(RowReject::BadPrice);
    }

    Ok(DailyClose { date, close })
}

/// The source renders dates as `2025.07.28`; ISO `2025-07-28` is accepted too
/// so fixtures don't have to mimic the site's formatting.
fn parse_trade_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y.%m.%d")
        .or_else(|_| NaiveDate::parse_from_str(text, "%Y-%m-%d"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, close: &str) -> RawRow {
        let mut cells = vec![date.to_string(), close.to_string()];
        cells.extend(std::iter::repeat_n("0".to_string(), MIN_CELLS - 2));
        cells
    }

    #[test]
    fn parses_a_full_row_with_separators() {
        let parsed = parse_row(&row(" 2024.01.02 ", " 70,500 ")).unwrap();
        assert_eq!(parsed.date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(parsed.close, 70_500.0);
    }

    #[test]
    fn parses_iso_dates_too() {
        let parsed = parse_row(&row("2024-01-02", "1234.5")).unwrap();
        assert_eq!(parsed.date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(parsed.close, 1234.5);
    }

    #[test]
    fn short_rows_are_structural_mismatches_regardless_of_content() {
        assert_eq!(parse_row(&vec![]), Err(RowReject::StructuralMismatch));
        assert_eq!(
            parse_row(&vec!["2024.01.02".to_string(), "70,500".to_string()]),
            Err(RowReject::StructuralMismatch)
        );
        let six = vec!["2024.01.02".to_string(); MIN_CELLS - 1];
        assert_eq!(parse_row(&six), Err(RowReject::StructuralMismatch));
    }

    #[test]
    fn rejects_empty_and_malformed_dates() {
        assert_eq!(parse_row(&row("   ", "70,500")), Err(RowReject::EmptyDate));
        assert_eq!(parse_row(&row("bad", "70,500")), Err(RowReject::BadDate));
        assert_eq!(parse_row(&row("2024.13.40", "70,500")), Err(RowReject::BadDate));
    }

    #[test]
    fn rejects_malformed_or_negative_prices() {
        assert_eq!(parse_row(&row("2024.01.02", "x")), Err(RowReject::BadPrice));
        assert_eq!(parse_row(&row("2024.01.02", "")), Err(RowReject::BadPrice));
        assert_eq!(parse_row(&row("2024.01.02", "-70500")), Err(RowReject::BadPrice));
        assert_eq!(parse_row(&row("2024.01.02", "inf")), Err(RowReject::BadPrice));
        assert_eq!(parse_row(&row("2024.01.02", "NaN")), Err(RowReject::BadPrice));
    }
}
