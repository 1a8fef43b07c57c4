//! Formatted terminal output for the dump front-end and post-chart summary.

use crate::app::pipeline::RunOutput;
use crate::domain::{MergedDataset, RunConfig};

/// Format the run summary: what was collected, what was dropped, and the
/// resolved window.
pub fn format_run_summary(config: &RunConfig, run: &RunOutput) -> String {
    let mut out = String::new();

    out.push_str("=== sise - daily close comparison ===\n");
    out.push_str(&format!("Pages per instrument: {}\n", config.pages));

    for s in &run.stats {
        out.push_str(&format!(
            "- {} ({}): {} records ({} rows seen, {} dropped)\n",
            s.name, s.code, s.records, s.rows_seen, s.rows_rejected
        ));
    }

    out.push_str(&format!(
        "Merged: {} records across {} instrument(s)\n",
        run.merged.len(),
        run.stats.len()
    ));
    out.push_str(&format!(
        "Window: {} ~ {} ({} records kept)\n",
        run.range.start,
        run.range.end,
        run.filtered.len()
    ));

    out
}

/// Format the dataset as an aligned `date  close  instrument` table.
pub fn format_table(dataset: &MergedDataset) -> String {
    let mut out = String::new();

    if dataset.is_empty() {
        out.push_str("(no records in the requested window)\n");
        return out;
    }

    let name_width = dataset
        .records
        .iter()
        .map(|r| r.instrument.len())
        .max()
        .unwrap_or(0)
        .max("instrument".len());

    out.push_str(&format!("{:<10}  {:>12}  {:<name_width$}\n", "date", "close", "instrument"));
    for r in &dataset.records {
        out.push_str(&format!(
            "{:<10}  {:>12}  {:<name_width$}\n",
            r.date,
            fmt_price(r.close),
            r.instrument
        ));
    }

    out
}

/// Format a price with thousand separators, dropping fractional noise for
/// whole-unit quotes (the common case for KRW closes).
pub fn fmt_price(value: f64) -> String {
    let whole = value.trunc() as i64;
    let frac = value - whole as f64;

    let mut grouped = String::new();
    let digits = whole.abs().to_string();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if whole < 0 {
        grouped.insert(0, '-');
    }

    if frac.abs() >= 1e-9 {
        format!("{grouped}.{:02}", (frac.abs() * 100.0).round() as u32)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PriceRecord;
    use chrono::NaiveDate;

    #[test]
    fn prices_group_thousands() {
        assert_eq!(fmt_price(0.0), "0");
        assert_eq!(fmt_price(700.0), "700");
        assert_eq!(fmt_price(70_500.0), "70,500");
        assert_eq!(fmt_price(1_234_567.0), "1,234,567");
        assert_eq!(fmt_price(1234.5), "1,234.50");
    }

    #[test]
    fn table_lists_records_in_dataset_order() {
        let dataset = MergedDataset {
            records: vec![
                PriceRecord {
                    date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                    close: 70_500.0,
                    instrument: "Samsung".to_string(),
                },
                PriceRecord {
                    date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
                    close: 52_100.0,
                    instrument: "Kakao".to_string(),
                },
            ],
        };

        let table = format_table(&dataset);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("2024-01-02"));
        assert!(lines[1].contains("70,500"));
        assert!(lines[1].contains("Samsung"));
        assert!(lines[2].contains("Kakao"));
    }

    #[test]
    fn empty_dataset_formats_a_placeholder() {
        let table = format_table(&MergedDataset::default());
        assert!(table.contains("no records"));
    }
}
