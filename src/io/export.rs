//! Export the filtered dataset to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts, so prices are written bare (no thousand separators).

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::MergedDataset;
use crate::error::{AppError, ErrorCode};

/// Write `date,instrument,close` rows in dataset order.
pub fn write_dataset_csv(path: &Path, dataset: &MergedDataset) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(
            ErrorCode::Io,
            format!("Failed to create export CSV '{}': {e}", path.display()),
        )
    })?;

    writeln!(file, "date,instrument,close")
        .map_err(|e| AppError::new(ErrorCode::Io, format!("Failed to write export CSV header: {e}")))?;

    for r in &dataset.records {
        writeln!(file, "{},{},{}", r.date, r.instrument, r.close)
            .map_err(|e| AppError::new(ErrorCode::Io, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}
