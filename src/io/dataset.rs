//! Read/write dataset JSON files.
//!
//! Dataset JSON is the "portable" representation of a finished run:
//! - the resolved date window
//! - the ordered instrument labels
//! - the filtered records themselves
//!
//! The record schema is defined by `domain::PriceRecord`.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{DateRange, MergedDataset};
use crate::error::{AppError, ErrorCode};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetFile {
    pub tool: String,
    pub range: DateRange,
    pub labels: Vec<String>,
    pub dataset: MergedDataset,
}

/// Write a dataset JSON file.
pub fn write_dataset_json(
    path: &Path,
    dataset: &MergedDataset,
    range: DateRange,
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            ErrorCode::Io,
            format!("Failed to create dataset JSON '{}': {e}", path.display()),
        )
    })?;

    let out = DatasetFile {
        tool: "sise".to_string(),
        range,
        labels: dataset.labels().iter().map(|s| s.to_string()).collect(),
        dataset: dataset.clone(),
    };

    serde_json::to_writer_pretty(file, &out)
        .map_err(|e| AppError::new(ErrorCode::Io, format!("Failed to write dataset JSON: {e}")))?;

    Ok(())
}

/// Read a dataset JSON file.
pub fn read_dataset_json(path: &Path) -> Result<DatasetFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(
            ErrorCode::Io,
            format!("Failed to open dataset JSON '{}': {e}", path.display()),
        )
    })?;
    let dataset: DatasetFile = serde_json::from_reader(file)
        .map_err(|e| AppError::new(ErrorCode::Io, format!("Invalid dataset JSON: {e}")))?;
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PriceRecord;
    use chrono::NaiveDate;

    #[test]
    fn dataset_json_round_trips() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let dataset = MergedDataset {
            records: vec![PriceRecord {
                date,
                close: 70_500.0,
                instrument: "Samsung".to_string(),
            }],
        };
        let range = DateRange { start: date, end: date };

        let dir = std::env::temp_dir().join("sise-dataset-json-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("dataset.json");

        write_dataset_json(&path, &dataset, range).unwrap();
        let read = read_dataset_json(&path).unwrap();

        assert_eq!(read.tool, "sise");
        assert_eq!(read.range, range);
        assert_eq!(read.labels, vec!["Samsung"]);
        assert_eq!(read.dataset, dataset);
    }
}
