//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - instrument configuration (`InstrumentRequest`, `RunConfig`)
//! - per-instrument collection output (`InstrumentSeries`)
//! - merged/filtered dataset types (`PriceRecord`, `MergedDataset`, `DateRange`)

pub mod types;

pub use types::*;
