//! Reporting utilities: run summaries and plain-text tables.
//!
//! We keep formatting code in one place so:
//! - the collection/filtering code stays clean and testable
//! - output changes are localized

pub mod format;

pub use format::*;
