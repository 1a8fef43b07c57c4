//! Series-level operations on collected data.
//!
//! - `merge`: combine per-instrument series into one tagged, date-sorted dataset
//! - `filter`: resolve a date window (with defaulting rules) and apply it

pub mod filter;
pub mod merge;

pub use filter::*;
pub use merge::*;
