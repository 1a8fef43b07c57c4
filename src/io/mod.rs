//! Output helpers.
//!
//! - filtered-dataset CSV export (`export`)
//! - filtered-dataset JSON read/write (`dataset`)

pub mod dataset;
pub mod export;

pub use dataset::*;
pub use export::*;
