//! Command-line parsing for the close-price comparison tool.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the collection/filtering code. Instrument-list
//! parsing lives here because the pipeline only ever sees validated
//! `InstrumentRequest`s.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{DEFAULT_PAGE_COUNT, InstrumentRequest};

pub mod prompt;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "sise", version, about = "Daily close-price comparison for Naver Finance listings")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Collect, merge, filter, and render a terminal comparison chart.
    ///
    /// Running bare `sise` is rewritten to this command; missing instruments
    /// and dates are then asked for interactively.
    Chart(RunArgs),
    /// Print the filtered dataset as a plain table (useful for scripting).
    Dump(RunArgs),
}

/// Common options for collecting and filtering.
#[derive(Debug, Parser, Clone)]
pub struct RunArgs {
    /// Instruments as comma-separated Name:Code pairs,
    /// e.g. "Samsung:005930,Kakao:035720".
    #[arg(short = 's', long)]
    pub stocks: Option<String>,

    /// Start date (YYYY-MM-DD). Defaults to the oldest collected date.
    #[arg(long)]
    pub start: Option<String>,

    /// End date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub end: Option<String>,

    /// Pages fetched per instrument (the source keeps roughly ten trading
    /// days per page and truncates older history).
    #[arg(long, default_value_t = DEFAULT_PAGE_COUNT)]
    pub pages: u32,

    /// Export the filtered dataset to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the filtered dataset to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,
}

/// Parse a comma-separated `Name:Code` list into instrument requests.
///
/// Malformed items (wrong piece count, empty name or code) are dropped, not
/// fatal; the pipeline raises `NoValidInstruments` if nothing survives.
pub fn parse_instruments(raw: &str) -> Vec<InstrumentRequest> {
    let mut out = Vec::new();
    for item in raw.split(',') {
        let pieces: Vec<&str> = item.split(':').collect();
        if pieces.len() != 2 {
            continue;
        }
        let name = pieces[0].trim();
        let code = pieces[1].trim();
        if name.is_empty() || code.is_empty() {
            continue;
        }
        out.push(InstrumentRequest::new(name, code));
    }
    out
}
