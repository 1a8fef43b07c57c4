//! Interactive input collection.
//!
//! This is intentionally kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the prompts provide the "run `sise` and type what you want" UX
//!
//! Prompts only run when the corresponding flag was not supplied; output from
//! here always goes to the terminal, never into the dataset.

use std::io::{self, Write};

use crate::cli::parse_instruments;
use crate::domain::InstrumentRequest;
use crate::error::{AppError, ErrorCode};

/// Ask for the instrument list.
///
/// A single attempt, mirroring the flag behavior: malformed items are
/// dropped, and an empty result is the fatal `NoValidInstruments` condition.
pub fn prompt_for_instruments() -> Result<Vec<InstrumentRequest>, AppError> {
    println!("Enter instruments to compare as Name:Code pairs, separated by commas.");
    println!("The source keeps roughly the last five months of daily history.");

    let input = read_prompt_line("e.g. Samsung:005930, Kakao:035720 : ")?;
    let instruments = parse_instruments(&input);
    if instruments.is_empty() {
        return Err(AppError::new(
            ErrorCode::NoValidInstruments,
            format!("No valid Name:Code pairs in '{}'.", input.trim()),
        ));
    }
    Ok(instruments)
}

/// Ask for an optional date bound; Enter means "use the default".
///
/// The raw string is returned unparsed: validation happens during range
/// resolution so that typed-but-wrong dates fail the same way as flag input.
pub fn prompt_for_date(which: &str, default_hint: &str) -> Result<Option<String>, AppError> {
    let input = read_prompt_line(&format!(
        "{which} date (YYYY-MM-DD, Enter = {default_hint}): "
    ))?;
    let trimmed = input.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}

fn read_prompt_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout()
        .flush()
        .map_err(|e| AppError::new(ErrorCode::Io, format!("Failed to write prompt: {e}")))?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| AppError::new(ErrorCode::Io, format!("Failed to read input: {e}")))?;
    Ok(input)
}
