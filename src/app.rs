//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments (prompting for anything missing)
//! - runs the collection pipeline
//! - renders the chart or prints the table
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, RunArgs, prompt};
use crate::domain::RunConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `sise` binary.
pub fn run() -> Result<(), AppError> {
    // We want bare `sise` (and `sise -s ...`) to behave like `sise chart ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Chart(args) => handle_run(args, OutputMode::Chart),
        Command::Dump(args) => handle_run(args, OutputMode::Dump),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Chart,
    Dump,
}

fn handle_run(args: RunArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = run_config_from_args(&args)?;
    let run = pipeline::run_collect(&config)?;

    match mode {
        OutputMode::Chart => {
            crate::tui::run(&run)?;
            // After the terminal is restored, leave a scrollback trace of
            // what was shown.
            println!("{}", crate::report::format_run_summary(&config, &run));
        }
        OutputMode::Dump => {
            println!("{}", crate::report::format_run_summary(&config, &run));
            println!("{}", crate::report::format_table(&run.filtered));
        }
    }

    // Optional exports.
    if let Some(path) = &config.export_csv {
        crate::io::write_dataset_csv(path, &run.filtered)?;
    }
    if let Some(path) = &config.export_json {
        crate::io::write_dataset_json(path, &run.filtered, run.range)?;
    }

    Ok(())
}

/// Build the run configuration, prompting for instruments and dates when the
/// `--stocks` flag was not supplied (the interactive UX).
fn run_config_from_args(args: &RunArgs) -> Result<RunConfig, AppError> {
    let (instruments, start, end) = match &args.stocks {
        Some(raw) => (
            crate::cli::parse_instruments(raw),
            args.start.clone(),
            args.end.clone(),
        ),
        None => {
            let instruments = prompt::prompt_for_instruments()?;
            let start = match &args.start {
                Some(s) => Some(s.clone()),
                None => prompt::prompt_for_date("Start", "oldest collected date")?,
            };
            let end = match &args.end {
                Some(s) => Some(s.clone()),
                None => prompt::prompt_for_date("End", "today")?,
            };
            (instruments, start, end)
        }
    };

    Ok(RunConfig {
        instruments,
        start,
        end,
        pages: args.pages,
        export_csv: args.export.clone(),
        export_json: args.export_json.clone(),
    })
}

/// Rewrite argv so `sise` defaults to `sise chart`.
///
/// Rules:
/// - `sise`                     -> `sise chart`
/// - `sise -s "A:1" ...`        -> `sise chart -s "A:1" ...`
/// - `sise --help/--version/-h` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("chart".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "chart" | "dump");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "chart flags".
    if arg1.starts_with('-') {
        argv.insert(1, "chart".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
