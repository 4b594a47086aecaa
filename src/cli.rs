//! Command-line interface.
//!
//! Parses arguments into [`ProcessOptions`] and dispatches either a full
//! merge or a scan-only analysis.

use crate::merger::{MergeResult, Merger, OperationKind, ProcessOptions};
use crate::output::OutputFormatter;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Merge two directory trees into a categorized destination.
#[derive(Debug, Parser)]
#[command(name = "dirmerge", version, about)]
pub struct Cli {
    /// First source folder.
    pub source_a: PathBuf,

    /// Second source folder.
    pub source_b: PathBuf,

    /// Destination folder (created if missing).
    pub destination: PathBuf,

    /// Whether to copy files or move them out of the sources.
    #[arg(long, value_enum, default_value_t = Mode::Copy)]
    pub mode: Mode,

    /// Print each file as it is processed.
    #[arg(short, long)]
    pub verbose: bool,

    /// Skip files whose destination path already exists instead of
    /// renaming them.
    #[arg(short, long)]
    pub skip_duplicates: bool,

    /// Include hidden files (names starting with '.').
    #[arg(long)]
    pub include_hidden: bool,

    /// Preserve each file's relative path instead of sorting into
    /// categories. Implies --skip-duplicates.
    #[arg(long)]
    pub no_sort: bool,

    /// Custom classification rules file (one `<regex>:<folder>` per line).
    #[arg(long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Scan and classify only; write uncategorized file paths to FILE and
    /// exit without transferring anything.
    #[arg(long, value_name = "FILE")]
    pub scan: Option<PathBuf>,
}

/// Transfer mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Stream a copy of each file; sources are left untouched.
    Copy,
    /// Rename each file into the destination. Fails per-file across
    /// filesystem boundaries.
    Move,
}

impl Cli {
    /// Converts parsed arguments into run options.
    pub fn into_options(self) -> ProcessOptions {
        ProcessOptions {
            source_a: self.source_a,
            source_b: self.source_b,
            destination: self.destination,
            operation: match self.mode {
                Mode::Copy => OperationKind::Copy,
                Mode::Move => OperationKind::Move,
            },
            verbose: self.verbose,
            skip_duplicates: self.skip_duplicates,
            include_hidden: self.include_hidden,
            no_sort: self.no_sort,
            rules_file: self.rules,
            scan_file: self.scan,
        }
    }
}

/// Executes one run described by `options`.
pub fn run(options: ProcessOptions) -> MergeResult<()> {
    if let Some(scan_file) = options.scan_file.clone() {
        let report = Merger::new().scan_only(&options, &scan_file)?;
        if report.uncategorized.is_empty() {
            OutputFormatter::success(&format!(
                "Scan complete: all {} files are categorized.",
                report.files_found
            ));
        } else {
            OutputFormatter::warning(&format!(
                "Scan complete: {} of {} files are uncategorized.",
                report.uncategorized.len(),
                report.files_found
            ));
            OutputFormatter::plain(&format!("Report written to {}.", scan_file.display()));
        }
        return Ok(());
    }

    match options.operation {
        OperationKind::Copy => OutputFormatter::info("Mode: copying files (sources untouched)."),
        OperationKind::Move => OutputFormatter::info("Mode: moving files out of the sources."),
    }
    if options.no_sort {
        OutputFormatter::info("No-sort: preserving relative paths, skipping duplicates.");
    }

    Merger::new().process(&options)?;
    Ok(())
}
