//! The merge orchestrator.
//!
//! Drives one run end to end: validate sources, scan both roots to
//! completion, then classify, arbitrate, and transfer file by file with
//! progress reporting. Scanning always finishes before the first transfer,
//! which is what makes the up-front byte total accurate and makes it safe
//! for the destination to overlap one of the sources.
//!
//! Per-file transfer failures are reported and iteration continues; only
//! missing sources and failed directory creation abort the run. Partial
//! output already written stays on disk.

use crate::arbiter::{Target, resolve_target};
use crate::category::{FALLBACK_CATEGORY, dot_extension};
use crate::output::OutputFormatter;
use crate::progress::ProgressReporter;
use crate::prompt::{ConsolePrompt, Resolution, UnknownFileResolver};
use crate::rules::{Classification, PatternRule, RuleResolver, load_rules_file};
use crate::scanner::{ScanEntry, scan};
use crate::transfer::{copy_with_progress, move_file};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Whether files are copied or moved out of the sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Copy,
    Move,
}

/// The resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    pub source_a: PathBuf,
    pub source_b: PathBuf,
    pub destination: PathBuf,
    pub operation: OperationKind,
    pub verbose: bool,
    pub skip_duplicates: bool,
    pub include_hidden: bool,
    pub no_sort: bool,
    pub rules_file: Option<PathBuf>,
    pub scan_file: Option<PathBuf>,
}

impl ProcessOptions {
    /// Options for a copy-mode run with all flags off.
    pub fn new(
        source_a: impl Into<PathBuf>,
        source_b: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source_a: source_a.into(),
            source_b: source_b.into(),
            destination: destination.into(),
            operation: OperationKind::Copy,
            verbose: false,
            skip_duplicates: false,
            include_hidden: false,
            no_sort: false,
            rules_file: None,
            scan_file: None,
        }
    }
}

/// Unrecoverable errors that abort a run.
#[derive(Debug)]
pub enum MergeError {
    /// A source root does not exist; nothing was written.
    MissingSource(PathBuf),
    /// The destination root or a category subdirectory could not be
    /// created. Output written before this point remains on disk.
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The custom rules file was requested but could not be read.
    RulesReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The scan-only report could not be written.
    ScanOutputFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for MergeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingSource(path) => {
                write!(f, "Source folder does not exist: {}", path.display())
            }
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::RulesReadFailed { path, source } => {
                write!(
                    f,
                    "Failed to read rules file {}: {}",
                    path.display(),
                    source
                )
            }
            Self::ScanOutputFailed { path, source } => {
                write!(
                    f,
                    "Failed to write scan report {}: {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for MergeError {}

/// Result type for orchestrator operations.
pub type MergeResult<T> = Result<T, MergeError>;

/// End-of-run totals.
#[derive(Debug, Clone, Default)]
pub struct MergeSummary {
    pub files_found: usize,
    pub total_bytes: u64,
    pub transferred: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Outcome of a scan-only run.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub files_found: usize,
    /// Files no rule could place, in enumeration order.
    pub uncategorized: Vec<PathBuf>,
}

/// Coordinates scan, classification, arbitration, and transfer for both
/// source trees.
pub struct Merger {
    resolver: Box<dyn UnknownFileResolver>,
}

impl Merger {
    /// A merger that prompts on the console for uncategorized files.
    pub fn new() -> Self {
        Self::with_resolver(Box::new(ConsolePrompt))
    }

    /// A merger with a caller-supplied resolver; tests use scripted ones.
    pub fn with_resolver(resolver: Box<dyn UnknownFileResolver>) -> Self {
        Self { resolver }
    }

    /// Runs a full merge.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError`] for missing sources, an unreadable rules
    /// file, or failed directory creation. Per-file copy/move failures are
    /// reported, counted in the summary, and do not fail the run.
    pub fn process(&mut self, options: &ProcessOptions) -> MergeResult<MergeSummary> {
        validate_sources(options)?;
        let mut rules = RuleResolver::new(load_rules(options)?);

        let (entries, total_bytes) = scan_sources(options);

        fs::create_dir_all(&options.destination).map_err(|e| {
            MergeError::DirectoryCreationFailed {
                path: options.destination.clone(),
                source: e,
            }
        })?;

        // A collision in no-sort mode is always a skip, never a rename.
        let skip_duplicates = options.skip_duplicates || options.no_sort;
        let dual = options.operation == OperationKind::Copy;
        let mut reporter = ProgressReporter::new(total_bytes, dual);
        let mut summary = MergeSummary {
            files_found: entries.len(),
            total_bytes,
            ..Default::default()
        };

        for entry in &entries {
            let os_name = entry.path.file_name().unwrap_or_default();
            let file_name = os_name.to_string_lossy();

            if options.verbose {
                reporter.println(&format!("Processing: {}", entry.path.display()));
            }

            let candidate = if options.no_sort {
                options.destination.join(&entry.relative)
            } else {
                let subpath = match rules.classify(&file_name) {
                    Classification::Resolved(subpath) => subpath,
                    Classification::Unresolved => {
                        let answer = reporter
                            .suspend(|| self.resolver.resolve(&entry.path, &options.destination));
                        match answer {
                            Ok(resolution) => {
                                apply_resolution(&mut rules, &file_name, resolution, &reporter)
                            }
                            Err(e) => {
                                report_file_error(
                                    &reporter,
                                    &format!("Could not resolve {}: {}", entry.path.display(), e),
                                );
                                reporter.file_processed(entry.size);
                                summary.failed += 1;
                                continue;
                            }
                        }
                    }
                };
                options.destination.join(subpath).join(os_name)
            };

            let target_dir = candidate.parent().unwrap_or(&options.destination);
            fs::create_dir_all(target_dir).map_err(|e| MergeError::DirectoryCreationFailed {
                path: target_dir.to_path_buf(),
                source: e,
            })?;

            let final_path = match resolve_target(&candidate, skip_duplicates) {
                Target::Path(path) => path,
                Target::Skip => {
                    if options.verbose {
                        reporter.println(&format!("Skipping duplicate: {}", file_name));
                    }
                    reporter.file_processed(entry.size);
                    summary.skipped += 1;
                    continue;
                }
            };

            match options.operation {
                OperationKind::Copy => {
                    reporter.start_file(&file_name, entry.size);
                    let result = copy_with_progress(&entry.path, &final_path, &mut |bytes| {
                        reporter.update_file(bytes)
                    });
                    reporter.finish_file();
                    match result {
                        Ok(()) => summary.transferred += 1,
                        Err(e) => {
                            report_file_error(&reporter, &e.to_string());
                            summary.failed += 1;
                        }
                    }
                }
                OperationKind::Move => {
                    // Moves are not chunked; progress lands in one step.
                    match move_file(&entry.path, &final_path) {
                        Ok(()) => summary.transferred += 1,
                        Err(e) => {
                            report_file_error(&reporter, &e.to_string());
                            summary.failed += 1;
                        }
                    }
                    reporter.file_processed(entry.size);
                }
            }
        }

        reporter.finish();
        OutputFormatter::run_summary(summary.transferred, summary.skipped, summary.failed);
        Ok(summary)
    }

    /// Runs scan-only mode: classifies every file without touching the
    /// destination and writes the paths of uncategorized files to
    /// `output`, one per line. No report file is written when every file
    /// classifies.
    pub fn scan_only(&self, options: &ProcessOptions, output: &Path) -> MergeResult<ScanReport> {
        validate_sources(options)?;
        let rules = RuleResolver::new(load_rules(options)?);

        let (entries, _) = scan_sources(options);

        let uncategorized: Vec<PathBuf> = entries
            .iter()
            .filter(|entry| {
                let file_name = entry
                    .path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                matches!(rules.classify(&file_name), Classification::Unresolved)
            })
            .map(|entry| entry.path.clone())
            .collect();

        if !uncategorized.is_empty() {
            let mut report = String::new();
            for path in &uncategorized {
                // Absolute paths, one per line, so the report is usable
                // from any working directory.
                let line = std::path::absolute(path).unwrap_or_else(|_| path.clone());
                report.push_str(&line.to_string_lossy());
                report.push('\n');
            }
            fs::write(output, report).map_err(|e| MergeError::ScanOutputFailed {
                path: output.to_path_buf(),
                source: e,
            })?;
        }

        Ok(ScanReport {
            files_found: entries.len(),
            uncategorized,
        })
    }
}

impl Default for Merger {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_sources(options: &ProcessOptions) -> MergeResult<()> {
    for root in [&options.source_a, &options.source_b] {
        if !root.exists() {
            return Err(MergeError::MissingSource(root.clone()));
        }
    }
    Ok(())
}

fn load_rules(options: &ProcessOptions) -> MergeResult<Vec<PatternRule>> {
    match &options.rules_file {
        Some(path) => load_rules_file(path).map_err(|e| MergeError::RulesReadFailed {
            path: path.clone(),
            source: e,
        }),
        None => Ok(Vec::new()),
    }
}

/// Scans both roots to completion, in order, before anything is written.
fn scan_sources(options: &ProcessOptions) -> (Vec<ScanEntry>, u64) {
    ProgressReporter::report_scan_begin();
    let mut entries = scan(&options.source_a, options.include_hidden);
    entries.extend(scan(&options.source_b, options.include_hidden));
    let total_bytes = entries.iter().map(|e| e.size).sum();
    ProgressReporter::report_scan_complete(entries.len(), total_bytes);
    (entries, total_bytes)
}

/// Turns an interactive answer into a destination subpath, registering the
/// learned rule so later files in the run resolve without prompting.
/// Extensionless files and dot-files are never registered.
fn apply_resolution(
    rules: &mut RuleResolver,
    file_name: &str,
    resolution: Resolution,
    reporter: &ProgressReporter,
) -> PathBuf {
    match resolution {
        Resolution::Fallback => {
            let target = PathBuf::from(FALLBACK_CATEGORY);
            if let Some(ext) = dot_extension(file_name) {
                rules.learn_extension(&ext, target.clone());
            }
            target
        }
        Resolution::Folder(folder) => {
            if let Some(ext) = dot_extension(file_name) {
                rules.learn_extension(&ext, folder.clone());
            }
            folder
        }
        Resolution::Pattern { pattern, target } => {
            match PatternRule::new(&pattern, target.clone()) {
                Ok(rule) => rules.add_pattern(rule),
                Err(e) => reporter.println(&format!(
                    "{} Ignoring invalid regex rule '{}': {}",
                    "⚠".yellow(),
                    pattern,
                    e
                )),
            }
            target
        }
    }
}

fn report_file_error(reporter: &ProgressReporter, message: &str) {
    reporter.println(&format!("{} {}", "✗".red(), message));
}
