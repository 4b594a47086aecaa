//! dirmerge - merge two directory trees into one organized destination
//!
//! This library scans two source folders, classifies every file through a
//! rule chain (custom regex rules, a built-in extension table, rules
//! learned during the run, and finally an interactive prompt), arbitrates
//! duplicate destination paths, and copies or moves the files with live
//! progress reporting. A scan-only mode classifies without transferring.

pub mod arbiter;
pub mod category;
pub mod cli;
pub mod merger;
pub mod output;
pub mod progress;
pub mod prompt;
pub mod rules;
pub mod scanner;
pub mod transfer;

pub use arbiter::{Target, resolve_target};
pub use category::{CategoryTable, FALLBACK_CATEGORY, dot_extension};
pub use merger::{
    MergeError, MergeResult, MergeSummary, Merger, OperationKind, ProcessOptions, ScanReport,
};
pub use prompt::{Resolution, UnknownFileResolver};
pub use rules::{Classification, PatternRule, RuleResolver, load_rules_file};
pub use scanner::{ScanEntry, scan};
