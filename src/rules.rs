//! Classification rules and the ordered resolution chain.
//!
//! A file is classified by walking a fixed precedence chain, stopping at
//! the first hit:
//!
//! 1. Custom regex rules, matched against the full file name in load order.
//! 2. The built-in extension table ([`CategoryTable`]).
//! 3. Session rules learned interactively earlier in the same run.
//!
//! Files with no extension (or whose name is nothing but a leading dot)
//! skip steps 2 and 3 entirely, so they classify as [`Classification::Unresolved`]
//! unless a custom regex claims them. Session rules live exactly as long as
//! the resolver instance; nothing is persisted between runs.

use crate::category::{CategoryTable, dot_extension};
use crate::output::OutputFormatter;
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A regex rule mapping file names to a destination subpath.
///
/// Patterns are compiled once when the rule is created; an invalid pattern
/// is rejected at that point and never reaches the resolver.
#[derive(Debug, Clone)]
pub struct PatternRule {
    pattern: Regex,
    target: PathBuf,
}

impl PatternRule {
    /// Compiles a rule from a regex source and a destination subpath.
    pub fn new(pattern: &str, target: impl Into<PathBuf>) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            target: target.into(),
        })
    }

    /// Returns the rule's destination if the full file name matches.
    pub fn try_match(&self, file_name: &str) -> Option<&Path> {
        self.pattern.is_match(file_name).then_some(&self.target)
    }
}

/// Loads custom rules from a plain-text file, one rule per line as
/// `<regex>:<destination-subpath>`.
///
/// Empty lines and lines starting with `#` are ignored. A line with no
/// separator, an empty pattern, or an invalid regex is skipped with a
/// warning; the remaining rules still apply, in file order.
///
/// # Errors
///
/// Returns an error only if the file itself cannot be read.
pub fn load_rules_file(path: &Path) -> io::Result<Vec<PatternRule>> {
    let content = fs::read_to_string(path)?;
    let mut rules = Vec::new();

    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((pattern, target)) = line.split_once(':') else {
            OutputFormatter::warning(&format!(
                "Skipping rule on line {}: missing ':' separator",
                lineno + 1
            ));
            continue;
        };
        if pattern.is_empty() || target.is_empty() {
            OutputFormatter::warning(&format!(
                "Skipping rule on line {}: empty pattern or destination",
                lineno + 1
            ));
            continue;
        }

        match PatternRule::new(pattern, target) {
            Ok(rule) => rules.push(rule),
            Err(e) => OutputFormatter::warning(&format!(
                "Skipping rule on line {}: invalid regex '{}': {}",
                lineno + 1,
                pattern,
                e
            )),
        }
    }

    Ok(rules)
}

/// The outcome of classifying a single file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The destination subpath, relative to the destination root.
    Resolved(PathBuf),
    /// No rule matched; the caller must fall back to the interactive
    /// resolver and register the answer so later files auto-resolve.
    Unresolved,
}

/// Owns the full rule state for one run and applies the precedence chain.
pub struct RuleResolver {
    custom: Vec<PatternRule>,
    table: CategoryTable,
    session: HashMap<String, PathBuf>,
}

impl RuleResolver {
    /// Creates a resolver seeded with custom rules loaded for this run.
    pub fn new(custom: Vec<PatternRule>) -> Self {
        Self {
            custom,
            table: CategoryTable::new(),
            session: HashMap::new(),
        }
    }

    /// Classifies a file name, returning the destination subpath or
    /// [`Classification::Unresolved`].
    pub fn classify(&self, file_name: &str) -> Classification {
        for rule in &self.custom {
            if let Some(target) = rule.try_match(file_name) {
                return Classification::Resolved(target.to_path_buf());
            }
        }

        if let Some(ext) = dot_extension(file_name) {
            if let Some(category) = self.table.lookup(&ext) {
                return Classification::Resolved(PathBuf::from(category));
            }
            if let Some(target) = self.session.get(&ext) {
                return Classification::Resolved(target.clone());
            }
        }

        Classification::Unresolved
    }

    /// Registers a session rule for an extension (case-folded, with leading
    /// dot), so later files of the same type resolve without prompting.
    pub fn learn_extension(&mut self, ext: &str, target: PathBuf) {
        self.session.insert(ext.to_lowercase(), target);
    }

    /// Appends a pattern rule for the remainder of the run. Interactive
    /// regex rules land here and participate in step 1 of the chain.
    pub fn add_pattern(&mut self, rule: PatternRule) {
        self.custom.push(rule);
    }
}
