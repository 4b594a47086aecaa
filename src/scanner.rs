//! Recursive source enumeration.
//!
//! The scanner walks a source root and yields regular files only.
//! Symbolic links are never followed and never yielded, even when they
//! point at regular files, so a linked file cannot be transferred twice
//! and link cycles cannot occur. Enumeration order is whatever the
//! filesystem reports; callers needing determinism must sort the result.

use crate::output::OutputFormatter;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One enumerated file. Ownership of the entry passes to the caller; the
/// scanner keeps no state between calls.
#[derive(Debug, Clone)]
pub struct ScanEntry {
    /// The file's path as found under the scanned root.
    pub path: PathBuf,
    /// The path relative to the scanned root, used by no-sort mode.
    pub relative: PathBuf,
    /// Size in bytes at scan time.
    pub size: u64,
}

/// Recursively lists regular files under `root`.
///
/// When `include_hidden` is false, files whose base name starts with `.`
/// are skipped. Unreadable entries are reported and skipped; they never
/// abort the scan.
pub fn scan(root: &Path, include_hidden: bool) -> Vec<ScanEntry> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                OutputFormatter::warning(&format!("Skipping unreadable entry: {}", e));
                continue;
            }
        };

        // Symlinks report their own file type here, not the target's.
        if !entry.file_type().is_file() {
            continue;
        }

        if !include_hidden
            && let Some(name) = entry.path().file_name()
            && name.to_string_lossy().starts_with('.')
        {
            continue;
        }

        let size = match entry.metadata() {
            Ok(metadata) => metadata.len(),
            Err(e) => {
                OutputFormatter::warning(&format!(
                    "Skipping {}: cannot read metadata: {}",
                    entry.path().display(),
                    e
                ));
                continue;
            }
        };

        let relative = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_path_buf();

        entries.push(ScanEntry {
            path: entry.path().to_path_buf(),
            relative,
            size,
        });
    }

    entries
}
