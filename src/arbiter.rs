//! Destination path arbitration.
//!
//! Given the path a file would land at, the arbiter decides whether the
//! transfer proceeds and under what name. Existence is re-checked on every
//! call; results are only valid as long as nothing else mutates the
//! destination concurrently.

use std::path::{Path, PathBuf};

/// The arbiter's verdict for one candidate path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Transfer to this (possibly disambiguated) path.
    Path(PathBuf),
    /// An identically named file already exists and the skip-duplicates
    /// policy is active; perform no transfer but count the file as
    /// processed.
    Skip,
}

/// Computes the final destination for `candidate`.
///
/// With `skip_duplicates` set, an existing file at the candidate path
/// yields [`Target::Skip`]. Otherwise collisions are resolved by appending
/// `_1`, `_2`, ... before the extension until a free name is found.
pub fn resolve_target(candidate: &Path, skip_duplicates: bool) -> Target {
    if skip_duplicates && candidate.exists() {
        return Target::Skip;
    }
    Target::Path(unique_path(candidate))
}

/// Returns `candidate` unchanged if free, or the first non-colliding
/// `stem_<n>.ext` variant otherwise.
fn unique_path(candidate: &Path) -> PathBuf {
    if !candidate.exists() {
        return candidate.to_path_buf();
    }

    let stem = candidate
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = candidate
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut counter = 1;
    loop {
        let renamed = candidate.with_file_name(format!("{}_{}{}", stem, counter, extension));
        if !renamed.exists() {
            return renamed;
        }
        counter += 1;
    }
}
