/// File transfer primitives: chunked copy with progress, atomic move.
///
/// Copies are streamed in fixed-size chunks so progress reporting can
/// observe partial completion; moves are a bare rename. Failures are
/// returned to the caller and never abort the surrounding run.
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Chunk size for streamed copies.
pub const COPY_CHUNK_SIZE: usize = 8 * 1024;

/// Errors from transferring a single file.
#[derive(Debug)]
pub enum TransferError {
    /// The streamed copy failed.
    CopyFailed {
        source: PathBuf,
        destination: PathBuf,
        source_error: std::io::Error,
    },
    /// The rename failed (e.g. permissions, or source and destination on
    /// different filesystems; moves are never downgraded to copy+delete).
    MoveFailed {
        source: PathBuf,
        destination: PathBuf,
        source_error: std::io::Error,
    },
}

impl std::fmt::Display for TransferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CopyFailed {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to copy {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
            Self::MoveFailed {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
        }
    }
}

impl std::error::Error for TransferError {}

/// Result type for transfer operations.
pub type TransferResult<T> = Result<T, TransferError>;

/// Streams `from` into `to` in [`COPY_CHUNK_SIZE`] chunks.
///
/// `on_progress` receives the cumulative byte count for this file after
/// every chunk, plus a final call carrying the exact file size (so a
/// zero-byte file still reports once, with 0). On success the destination
/// holds byte-identical content.
pub fn copy_with_progress(
    from: &Path,
    to: &Path,
    on_progress: &mut dyn FnMut(u64),
) -> TransferResult<()> {
    let copy_error = |e: std::io::Error| TransferError::CopyFailed {
        source: from.to_path_buf(),
        destination: to.to_path_buf(),
        source_error: e,
    };

    let mut reader = File::open(from).map_err(copy_error)?;
    let mut writer = File::create(to).map_err(copy_error)?;

    let mut buffer = [0u8; COPY_CHUNK_SIZE];
    let mut copied: u64 = 0;

    loop {
        let read = reader.read(&mut buffer).map_err(copy_error)?;
        if read == 0 {
            break;
        }
        writer.write_all(&buffer[..read]).map_err(copy_error)?;
        copied += read as u64;
        on_progress(copied);
    }

    // Final update with the exact size.
    on_progress(copied);
    Ok(())
}

/// Moves `from` to `to` via rename. Cross-filesystem moves fail here and
/// are reported per-file by the caller.
pub fn move_file(from: &Path, to: &Path) -> TransferResult<()> {
    std::fs::rename(from, to).map_err(|e| TransferError::MoveFailed {
        source: from.to_path_buf(),
        destination: to.to_path_buf(),
        source_error: e,
    })
}
