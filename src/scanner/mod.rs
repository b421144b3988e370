//! Scanner module for candidate discovery and image fingerprinting.
//!
//! This module provides:
//! - [`scan`]: non-recursive discovery of image files that still need a
//!   fingerprint (not yet present in the cache table)
//! - [`fingerprint`]: the dHash fingerprint computation behind the
//!   [`Fingerprinter`] seam

pub mod fingerprint;

use std::path::{Path, PathBuf};

use crate::cache::FingerprintTable;

pub use fingerprint::{DhashFingerprinter, FingerprintError, Fingerprinter};

/// Image extensions recognized by default, matched case-insensitively.
pub const DEFAULT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "tiff", "webp"];

/// Errors that can occur during candidate discovery. All of them are fatal.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The specified path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// An I/O error occurred while listing the directory.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// List candidate files in `dir` that still need fingerprinting.
///
/// Considers only immediate (non-recursive) entries that are regular files
/// with a recognized extension, and excludes any path already present as a
/// key in `table`. Returned paths are relative to `dir` and sorted, so the
/// candidate set is identical across repeated calls on unchanged input.
///
/// Entries whose name is not valid UTF-8 are skipped with a warning; the
/// sidecar keys them as strings, so they cannot be cached faithfully.
///
/// # Errors
///
/// Fails if `dir` cannot be listed. Target validation (the path exists and
/// is a directory) is expected to have happened before this runs; a missing
/// target still maps onto [`ScanError::NotFound`] here rather than a generic
/// I/O error.
pub fn scan(
    dir: &Path,
    table: &FingerprintTable,
    extensions: &[String],
) -> Result<Vec<String>, ScanError> {
    let entries = std::fs::read_dir(dir).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => ScanError::NotFound(dir.to_path_buf()),
        std::io::ErrorKind::NotADirectory => ScanError::NotADirectory(dir.to_path_buf()),
        _ => ScanError::Io {
            path: dir.to_path_buf(),
            source,
        },
    })?;

    let mut candidates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ScanError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let file_type = entry.file_type().map_err(|source| ScanError::Io {
            path: entry.path(),
            source,
        })?;
        if !file_type.is_file() {
            continue;
        }

        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            log::warn!(
                "Skipping non-UTF-8 file name: {}",
                entry.path().display()
            );
            continue;
        };

        if !has_recognized_extension(name, extensions) {
            continue;
        }
        if table.contains_key(name) {
            log::trace!("Already cached, skipping: {name}");
            continue;
        }

        candidates.push(name.to_string());
    }

    candidates.sort_unstable();
    log::debug!(
        "Found {} candidates in {}",
        candidates.len(),
        dir.display()
    );
    Ok(candidates)
}

fn has_recognized_extension(name: &str, extensions: &[String]) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}
