//! JSON sidecar persistence for fingerprint tables.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Fixed name of the sidecar cache file inside a processed directory.
pub const CACHE_FILE_NAME: &str = ".imgdupe.json";

/// Mapping from a path (relative to the processed directory) to its
/// fingerprint, hex-encoded.
///
/// A `BTreeMap` keeps iteration lexicographic, which makes duplicate pairing
/// reproducible for fingerprints shared by three or more files and keeps the
/// serialized sidecar stable across runs.
pub type FingerprintTable = BTreeMap<String, String>;

/// Errors that can occur in the cache store. All of them are fatal.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The sidecar exists but could not be read, or could not be written.
    #[error("I/O error for cache {path}: {source}")]
    Io {
        /// Sidecar path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The sidecar exists but its content is not a JSON object of strings.
    #[error("Corrupt cache file {path}: {source}")]
    Corrupt {
        /// Sidecar path that failed to parse
        path: PathBuf,
        /// The underlying parse error
        #[source]
        source: serde_json::Error,
    },
}

/// Owns the sidecar file of one processed directory.
pub struct CacheStore {
    dir: PathBuf,
    path: PathBuf,
}

impl CacheStore {
    /// Create a store for the sidecar of `dir`.
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            path: dir.join(CACHE_FILE_NAME),
        }
    }

    /// Path of the sidecar file this store owns.
    #[must_use]
    pub fn sidecar_path(&self) -> &Path {
        &self.path
    }

    /// Load the fingerprint table from the sidecar.
    ///
    /// A missing sidecar is not an error and yields an empty table. Any
    /// sidecar that exists but cannot be read or parsed is fatal.
    pub fn load(&self) -> Result<FingerprintTable, CacheError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No cache at {}, starting empty", self.path.display());
                return Ok(FingerprintTable::new());
            }
            Err(source) => {
                return Err(CacheError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let table: FingerprintTable =
            serde_json::from_str(&content).map_err(|source| CacheError::Corrupt {
                path: self.path.clone(),
                source,
            })?;

        log::debug!(
            "Loaded {} cached fingerprints from {}",
            table.len(),
            self.path.display()
        );
        Ok(table)
    }

    /// Serialize the full table and atomically replace the sidecar.
    ///
    /// Writes to a sibling temp file first and renames it over the sidecar,
    /// so a failed write never leaves a partially written sidecar visible.
    pub fn persist(&self, table: &FingerprintTable) -> Result<(), CacheError> {
        let json = serde_json::to_string_pretty(table).map_err(|source| CacheError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|source| CacheError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| CacheError::Io {
            path: self.path.clone(),
            source,
        })?;

        log::debug!(
            "Persisted {} fingerprints to {}",
            table.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Drop entries whose path no longer resolves to a regular file.
    ///
    /// Returns whether anything was removed, so the caller can skip a
    /// needless re-persist.
    pub fn prune(&self, table: &mut FingerprintTable) -> bool {
        let before = table.len();
        table.retain(|rel, _| {
            let exists = self.dir.join(rel).is_file();
            if !exists {
                log::debug!("Pruning stale cache entry: {rel}");
            }
            exists
        });
        before != table.len()
    }
}
