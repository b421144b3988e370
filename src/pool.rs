//! Bounded-parallel fingerprinting of a candidate set.
//!
//! A dedicated rayon thread pool sized to the configured parallelism gates
//! how many fingerprint computations are in flight; `par_iter().map()`
//! guarantees exactly one [`Outcome`] per candidate, in no particular order,
//! regardless of per-file failures. Merging outcomes into the fingerprint
//! table is left to the single-threaded caller, so the table is never
//! touched from worker threads.

use std::path::Path;

use rayon::prelude::*;

use crate::scanner::{FingerprintError, Fingerprinter};

/// Result of fingerprinting one candidate.
#[derive(Debug)]
pub struct Outcome {
    /// Candidate path, relative to the processed directory.
    pub path: String,
    /// The fingerprint, or the per-file error that excluded it.
    pub result: Result<String, FingerprintError>,
}

/// Fingerprint every candidate with at most `max_parallel` computations in
/// flight.
///
/// Candidates are relative paths; they are joined onto `dir` before being
/// handed to the fingerprinter. Blocks until all outcomes are collected. A
/// failing candidate never aborts its siblings; its error travels back in
/// its [`Outcome`].
pub fn run<F: Fingerprinter>(
    dir: &Path,
    candidates: Vec<String>,
    fingerprinter: &F,
    max_parallel: usize,
) -> Vec<Outcome> {
    if candidates.is_empty() {
        return Vec::new();
    }

    log::debug!(
        "Fingerprinting {} files with {} workers",
        candidates.len(),
        max_parallel
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(max_parallel.max(1))
        .build()
        .unwrap_or_else(|e| {
            log::warn!(
                "Failed to create sized thread pool ({e}), falling back to {} threads",
                rayon::current_num_threads()
            );
            rayon::ThreadPoolBuilder::new().build().unwrap()
        });

    pool.install(|| {
        candidates
            .into_par_iter()
            .map(|rel| {
                let result = fingerprinter.fingerprint(&dir.join(&rel));
                Outcome { path: rel, result }
            })
            .collect()
    })
}
