//! imgdupe - Image Duplicate Finder
//!
//! Finds duplicate images in a directory by computing a perceptual dHash
//! fingerprint for each image, caching fingerprints across runs in a JSON
//! sidecar, and reporting pairs of files with identical fingerprints.

pub mod cache;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod pool;
pub mod report;
pub mod scanner;

use std::path::Path;

use anyhow::Context;

use crate::cache::CacheStore;
use crate::cli::Cli;
use crate::config::Config;
use crate::error::ExitCode;
use crate::scanner::{DhashFingerprinter, Fingerprinter};

/// Counters from processing one directory.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    /// Fingerprints newly computed and merged into the table.
    pub computed: usize,
    /// Candidates whose fingerprint computation failed.
    pub failed: usize,
    /// Duplicate pairs reported.
    pub duplicates: usize,
}

/// Application entry point: process every directory given on the CLI.
///
/// Fatal conditions (unreadable directory, corrupt cache, failed cache
/// write) abort the whole invocation; per-file fingerprint failures are
/// reported and tallied but never stop a run.
///
/// # Errors
///
/// Returns the first fatal error encountered.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);
    let config = Config::from_cli(&cli);
    let fingerprinter = DhashFingerprinter::new();

    let mut failed = 0;
    for dir in &cli.dirs {
        let stats = process_directory(dir, &config, &fingerprinter)?;
        log::info!(
            "{}: {} fingerprinted, {} failed, {} duplicate pairs",
            dir.display(),
            stats.computed,
            stats.failed,
            stats.duplicates
        );
        failed += stats.failed;
    }

    if failed > 0 {
        Ok(ExitCode::PartialSuccess)
    } else {
        Ok(ExitCode::Success)
    }
}

/// Run the full pipeline over one directory.
///
/// Phases run strictly in sequence: load cache, scan the delta, fingerprint
/// it with bounded parallelism, merge and persist, prune, detect and report
/// duplicates, and persist again only if pruning changed the table. After
/// this returns, the sidecar matches the in-memory table exactly.
///
/// # Errors
///
/// Fails on any fatal condition: the target is missing or not a directory,
/// the directory cannot be listed, or the cache cannot be loaded or written.
pub fn process_directory(
    dir: &Path,
    config: &Config,
    fingerprinter: &impl Fingerprinter,
) -> anyhow::Result<RunStats> {
    let metadata = std::fs::metadata(dir)
        .with_context(|| format!("Cannot access '{}'", dir.display()))?;
    anyhow::ensure!(metadata.is_dir(), "Not a directory: {}", dir.display());

    let store = CacheStore::new(dir);
    let mut table = store.load().context("Failed to load fingerprint cache")?;

    let candidates = scanner::scan(dir, &table, &config.extensions)
        .with_context(|| format!("Failed to list '{}'", dir.display()))?;

    let outcomes = pool::run(dir, candidates, fingerprinter, config.max_parallel);

    // Single-consumer merge: only successful outcomes enter the table, so
    // failed files are retried on the next run.
    let mut stats = RunStats::default();
    for outcome in outcomes {
        match outcome.result {
            Ok(fingerprint) => {
                if config.verbose {
                    println!("{fingerprint} {}", outcome.path);
                }
                table.insert(outcome.path, fingerprint);
                stats.computed += 1;
            }
            Err(e) => {
                log::warn!("{e}");
                stats.failed += 1;
            }
        }
    }

    if stats.computed > 0 {
        store
            .persist(&table)
            .context("Failed to write fingerprint cache")?;
    }

    let pruned = config.prune && store.prune(&mut table);

    let reports = duplicates::find_duplicates(&table);
    stats.duplicates = reports.len();
    report::print_reports(dir, &reports, config.visual);

    if pruned {
        store
            .persist(&table)
            .context("Failed to write fingerprint cache after pruning")?;
    }

    Ok(stats)
}
