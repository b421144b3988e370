//! Pipeline configuration.
//!
//! All knobs the core pipeline honors live in one explicit value built from
//! the CLI and threaded through; core logic never reads ambient process
//! state.

use crate::cli::Cli;
use crate::scanner::DEFAULT_EXTENSIONS;

/// Configuration for one pipeline invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum concurrent fingerprint computations (>= 1).
    pub max_parallel: usize,
    /// Echo `fingerprint path` on stdout for every newly computed file.
    pub verbose: bool,
    /// Show duplicates in an external viewer with per-file metadata instead
    /// of printing plain pair lines.
    pub visual: bool,
    /// Drop cache entries whose file no longer exists before detection.
    pub prune: bool,
    /// Recognized image extensions, matched case-insensitively.
    pub extensions: Vec<String>,
}

impl Config {
    /// Build the pipeline configuration from parsed CLI arguments.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        let extensions = if cli.extensions.is_empty() {
            DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
        } else {
            cli.extensions.clone()
        };

        Self {
            max_parallel: cli.jobs(),
            verbose: cli.verbose > 0,
            visual: cli.visual,
            prune: !cli.no_prune,
            extensions,
        }
    }
}
