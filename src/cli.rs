//! Command-line interface definitions for imgdupe.
//!
//! All CLI arguments are defined here using the clap derive API and turned
//! into a [`crate::config::Config`] before the pipeline runs.
//!
//! # Example
//!
//! ```bash
//! # Find duplicates in one directory
//! imgdupe ~/Pictures
//!
//! # Four parallel fingerprint computations, echoing each new fingerprint
//! imgdupe -j 4 -v ~/Pictures
//!
//! # Review pairs in an external viewer
//! IMGDUPE_VIEWER="feh -g 1200x600" imgdupe --visual ~/Pictures
//! ```

use clap::Parser;
use std::path::PathBuf;

/// Image duplicate finder with a persistent perceptual-hash cache.
///
/// imgdupe fingerprints every image in the given directories with dHash,
/// caches fingerprints in a sidecar file for incremental reruns, and reports
/// pairs of files with identical fingerprints.
#[derive(Debug, Parser)]
#[command(name = "imgdupe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directories to process for duplicate images
    #[arg(value_name = "DIR", required = true)]
    pub dirs: Vec<PathBuf>,

    /// Max number of parallel fingerprint computations
    #[arg(
        short = 'j',
        long = "jobs",
        value_name = "N",
        default_value_t = 1,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub jobs: u64,

    /// Print fingerprint and path for every newly computed file
    /// (-vv additionally enables trace logging)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// On each duplicate pair, print size/resolution/md5 metadata and open
    /// the viewer named by the IMGDUPE_VIEWER environment variable
    #[arg(long)]
    pub visual: bool,

    /// Recognized image extensions (can be specified multiple times;
    /// replaces the default set)
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Keep cache entries for files that no longer exist
    #[arg(long)]
    pub no_prune: bool,

    /// Report fatal errors as structured JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}

impl Cli {
    /// Parallelism level as a usize (clap already enforces >= 1).
    #[must_use]
    pub fn jobs(&self) -> usize {
        self.jobs as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_minimal() {
        let cli = Cli::try_parse_from(["imgdupe", "/photos"]).unwrap();
        assert_eq!(cli.dirs, vec![PathBuf::from("/photos")]);
        assert_eq!(cli.jobs, 1);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.visual);
        assert!(!cli.no_prune);
    }

    #[test]
    fn test_cli_parse_multiple_dirs() {
        let cli = Cli::try_parse_from(["imgdupe", "/a", "/b", "/c"]).unwrap();
        assert_eq!(cli.dirs.len(), 3);
    }

    #[test]
    fn test_cli_requires_a_directory() {
        assert!(Cli::try_parse_from(["imgdupe"]).is_err());
    }

    #[test]
    fn test_cli_jobs_flag() {
        let cli = Cli::try_parse_from(["imgdupe", "-j", "4", "/photos"]).unwrap();
        assert_eq!(cli.jobs(), 4);

        let cli = Cli::try_parse_from(["imgdupe", "--jobs", "16", "/photos"]).unwrap();
        assert_eq!(cli.jobs(), 16);
    }

    #[test]
    fn test_cli_jobs_rejects_zero() {
        assert!(Cli::try_parse_from(["imgdupe", "-j", "0", "/photos"]).is_err());
    }

    #[test]
    fn test_cli_verbose_count() {
        let cli = Cli::try_parse_from(["imgdupe", "-vv", "/photos"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["imgdupe", "-v", "-q", "/photos"]).is_err());
    }

    #[test]
    fn test_cli_ext_repeatable() {
        let cli =
            Cli::try_parse_from(["imgdupe", "--ext", "jpg", "--ext", "heic", "/photos"]).unwrap();
        assert_eq!(cli.extensions, vec!["jpg", "heic"]);
    }

    #[test]
    fn test_cli_visual_and_json_errors() {
        let cli = Cli::try_parse_from(["imgdupe", "--visual", "--json-errors", "/p"]).unwrap();
        assert!(cli.visual);
        assert!(cli.json_errors);
    }
}
