//! Duplicate detection over a fingerprint table.

pub mod detector;

pub use detector::{find_duplicates, DuplicateReport};
