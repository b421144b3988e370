//! Fingerprint caching module for imgdupe.
//!
//! Persistent storage for perceptual fingerprints so subsequent runs skip
//! re-fingerprinting files that are already known.
//!
//! # Architecture
//!
//! * [`store`]: Handles the JSON sidecar file: loading, atomic persistence,
//!   and pruning of entries whose file no longer exists.
//!
//! The cache lives as a single hidden JSON object file inside the processed
//! directory, keyed by paths relative to that directory. A missing sidecar is
//! an empty cache; a sidecar that exists but fails to parse is a fatal
//! condition, since silently discarding it would recompute everything without
//! signaling the real problem to the operator.
//!
//! Concurrent invocations against the same directory are not supported and
//! may corrupt the sidecar.

pub mod store;

pub use store::{CacheError, CacheStore, FingerprintTable, CACHE_FILE_NAME};
