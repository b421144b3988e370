//! Structured error handling and exit codes.

use serde::Serialize;

/// Exit codes for the imgdupe application.
///
/// - 0: Success (all directories processed, every candidate fingerprinted)
/// - 1: General error (a fatal condition aborted the run)
/// - 3: Partial success (run completed, but some files failed to fingerprint)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: Every directory was processed without per-file failures.
    Success = 0,
    /// General error: A fatal condition aborted the run.
    GeneralError = 1,
    /// Partial success: Some candidates failed to fingerprint.
    PartialSuccess = 3,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "ID000",
            Self::GeneralError => "ID001",
            Self::PartialSuccess => "ID003",
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "ID001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{err:#}"),
        }
    }
}
