//! Error types and exit code mapping for routefix.
//!
//! The error taxonomy is small by design:
//! - file-level I/O and decode errors are recoverable (the file is skipped
//!   and the walk continues),
//! - a missing root directory aborts the run before the walk starts.
//!
//! A file that simply does not contain the outdated declaration is not an
//! error at all; it is the normal not-applicable outcome and never surfaces
//! here.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Exit codes for the CLI.
///
/// - `2`: invalid arguments (e.g. the root directory does not exist)
/// - `1`: the run finished but at least one file had to be skipped due to an
///   I/O or decode error
/// - `0`: clean run, including runs that fixed nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    Success = 0,
    SkippedFiles = 1,
    InvalidArguments = 2,
}

impl ExitStatus {
    /// Get the numeric code value.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

/// Unified error type for routefix operations.
#[derive(Debug, Error)]
pub enum FixError {
    /// The configured root directory does not exist or is not a directory.
    #[error("root directory not found: {path}")]
    RootNotFound { path: PathBuf },

    /// Reading or writing a candidate file failed.
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A candidate file is not valid UTF-8.
    #[error("file is not valid UTF-8: {path}")]
    Decode { path: PathBuf },
}

impl FixError {
    /// Create an IO error for a path.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        FixError::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a decode error for a path.
    pub fn decode(path: impl Into<PathBuf>) -> Self {
        FixError::Decode { path: path.into() }
    }

    /// Whether the run can continue past this error by skipping the file.
    pub fn is_recoverable(&self) -> bool {
        match self {
            FixError::RootNotFound { .. } => false,
            FixError::Io { .. } | FixError::Decode { .. } => true,
        }
    }
}

/// Result type for routefix operations.
pub type FixResult<T> = Result<T, FixError>;

// ============================================================================
// Tests
// ============================================================================
