//! Run summary types and rendering.
//!
//! Plain mode mirrors the original migration script's output: one
//! `Fixing: <path>` line per modified file and a closing count. `--json`
//! swaps the closing line for a serialized [`RunSummary`], keeping stdout
//! machine-readable end to end (fix lines are suppressed in that mode).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Outcome of one run: what was scanned, fixed, and skipped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    /// Candidate files visited by the walker.
    pub files_scanned: u32,
    /// Files rewritten (or, in dry-run mode, that would have been).
    pub files_fixed: u32,
    /// Files skipped because of I/O or decode errors.
    pub files_skipped: u32,
    /// Paths of the fixed files, in walk order.
    pub fixed: Vec<PathBuf>,
    /// Whether writes were suppressed.
    pub dry_run: bool,
}

impl RunSummary {
    /// Create an empty summary for a run.
    pub fn new(dry_run: bool) -> Self {
        RunSummary {
            dry_run,
            ..RunSummary::default()
        }
    }

    /// Record a fixed file.
    pub fn record_fixed(&mut self, path: PathBuf) {
        self.files_fixed += 1;
        self.fixed.push(path);
    }

    /// Record a file skipped due to an error.
    pub fn record_skipped(&mut self) {
        self.files_skipped += 1;
    }

    /// Whether any file had to be skipped.
    pub fn has_skipped(&self) -> bool {
        self.files_skipped > 0
    }

    /// The plain-text closing line.
    pub fn summary_line(&self) -> String {
        if self.dry_run {
            format!("Would fix {} route files (dry run)", self.files_fixed)
        } else {
            format!("Fixed {} route files!", self.files_fixed)
        }
    }
}

/// One `Fixing: <path>` line, printed as each file is rewritten.
pub fn fix_line(path: &std::path::Path) -> String {
    format!("Fixing: {}", path.display())
}

// ============================================================================
// Tests
// ============================================================================
