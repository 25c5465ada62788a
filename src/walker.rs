//! Candidate file discovery.
//!
//! Walks a root directory and collects files whose base name exactly matches
//! the configured target filename. Traversal is read-only; unreadable entries
//! are skipped with a warning so one bad directory cannot abort the run.

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

/// Collect candidate files by walking a directory.
///
/// Respects standard exclusion patterns: hidden directories, `node_modules`,
/// `dist`, `target`, and `.next` build output. Exclusions are checked on the
/// root-relative path so temp-directory names like `.tmpXXX` in the root's
/// own path do not suppress the whole walk.
///
/// Entries are yielded in sorted order so a run over a fixed filesystem
/// snapshot is deterministic.
pub fn collect_target_files(root: &Path, target_filename: &str) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let walk = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    for entry in walk {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "skipping unreadable directory entry");
                continue;
            }
        };
        let path = entry.path();

        let rel_path = match path.strip_prefix(root) {
            Ok(p) => p,
            Err(_) => continue,
        };

        if is_excluded(rel_path) {
            continue;
        }

        if entry.file_type().is_file()
            && path.file_name().is_some_and(|name| name == target_filename)
        {
            files.push(path.to_path_buf());
        }
    }

    files
}

/// Check whether a root-relative path falls inside an excluded directory.
fn is_excluded(rel_path: &Path) -> bool {
    rel_path.components().any(|c| {
        let name = c.as_os_str().to_string_lossy();
        name.starts_with('.') || name == "node_modules" || name == "dist" || name == "target"
    })
}

// ============================================================================
// Tests
// ============================================================================
