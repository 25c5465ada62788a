//! Run orchestration: enumerate, transform, report.
//!
//! A run is a single linear pass: the walker enumerates candidates, each
//! candidate goes through the transformer, and the summary accumulates the
//! outcome. File-level errors are logged and counted but never abort the
//! walk; only a missing root fails the run up front.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{FixError, FixResult};
use crate::report::{fix_line, RunSummary};
use crate::transform::fix_content;
use crate::walker::collect_target_files;

/// Configuration for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Root directory to scan.
    pub root: PathBuf,
    /// File name candidates must match exactly.
    pub target_filename: String,
    /// Report without writing.
    pub dry_run: bool,
}

impl RunConfig {
    /// Create a config with the default target filename.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        RunConfig {
            root: root.into(),
            target_filename: "route.ts".to_string(),
            dry_run: false,
        }
    }
}

/// Walk the tree and fix every applicable candidate.
///
/// `out` receives the per-file `Fixing:` lines; the caller decides what to
/// do with the summary (plain line or JSON). Returns `RootNotFound` if the
/// configured root is not a directory; all file-level errors are recorded
/// in the summary instead of propagating.
pub fn run(config: &RunConfig, out: &mut impl Write) -> FixResult<RunSummary> {
    if !config.root.is_dir() {
        return Err(FixError::RootNotFound {
            path: config.root.clone(),
        });
    }

    let mut summary = RunSummary::new(config.dry_run);

    for path in collect_target_files(&config.root, &config.target_filename) {
        summary.files_scanned += 1;

        match fix_file(&path, config.dry_run) {
            Ok(Some(())) => {
                info!(path = %path.display(), "fixed");
                // Reporting failures mean stdout is gone; nothing to recover.
                let _ = writeln!(out, "{}", fix_line(&path));
                summary.record_fixed(path);
            }
            Ok(None) => {
                debug!(path = %path.display(), "not applicable");
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping file");
                summary.record_skipped();
            }
        }
    }

    Ok(summary)
}

/// Transform one candidate file in place.
///
/// Returns `Ok(Some(()))` when the file was applicable (written back unless
/// `dry_run`), `Ok(None)` when it was a no-op.
fn fix_file(path: &Path, dry_run: bool) -> FixResult<Option<()>> {
    let bytes = fs::read(path).map_err(|e| FixError::io(path, e))?;
    let content = String::from_utf8(bytes).map_err(|_| FixError::decode(path))?;

    let Some(fixed) = fix_content(&content) else {
        return Ok(None);
    };

    if !dry_run {
        fs::write(path, fixed).map_err(|e| FixError::io(path, e))?;
    }

    Ok(Some(()))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{NEW_PARAMS_DECL, OLD_PARAMS_DECL};
    use tempfile::TempDir;

    fn applicable_source() -> String {
        format!(
            "export async function GET(req, {OLD_PARAMS_DECL}) {{ try {{ return ok(params.id); }} }}\n"
        )
    }

    fn clean_source() -> &'static str {
        "export async function GET(req: Request) { return ok(); }\n"
    }

    fn write_file(dir: &Path, rel: &str, content: &str) -> PathBuf {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    fn run_collecting(config: &RunConfig) -> (RunSummary, String) {
        let mut out = Vec::new();
        let summary = run(config, &mut out).unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn fixes_only_applicable_files() {
        let tree = TempDir::new().unwrap();
        write_file(tree.path(), "api/a/route.ts", &applicable_source());
        write_file(tree.path(), "api/b/route.ts", &applicable_source());
        write_file(tree.path(), "api/c/route.ts", clean_source());
        write_file(tree.path(), "api/d/route.ts", clean_source());
        write_file(tree.path(), "api/e/route.ts", clean_source());

        let (summary, output) = run_collecting(&RunConfig::new(tree.path()));

        assert_eq!(summary.files_scanned, 5);
        assert_eq!(summary.files_fixed, 2);
        assert_eq!(summary.files_skipped, 0);
        assert_eq!(output.matches("Fixing: ").count(), 2);
        assert_eq!(summary.summary_line(), "Fixed 2 route files!");
    }

    #[test]
    fn rewrites_content_on_disk() {
        let tree = TempDir::new().unwrap();
        let path = write_file(tree.path(), "api/route.ts", &applicable_source());

        run_collecting(&RunConfig::new(tree.path()));

        let after = fs::read_to_string(&path).unwrap();
        assert!(after.contains(NEW_PARAMS_DECL));
        assert!(!after.contains(OLD_PARAMS_DECL));
    }

    #[test]
    fn untouched_files_are_byte_identical() {
        let tree = TempDir::new().unwrap();
        let path = write_file(tree.path(), "api/route.ts", clean_source());

        let (summary, _) = run_collecting(&RunConfig::new(tree.path()));

        assert_eq!(summary.files_fixed, 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), clean_source());
    }

    #[test]
    fn dry_run_reports_without_writing() {
        let tree = TempDir::new().unwrap();
        let path = write_file(tree.path(), "api/route.ts", &applicable_source());

        let mut config = RunConfig::new(tree.path());
        config.dry_run = true;
        let (summary, output) = run_collecting(&config);

        assert_eq!(summary.files_fixed, 1);
        assert!(output.contains("Fixing: "));
        assert_eq!(fs::read_to_string(&path).unwrap(), applicable_source());
    }

    #[test]
    fn second_run_fixes_nothing() {
        let tree = TempDir::new().unwrap();
        let path = write_file(tree.path(), "api/route.ts", &applicable_source());

        run_collecting(&RunConfig::new(tree.path()));
        let after_first = fs::read_to_string(&path).unwrap();

        let (summary, _) = run_collecting(&RunConfig::new(tree.path()));
        assert_eq!(summary.files_fixed, 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), after_first);
    }

    #[test]
    fn non_utf8_file_is_skipped_and_counted() {
        let tree = TempDir::new().unwrap();
        let path = tree.path().join("route.ts");
        fs::write(&path, [0xff, 0xfe, 0x00, b'x']).unwrap();

        let (summary, output) = run_collecting(&RunConfig::new(tree.path()));

        assert_eq!(summary.files_scanned, 1);
        assert_eq!(summary.files_skipped, 1);
        assert_eq!(summary.files_fixed, 0);
        assert!(summary.has_skipped());
        assert!(output.is_empty());
    }

    #[test]
    fn missing_root_is_an_error() {
        let mut out = Vec::new();
        let config = RunConfig::new("/definitely/not/a/real/root");
        let err = run(&config, &mut out).unwrap_err();
        assert!(matches!(err, FixError::RootNotFound { .. }));
    }
}
