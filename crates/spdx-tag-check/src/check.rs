//! Read documents from disk and report on each one.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use spdx_tag::parse_document;

use crate::config::CheckConfig;
use crate::error::CheckError;
use crate::report::{write_errors, write_summary};

/// Outcome of checking one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The document parsed without errors.
    Clean,
    /// The document has this many bad lines.
    Failed(usize),
}

/// Check a single document, writing its report to `out`.
///
/// # Errors
/// Returns [`CheckError::Read`] when the file cannot be read and
/// [`CheckError::Write`] when the report cannot be written.
pub fn check_file(
    config: &CheckConfig,
    path: &Path,
    out: &mut dyn Write,
) -> Result<Verdict, CheckError> {
    let source = fs::read_to_string(path).map_err(|source| CheckError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = source.len(), "checking document");

    match parse_document(&source, config.builder_options()) {
        Ok(document) => {
            write_summary(out, path, &document)?;
            Ok(Verdict::Clean)
        }
        Err(errors) => {
            warn!(path = %path.display(), errors = errors.len(), "document has errors");
            write_errors(out, path, &errors)?;
            Ok(Verdict::Failed(errors.len()))
        }
    }
}

/// Check every document in `paths`, in order.
///
/// Unreadable files are reported and count as failures; the run carries on
/// with the remaining paths.
///
/// # Errors
/// Returns [`CheckError::Write`] when the report cannot be written.
pub fn check_all(
    config: &CheckConfig,
    paths: &[PathBuf],
    out: &mut dyn Write,
) -> Result<bool, CheckError> {
    let mut clean = true;
    for path in paths {
        match check_file(config, path, out) {
            Ok(Verdict::Clean) => {}
            Ok(Verdict::Failed(_)) => clean = false,
            Err(err @ CheckError::Read { .. }) => {
                writeln!(out, "{err}")?;
                clean = false;
            }
            Err(err) => return Err(err),
        }
    }
    Ok(clean)
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn workspace() -> TempDir {
        TempDir::new().expect("failed to create temp dir")
    }

    fn write_doc(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).expect("failed to write document");
        path
    }

    #[rstest]
    fn clean_document_yields_summary(workspace: TempDir) {
        let path = write_doc(&workspace, "ok.spdx", "SPDXVersion: SPDX-1.2\nPackageName: p\n");
        let mut out = Vec::new();
        let verdict =
            check_file(&CheckConfig::default(), &path, &mut out).expect("check should run");
        assert_eq!(verdict, Verdict::Clean);
        let text = String::from_utf8(out).expect("report is utf-8");
        assert!(text.contains("ok (SPDX-1.2, 1 package(s), 0 file(s))"));
    }

    #[rstest]
    fn strict_config_fails_on_unknown_tags(workspace: TempDir) {
        let path = write_doc(&workspace, "odd.spdx", "Reviewer: Person: Joe\n");
        let strict = CheckConfig::default().apply_overrides(None, Some(true));
        let mut out = Vec::new();
        assert_eq!(
            check_file(&CheckConfig::default(), &path, &mut out).expect("check should run"),
            Verdict::Clean
        );
        assert_eq!(
            check_file(&strict, &path, &mut out).expect("check should run"),
            Verdict::Failed(1)
        );
    }

    #[rstest]
    fn missing_file_is_reported_and_run_continues(workspace: TempDir) {
        let good = write_doc(&workspace, "ok.spdx", "PackageName: p\n");
        let missing = workspace.path().join("missing.spdx");
        let mut out = Vec::new();
        let clean = check_all(&CheckConfig::default(), &[missing, good], &mut out)
            .expect("check should run");
        assert!(!clean);
        let text = String::from_utf8(out).expect("report is utf-8");
        assert!(text.contains("failed to read"));
        assert!(text.contains("ok.spdx: ok"));
    }
}
