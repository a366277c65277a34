//! File discovery: list a directory's immediate Markdown files and pair
//! each with its target path.
//!
//! ## Why non-recursive?
//!
//! The batch contract is one directory level: `<input>/<stem>.md` becomes
//! `<input>/<subdir>/<stem>.pdf`. Recursing would force a policy for name
//! collisions between subdirectories ("a/x.md" vs "b/x.md" both wanting
//! `x.pdf`); a flat listing keeps the target-uniqueness invariant free.
//! The output subfolder itself is a directory and is skipped like any
//! other non-file entry, so a second run never re-discovers its own output.

use crate::error::BatchError;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// One source-to-target mapping, produced by discovery and consumed by the
/// converter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    /// Markdown file found directly inside the input directory.
    pub source_path: PathBuf,
    /// `<output_dir>/<stem>.pdf`.
    pub target_path: PathBuf,
}

/// List the Markdown files directly inside `input_dir`.
///
/// Matching is case-sensitive: only the literal extension `md` counts, so
/// `README.MD` is skipped. Entries that are not regular files (directories,
/// sockets, dangling symlinks) are skipped as well.
///
/// With `sort` the jobs come back ordered by file name; otherwise the
/// filesystem's listing order is preserved, whatever it is.
///
/// An empty result is a valid outcome, not an error.
pub fn discover_jobs(
    input_dir: &Path,
    output_dir: &Path,
    sort: bool,
) -> Result<Vec<ConversionJob>, BatchError> {
    let entries = std::fs::read_dir(input_dir).map_err(|e| BatchError::DiscoveryFailed {
        path: input_dir.to_path_buf(),
        source: e,
    })?;

    let mut jobs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| BatchError::DiscoveryFailed {
            path: input_dir.to_path_buf(),
            source: e,
        })?;

        let is_file = match entry.file_type() {
            Ok(t) => t.is_file(),
            Err(e) => {
                warn!("Skipping unreadable entry {:?}: {}", entry.file_name(), e);
                false
            }
        };
        if !is_file {
            continue;
        }

        let source_path = entry.path();
        if source_path.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }

        let mut target_path = output_dir.join(entry.file_name());
        target_path.set_extension("pdf");
        jobs.push(ConversionJob {
            source_path,
            target_path,
        });
    }

    if sort {
        jobs.sort_by(|a, b| a.source_path.file_name().cmp(&b.source_path.file_name()));
    }

    debug!(
        "Discovered {} Markdown file(s) in {}",
        jobs.len(),
        input_dir.display()
    );
    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "# x\n").unwrap();
    }

    #[test]
    fn finds_only_markdown_files() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "b.md");
        touch(tmp.path(), "a.md");
        touch(tmp.path(), "notes.txt");
        touch(tmp.path(), "archive.tar.md"); // double extension still counts
        fs::create_dir(tmp.path().join("nested")).unwrap();
        touch(&tmp.path().join("nested"), "inner.md"); // not recursed into

        let out = tmp.path().join("pdf");
        let jobs = discover_jobs(tmp.path(), &out, true).unwrap();
        let names: Vec<_> = jobs
            .iter()
            .map(|j| j.source_path.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.md", "archive.tar.md", "b.md"]);
    }

    #[test]
    fn extension_match_is_case_sensitive() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "README.MD");
        touch(tmp.path(), "Mixed.Md");
        touch(tmp.path(), "lower.md");

        let jobs = discover_jobs(tmp.path(), &tmp.path().join("pdf"), true).unwrap();
        assert_eq!(jobs.len(), 1);
        assert!(jobs[0].source_path.ends_with("lower.md"));
    }

    #[test]
    fn directories_with_md_suffix_are_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("folder.md")).unwrap();
        touch(tmp.path(), "real.md");

        let jobs = discover_jobs(tmp.path(), &tmp.path().join("pdf"), true).unwrap();
        assert_eq!(jobs.len(), 1);
    }

    #[test]
    fn targets_land_in_output_dir_with_pdf_extension() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "chapter one.md");

        let out = tmp.path().join("rendered");
        let jobs = discover_jobs(tmp.path(), &out, true).unwrap();
        assert_eq!(jobs[0].target_path, out.join("chapter one.pdf"));
    }

    #[test]
    fn target_paths_are_unique() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["a.md", "b.md", "c.md"] {
            touch(tmp.path(), name);
        }
        let jobs = discover_jobs(tmp.path(), &tmp.path().join("pdf"), false).unwrap();
        let mut targets: Vec<_> = jobs.iter().map(|j| &j.target_path).collect();
        targets.sort();
        targets.dedup();
        assert_eq!(targets.len(), jobs.len());
    }

    #[test]
    fn empty_directory_yields_empty_batch() {
        let tmp = tempfile::tempdir().unwrap();
        let jobs = discover_jobs(tmp.path(), &tmp.path().join("pdf"), true).unwrap();
        assert!(jobs.is_empty());
    }

    #[test]
    fn missing_directory_is_discovery_failed() {
        let tmp = tempfile::tempdir().unwrap();
        let gone = tmp.path().join("gone");
        let err = discover_jobs(&gone, &gone.join("pdf"), true).unwrap_err();
        assert!(matches!(err, BatchError::DiscoveryFailed { .. }), "{err}");
    }
}
