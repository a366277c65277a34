//! Error types for the md2pdf-batch library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`BatchError`] — **Run-fatal**: the batch cannot proceed at all
//!   (manifest missing or malformed, input path is not a directory, output
//!   directory uncreatable). Returned as `Err(BatchError)` from the
//!   top-level `convert*` functions before any file is processed.
//!
//! * [`JobError`] — **Per-file**: a single source file failed (unreadable
//!   content, engine error, disk write error) but all other files are fine.
//!   Stored inside [`crate::output::JobResult`] so callers can inspect
//!   partial success rather than losing the whole batch to one bad file.
//!
//! No error in the per-file tier ever escalates to run-fatal, and neither
//! tier retries. Callers wanting strict semantics can use
//! [`crate::output::BatchOutput::into_result`].

use std::path::PathBuf;
use thiserror::Error;

/// All run-fatal errors returned by the md2pdf-batch library.
///
/// Per-file failures use [`JobError`] and are stored in
/// [`crate::output::JobResult`] rather than propagated here.
#[derive(Debug, Error)]
pub enum BatchError {
    // ── Configuration errors ──────────────────────────────────────────────
    /// The JSON manifest was not found at the given path.
    #[error("Configuration file not found: '{path}'\nCheck the path exists, or pass an input directory directly.")]
    ConfigNotFound { path: PathBuf },

    /// The manifest exists but is not valid JSON.
    #[error("Configuration file '{path}' is not valid JSON: {detail}")]
    ConfigMalformed { path: PathBuf, detail: String },

    /// The manifest parsed, but the required field is absent or empty.
    #[error("Configuration file '{path}' is missing a value for '{field}'")]
    ConfigFieldMissing { path: PathBuf, field: &'static str },

    /// The resolved input path does not exist or is not a directory.
    #[error("Input path is not a directory: '{path}'")]
    InputPathInvalid { path: PathBuf },

    // ── Input errors ──────────────────────────────────────────────────────
    /// Single-file conversion was asked for a file that does not exist.
    #[error("Markdown file not found: '{path}'\nCheck the path exists and is readable.")]
    SourceNotFound { path: PathBuf },

    /// Listing the (already validated) input directory failed, e.g. it was
    /// removed between the check and the listing.
    #[error("Failed to list input directory '{path}': {source}")]
    DiscoveryFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create the output directory. Already-existing directories
    /// are fine; this fires on permission problems and the like.
    #[error("Failed to create output directory '{path}': {source}")]
    OutputDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Strict view ───────────────────────────────────────────────────────
    /// Some files converted but at least one failed.
    ///
    /// Returned by [`crate::output::BatchOutput::into_result`] when the
    /// caller wants to treat any per-file failure as an error.
    #[error("{failed}/{total} files failed during conversion")]
    PartialFailure {
        converted: usize,
        failed: usize,
        total: usize,
    },
}

/// A per-file error for a single conversion job.
///
/// Stored in [`crate::output::JobResult`] when a job fails.
/// The batch always continues past a failed job.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum JobError {
    /// Reading the source file as UTF-8 text failed.
    #[error("'{path}': failed to read source: {detail}")]
    ReadFailed { path: PathBuf, detail: String },

    /// The rendering engine rejected the document.
    #[error("'{path}': rendering failed: {detail}")]
    RenderFailed { path: PathBuf, detail: String },

    /// Writing the rendered PDF to its target path failed.
    #[error("'{path}': failed to write PDF: {detail}")]
    WriteFailed { path: PathBuf, detail: String },
}

impl JobError {
    /// The source file this error is scoped to.
    pub fn path(&self) -> &PathBuf {
        match self {
            JobError::ReadFailed { path, .. }
            | JobError::RenderFailed { path, .. }
            | JobError::WriteFailed { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_failure_display() {
        let e = BatchError::PartialFailure {
            converted: 9,
            failed: 1,
            total: 10,
        };
        let msg = e.to_string();
        assert!(msg.contains("1/10"), "got: {msg}");
    }

    #[test]
    fn config_field_missing_display() {
        let e = BatchError::ConfigFieldMissing {
            path: PathBuf::from("md2pdf.json"),
            field: "input_directory",
        };
        assert!(e.to_string().contains("input_directory"));
        assert!(e.to_string().contains("md2pdf.json"));
    }

    #[test]
    fn job_error_display_includes_path() {
        let e = JobError::RenderFailed {
            path: PathBuf::from("notes/chapter1.md"),
            detail: "unbalanced fence".into(),
        };
        assert!(e.to_string().contains("chapter1.md"));
        assert!(e.to_string().contains("unbalanced fence"));
    }

    #[test]
    fn job_error_path_accessor() {
        let p = PathBuf::from("a.md");
        for e in [
            JobError::ReadFailed {
                path: p.clone(),
                detail: String::new(),
            },
            JobError::RenderFailed {
                path: p.clone(),
                detail: String::new(),
            },
            JobError::WriteFailed {
                path: p.clone(),
                detail: String::new(),
            },
        ] {
            assert_eq!(e.path(), &p);
        }
    }

    #[test]
    fn job_error_round_trips_through_json() {
        let e = JobError::ReadFailed {
            path: PathBuf::from("b.md"),
            detail: "permission denied".into(),
        };
        let json = serde_json::to_string(&e).unwrap();
        let back: JobError = serde_json::from_str(&json).unwrap();
        assert_eq!(back.path(), e.path());
    }
}
