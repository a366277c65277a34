//! Progress-callback trait for per-file conversion events.
//!
//! Inject an [`Arc<dyn BatchProgressCallback>`] via
//! [`crate::config::BatchConfigBuilder::progress_callback`] to receive
//! events as the pipeline processes each file.
//!
//! # Why callbacks instead of channels?
//!
//! The callback approach is the least-invasive integration point: callers
//! can forward events to a terminal progress bar, a log file, or a GUI
//! without the library knowing anything about how the host application
//! communicates. Jobs are processed strictly one at a time, so callbacks
//! arrive in order, but the trait is still `Send + Sync` so an
//! implementation can be shared freely.

use std::path::Path;
use std::sync::Arc;

/// Called by the conversion pipeline as it processes each file.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait BatchProgressCallback: Send + Sync {
    /// Called once after discovery, before any file is converted.
    ///
    /// # Arguments
    /// * `total_files` — number of Markdown files that will be processed
    fn on_batch_start(&self, total_files: usize) {
        let _ = total_files;
    }

    /// Called just before a file is read and handed to the engine.
    ///
    /// # Arguments
    /// * `job_num`     — 1-indexed position in the batch
    /// * `total_files` — total files in the batch
    /// * `source`      — the Markdown file being converted
    fn on_job_start(&self, job_num: usize, total_files: usize, source: &Path) {
        let _ = (job_num, total_files, source);
    }

    /// Called when a file's PDF has been written.
    ///
    /// # Arguments
    /// * `job_num`       — 1-indexed position in the batch
    /// * `total_files`   — total files
    /// * `bytes_written` — size of the produced PDF
    fn on_job_complete(&self, job_num: usize, total_files: usize, bytes_written: u64) {
        let _ = (job_num, total_files, bytes_written);
    }

    /// Called when a job fails at any step.
    ///
    /// # Arguments
    /// * `job_num`     — 1-indexed position in the batch
    /// * `total_files` — total files
    /// * `error`       — human-readable error description
    fn on_job_error(&self, job_num: usize, total_files: usize, error: &str) {
        let _ = (job_num, total_files, error);
    }

    /// Called once after every file has been attempted.
    ///
    /// # Arguments
    /// * `total_files`   — total files in the batch
    /// * `success_count` — files that converted without error
    fn on_batch_complete(&self, total_files: usize, success_count: usize) {
        let _ = (total_files, success_count);
    }
}

/// A no-op implementation for callers that don't need progress events.
///
/// This is the default when no callback is configured.
pub struct NoopProgressCallback;

impl BatchProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::BatchConfig`].
pub type ProgressCallback = Arc<dyn BatchProgressCallback>;
