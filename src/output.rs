//! Output types: per-job results and whole-batch statistics.
//!
//! A batch run always produces a [`BatchOutput`] when it gets past the
//! run-fatal checks, even if every individual file failed — per-file
//! outcomes live in [`JobResult::error`], never in the top-level `Result`.
//! [`BatchOutput::into_result`] converts to strict semantics for callers
//! that prefer an `Err` on any failure.

use crate::error::{BatchError, JobError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Terminal state of one conversion job.
///
/// A job not yet processed has no result at all, so only the two terminal
/// states appear here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    /// The PDF was rendered and written to the target path.
    Succeeded,
    /// The job stopped at reading, rendering, or writing.
    Failed,
}

/// Outcome of converting one source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResult {
    /// The Markdown file this job read.
    pub source_path: PathBuf,
    /// Where the PDF was (or would have been) written.
    pub target_path: PathBuf,
    /// Size of the written PDF in bytes; 0 when the job failed.
    pub bytes_written: u64,
    /// Wall-clock time spent on this job.
    pub duration_ms: u64,
    /// `None` on success; the per-file error otherwise.
    pub error: Option<JobError>,
}

impl JobResult {
    /// Terminal status, derived from [`Self::error`].
    pub fn status(&self) -> JobStatus {
        if self.error.is_none() {
            JobStatus::Succeeded
        } else {
            JobStatus::Failed
        }
    }

    /// True when the PDF exists at [`Self::target_path`].
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregate counters for a batch run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchStats {
    /// Markdown files found by the discoverer.
    pub discovered: usize,
    /// Jobs that produced a PDF.
    pub converted: usize,
    /// Jobs that recorded a [`JobError`].
    pub failed: usize,
    /// Total bytes of PDF output written.
    pub total_bytes: u64,
    /// Wall-clock time for the whole run.
    pub total_duration_ms: u64,
    /// Cumulative time spent inside the rendering engine.
    pub render_duration_ms: u64,
}

/// Everything a batch run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutput {
    /// The output directory all targets were placed in.
    pub output_dir: PathBuf,
    /// One result per discovered file, in processing order.
    pub jobs: Vec<JobResult>,
    /// Aggregate counters.
    pub stats: BatchStats,
}

impl BatchOutput {
    /// True when the discoverer found no Markdown files at all.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// The jobs that failed, in processing order.
    pub fn failures(&self) -> impl Iterator<Item = &JobResult> {
        self.jobs.iter().filter(|j| !j.succeeded())
    }

    /// Strict view: `Err(PartialFailure)` if any job failed.
    ///
    /// The default semantics (per-file failures never abort the batch) are
    /// unchanged; this is an opt-in for callers such as `md2pdf --strict`.
    pub fn into_result(self) -> Result<BatchOutput, BatchError> {
        if self.stats.failed > 0 {
            Err(BatchError::PartialFailure {
                converted: self.stats.converted,
                failed: self.stats.failed,
                total: self.stats.discovered,
            })
        } else {
            Ok(self)
        }
    }
}
