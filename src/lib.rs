//! # md2pdf-batch
//!
//! Batch-convert Markdown documents to styled PDFs.
//!
//! ## Why this crate?
//!
//! Turning a folder of notes into PDFs is usually a throwaway script — and
//! throwaway scripts abort on the first bad file, scatter output next to
//! the sources, and report nothing. This crate keeps the pleasant parts
//! (point it at a directory, get PDFs in a subfolder) and fixes the rest:
//! per-file failures are isolated and reported, output placement is
//! deterministic, and the rendering engine sits behind a seam so the batch
//! logic is testable without producing a single real PDF.
//!
//! ## Pipeline Overview
//!
//! ```text
//! directory or JSON manifest
//!  │
//!  ├─ 1. Input     resolve and validate the input directory
//!  ├─ 2. Discover  list immediate *.md files (non-recursive, sorted)
//!  ├─ 3. Convert   per file: read UTF-8 → render via engine → write PDF
//!  └─ 4. Output    per-job results + batch stats
//! ```
//!
//! Stages run strictly in sequence; one file is read, rendered, and
//! written before the next begins.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use md2pdf_batch::{convert_batch, BatchConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BatchConfig::default();
//!     let output = convert_batch("./notes", &config)?;
//!     println!(
//!         "{}/{} files converted into {}",
//!         output.stats.converted,
//!         output.stats.discovered,
//!         output.output_dir.display()
//!     );
//!     for failure in output.failures() {
//!         eprintln!("failed: {}", failure.error.as_ref().unwrap());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error model
//!
//! Run-fatal conditions (bad manifest, input path not a directory, output
//! directory uncreatable) return [`BatchError`] before any file is
//! processed. Everything per-file — unreadable source, engine failure,
//! unwritable target — lands in [`JobResult::error`] as a [`JobError`]
//! and never halts the batch. [`BatchOutput::into_result`] gives strict
//! semantics to callers that want them.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `md2pdf` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only
//! deps:
//! ```toml
//! md2pdf-batch = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod style;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{BatchConfig, BatchConfigBuilder, DEFAULT_OUTPUT_SUBDIR};
pub use convert::{convert_batch, convert_batch_from_manifest, convert_file};
pub use error::{BatchError, JobError};
pub use output::{BatchOutput, BatchStats, JobResult, JobStatus};
pub use pipeline::discover::ConversionJob;
pub use pipeline::input::DEFAULT_MANIFEST_NAME;
pub use pipeline::render::{BoxError, Markdown2PdfRenderer, PdfRenderer, RenderRequest};
pub use progress::{BatchProgressCallback, NoopProgressCallback, ProgressCallback};
pub use style::{StyleSheet, DEFAULT_STYLE_RULES};
