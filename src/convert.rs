//! Batch conversion entry points.
//!
//! ## Why collect results instead of propagating?
//!
//! One corrupt or unreadable file must not sink the other forty-nine. Each
//! job runs in isolation: its outcome — success or a typed
//! [`JobError`] — is recorded in a [`JobResult`] and the loop moves on.
//! Only conditions that make the whole run meaningless (bad manifest,
//! input path not a directory, output directory uncreatable) surface as
//! `Err(BatchError)`, and all of them fire before the first file is
//! touched.

use crate::config::BatchConfig;
use crate::error::{BatchError, JobError};
use crate::output::{BatchOutput, BatchStats, JobResult};
use crate::pipeline::discover::{self, ConversionJob};
use crate::pipeline::input;
use crate::pipeline::render::{title_for, Markdown2PdfRenderer, PdfRenderer, RenderRequest};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Convert every top-level Markdown file in a directory to a PDF.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `input_dir` — directory whose immediate `.md` files are converted
/// * `config`    — batch configuration
///
/// # Returns
/// `Ok(BatchOutput)` whenever the run itself could proceed, even if some
/// or all individual files failed (check `output.stats.failed`). An empty
/// directory yields an empty, successful batch.
///
/// # Errors
/// Returns `Err(BatchError)` only for run-fatal conditions:
/// - input path is not a directory
/// - the directory listing failed
/// - the output subfolder could not be created
pub fn convert_batch(
    input_dir: impl AsRef<Path>,
    config: &BatchConfig,
) -> Result<BatchOutput, BatchError> {
    let total_start = Instant::now();

    // ── Step 1: Validate input directory ─────────────────────────────────
    let input_dir = input::resolve_input_dir(input_dir.as_ref())?;
    info!("Starting batch conversion: {}", input_dir.display());

    // ── Step 2: Resolve renderer ─────────────────────────────────────────
    let renderer = resolve_renderer(config);

    // ── Step 3: Create output directory (idempotent) ─────────────────────
    let output_dir = input_dir.join(&config.output_subdir);
    std::fs::create_dir_all(&output_dir).map_err(|e| BatchError::OutputDirFailed {
        path: output_dir.clone(),
        source: e,
    })?;

    // ── Step 4: Discover jobs ────────────────────────────────────────────
    let jobs = discover::discover_jobs(&input_dir, &output_dir, config.sort_files)?;
    let total = jobs.len();
    if total == 0 {
        info!("No Markdown files found in {}", input_dir.display());
        return Ok(BatchOutput {
            output_dir,
            jobs: Vec::new(),
            stats: BatchStats {
                total_duration_ms: total_start.elapsed().as_millis() as u64,
                ..BatchStats::default()
            },
        });
    }

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_start(total);
    }

    // ── Step 5: Convert, one file at a time ──────────────────────────────
    let mut results = Vec::with_capacity(total);
    let mut render_duration_ms = 0u64;
    for (i, job) in jobs.iter().enumerate() {
        let job_num = i + 1;
        if let Some(ref cb) = config.progress_callback {
            cb.on_job_start(job_num, total, &job.source_path);
        }

        let (result, render_ms) = run_job(renderer.as_ref(), job, config);
        render_duration_ms += render_ms;

        if let Some(ref cb) = config.progress_callback {
            match result.error {
                None => cb.on_job_complete(job_num, total, result.bytes_written),
                Some(ref e) => cb.on_job_error(job_num, total, &e.to_string()),
            }
        }
        if let Some(ref e) = result.error {
            warn!("{e}");
        }
        results.push(result);
    }

    // ── Step 6: Compute stats ────────────────────────────────────────────
    let converted = results.iter().filter(|r| r.succeeded()).count();
    let failed = total - converted;
    let stats = BatchStats {
        discovered: total,
        converted,
        failed,
        total_bytes: results.iter().map(|r| r.bytes_written).sum(),
        total_duration_ms: total_start.elapsed().as_millis() as u64,
        render_duration_ms,
    };

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_complete(total, converted);
    }
    info!(
        "Batch complete: {}/{} files, {}ms total",
        converted, total, stats.total_duration_ms
    );

    Ok(BatchOutput {
        output_dir,
        jobs: results,
        stats,
    })
}

/// Load a JSON manifest, then run [`convert_batch`] on the directory it
/// names.
pub fn convert_batch_from_manifest(
    manifest_path: impl AsRef<Path>,
    config: &BatchConfig,
) -> Result<BatchOutput, BatchError> {
    let input_dir = input::load_manifest(manifest_path.as_ref())?;
    convert_batch(input_dir, config)
}

/// Convert a single Markdown file to a sibling `<stem>.pdf`.
///
/// The per-file error tier still applies: a read/render/write failure
/// comes back inside the [`JobResult`], not as `Err`. Only a missing
/// source file is fatal.
pub fn convert_file(
    source: impl AsRef<Path>,
    config: &BatchConfig,
) -> Result<JobResult, BatchError> {
    let source = source.as_ref();
    if !source.is_file() {
        return Err(BatchError::SourceNotFound {
            path: source.to_path_buf(),
        });
    }

    let renderer = resolve_renderer(config);
    let job = ConversionJob {
        source_path: source.to_path_buf(),
        target_path: source.with_extension("pdf"),
    };
    let (result, _render_ms) = run_job(renderer.as_ref(), &job, config);
    Ok(result)
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Use the injected renderer if one was configured, the bundled engine
/// otherwise.
fn resolve_renderer(config: &BatchConfig) -> Arc<dyn PdfRenderer> {
    match config.renderer {
        Some(ref renderer) => Arc::clone(renderer),
        None => Arc::new(Markdown2PdfRenderer),
    }
}

/// Run one job to its terminal state: read → render → write.
///
/// Never returns an error; failures land in [`JobResult::error`]. The
/// second tuple field is the time spent inside the renderer, for
/// [`BatchStats::render_duration_ms`].
fn run_job(
    renderer: &dyn PdfRenderer,
    job: &ConversionJob,
    config: &BatchConfig,
) -> (JobResult, u64) {
    let job_start = Instant::now();
    let mut result = JobResult {
        source_path: job.source_path.clone(),
        target_path: job.target_path.clone(),
        bytes_written: 0,
        duration_ms: 0,
        error: None,
    };

    // Read. UTF-8 decode errors count as read failures.
    let markdown = match std::fs::read_to_string(&job.source_path) {
        Ok(text) => text,
        Err(e) => {
            result.error = Some(JobError::ReadFailed {
                path: job.source_path.clone(),
                detail: e.to_string(),
            });
            result.duration_ms = job_start.elapsed().as_millis() as u64;
            return (result, 0);
        }
    };

    // Render.
    let title = title_for(&job.source_path);
    let request = RenderRequest {
        markdown: &markdown,
        style: &config.stylesheet,
        title: &title,
    };
    let render_start = Instant::now();
    let rendered = renderer.render(&request);
    let render_ms = render_start.elapsed().as_millis() as u64;
    let bytes = match rendered {
        Ok(bytes) => bytes,
        Err(e) => {
            result.error = Some(JobError::RenderFailed {
                path: job.source_path.clone(),
                detail: e.to_string(),
            });
            result.duration_ms = job_start.elapsed().as_millis() as u64;
            return (result, render_ms);
        }
    };

    // Write, via temp file + rename so a failed write leaves no partial
    // PDF at the target path.
    if let Err(e) = write_atomic(&job.target_path, &bytes) {
        result.error = Some(JobError::WriteFailed {
            path: job.source_path.clone(),
            detail: e.to_string(),
        });
        result.duration_ms = job_start.elapsed().as_millis() as u64;
        return (result, render_ms);
    }

    debug!(
        "{} → {} ({} bytes)",
        job.source_path.display(),
        job.target_path.display(),
        bytes.len()
    );
    result.bytes_written = bytes.len() as u64;
    result.duration_ms = job_start.elapsed().as_millis() as u64;
    (result, render_ms)
}

fn write_atomic(target: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let tmp_path = target.with_extension("pdf.tmp");
    std::fs::write(&tmp_path, bytes)?;
    std::fs::rename(&tmp_path, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::render::BoxError;
    use std::collections::HashSet;
    use std::fs;
    use std::sync::Mutex;

    /// Renders a stub "PDF" that records the request, failing for any
    /// title in `fail_titles`.
    struct StubRenderer {
        fail_titles: HashSet<String>,
        seen_titles: Mutex<Vec<String>>,
    }

    impl StubRenderer {
        fn new<const N: usize>(fail_titles: [&str; N]) -> Arc<Self> {
            Arc::new(Self {
                fail_titles: fail_titles.iter().map(|s| s.to_string()).collect(),
                seen_titles: Mutex::new(Vec::new()),
            })
        }
    }

    impl PdfRenderer for StubRenderer {
        fn render(&self, request: &RenderRequest<'_>) -> Result<Vec<u8>, BoxError> {
            self.seen_titles.lock().unwrap().push(request.title.to_string());
            if self.fail_titles.contains(request.title) {
                return Err(format!("stub failure for '{}'", request.title).into());
            }
            Ok(format!("%PDF-stub {} {}", request.title, request.markdown.len()).into_bytes())
        }
    }

    fn fixture_dir(names: &[&str]) -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        for name in names {
            fs::write(tmp.path().join(name), format!("# {name}\n\nBody text.\n")).unwrap();
        }
        tmp
    }

    fn config_with(renderer: Arc<dyn PdfRenderer>) -> BatchConfig {
        BatchConfig::builder().renderer(renderer).build().unwrap()
    }

    #[test]
    fn batch_converts_every_markdown_file() {
        let tmp = fixture_dir(&["a.md", "b.md", "c.md"]);
        let stub = StubRenderer::new([]);
        let out = convert_batch(tmp.path(), &config_with(stub.clone())).unwrap();

        assert_eq!(out.stats.discovered, 3);
        assert_eq!(out.stats.converted, 3);
        assert_eq!(out.stats.failed, 0);
        for job in &out.jobs {
            assert!(job.succeeded());
            assert!(job.target_path.is_file(), "{:?}", job.target_path);
        }
        assert_eq!(
            *stub.seen_titles.lock().unwrap(),
            vec!["a", "b", "c"] // sorted by default
        );
    }

    #[test]
    fn one_failing_job_does_not_halt_the_batch() {
        let tmp = fixture_dir(&["a.md", "bad.md", "z.md"]);
        let stub = StubRenderer::new(["bad"]);
        let out = convert_batch(tmp.path(), &config_with(stub)).unwrap();

        assert_eq!(out.stats.converted, 2);
        assert_eq!(out.stats.failed, 1);
        let failed: Vec<_> = out.failures().collect();
        assert_eq!(failed.len(), 1);
        assert!(failed[0].source_path.ends_with("bad.md"));
        assert!(!failed[0].target_path.exists());
        assert!(out.output_dir.join("a.pdf").is_file());
        assert!(out.output_dir.join("z.pdf").is_file());
    }

    #[test]
    fn invalid_utf8_source_is_an_isolated_read_failure() {
        let tmp = fixture_dir(&["good.md"]);
        fs::write(tmp.path().join("binary.md"), [0xFF, 0xFE, 0x00, 0x01]).unwrap();

        let out = convert_batch(tmp.path(), &config_with(StubRenderer::new([]))).unwrap();
        assert_eq!(out.stats.converted, 1);
        assert_eq!(out.stats.failed, 1);
        let failed = out.failures().next().unwrap();
        assert!(matches!(failed.error, Some(JobError::ReadFailed { .. })));
    }

    #[test]
    fn empty_directory_is_a_clean_empty_batch() {
        let tmp = tempfile::tempdir().unwrap();
        let out = convert_batch(tmp.path(), &config_with(StubRenderer::new([]))).unwrap();
        assert!(out.is_empty());
        assert_eq!(out.stats.discovered, 0);
    }

    #[test]
    fn second_run_over_unchanged_input_succeeds() {
        let tmp = fixture_dir(&["a.md"]);
        let config = config_with(StubRenderer::new([]));

        let first = convert_batch(tmp.path(), &config).unwrap();
        let second = convert_batch(tmp.path(), &config).unwrap();

        assert_eq!(first.stats.converted, 1);
        assert_eq!(second.stats.converted, 1);
        let first_bytes = fs::read(&first.jobs[0].target_path).unwrap();
        let second_bytes = fs::read(&second.jobs[0].target_path).unwrap();
        assert_eq!(first_bytes, second_bytes);
    }

    #[test]
    fn non_directory_input_is_run_fatal() {
        let tmp = fixture_dir(&["a.md"]);
        let err = convert_batch(
            tmp.path().join("a.md"),
            &config_with(StubRenderer::new([])),
        )
        .unwrap_err();
        assert!(matches!(err, BatchError::InputPathInvalid { .. }), "{err}");
    }

    #[test]
    fn single_file_mode_writes_a_sibling_pdf() {
        let tmp = fixture_dir(&["standalone.md"]);
        let result =
            convert_file(tmp.path().join("standalone.md"), &config_with(StubRenderer::new([])))
                .unwrap();
        assert!(result.succeeded());
        assert_eq!(result.target_path, tmp.path().join("standalone.pdf"));
        assert!(result.target_path.is_file());
    }

    #[test]
    fn single_file_mode_missing_source_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let err = convert_file(tmp.path().join("nope.md"), &config_with(StubRenderer::new([])))
            .unwrap_err();
        assert!(matches!(err, BatchError::SourceNotFound { .. }), "{err}");
    }

    #[test]
    fn unsorted_batches_keep_listing_order_length() {
        let tmp = fixture_dir(&["b.md", "a.md"]);
        let config = BatchConfig::builder()
            .renderer(StubRenderer::new([]))
            .sort_files(false)
            .build()
            .unwrap();
        let out = convert_batch(tmp.path(), &config).unwrap();
        assert_eq!(out.stats.discovered, 2);
    }
}
