//! CLI binary for md2pdf-batch.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `BatchConfig`, dispatches on the input kind (directory, Markdown file,
//! or JSON manifest), and prints per-file progress plus a summary.

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use md2pdf_batch::{
    convert_batch, convert_batch_from_manifest, convert_file, BatchConfig, BatchOutput,
    BatchProgressCallback, ProgressCallback, StyleSheet, DEFAULT_MANIFEST_NAME,
};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────

/// Terminal progress callback: a progress bar anchored at the bottom of
/// the terminal, with one ✓/✗ log line per file above it.
struct CliProgressCallback {
    bar: ProgressBar,
    /// Name and start time of the file currently being converted.
    current: Mutex<Option<(String, Instant)>>,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_batch_start

        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            current: Mutex::new(None),
        })
    }

    fn take_current(&self) -> (String, u128) {
        match self.current.lock().unwrap().take() {
            Some((name, start)) => (name, start.elapsed().as_millis()),
            None => (String::new(), 0),
        }
    }
}

impl BatchProgressCallback for CliProgressCallback {
    fn on_batch_start(&self, total_files: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} files  ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");

        self.bar.set_length(total_files as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Converting");
    }

    fn on_job_start(&self, _job_num: usize, _total_files: usize, source: &Path) {
        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.bar.set_message(name.clone());
        *self.current.lock().unwrap() = Some((name, Instant::now()));
    }

    fn on_job_complete(&self, job_num: usize, total_files: usize, bytes_written: u64) {
        let (name, elapsed_ms) = self.take_current();
        self.bar.println(format!(
            "  {} {:>3}/{:<3}  {:<32}  {}  {}",
            green("✓"),
            job_num,
            total_files,
            name,
            dim(&format!("{bytes_written:>7} B")),
            dim(&format!("{:.1}s", elapsed_ms as f64 / 1000.0)),
        ));
        self.bar.inc(1);
    }

    fn on_job_error(&self, job_num: usize, total_files: usize, error: &str) {
        let (name, elapsed_ms) = self.take_current();

        // Truncate very long error messages to keep output tidy.
        let msg = if error.len() > 80 {
            format!("{}\u{2026}", &error[..79])
        } else {
            error.to_string()
        };

        self.bar.println(format!(
            "  {} {:>3}/{:<3}  {:<32}  {}  {}",
            red("✗"),
            job_num,
            total_files,
            name,
            red(&msg),
            dim(&format!("{:.1}s", elapsed_ms as f64 / 1000.0)),
        ));
        self.bar.inc(1);
    }

    fn on_batch_complete(&self, _total_files: usize, _success_count: usize) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert every .md file in a directory into <dir>/pdf/
  md2pdf ./notes

  # Use a JSON manifest (default: ./md2pdf.json)
  md2pdf
  md2pdf batch.json

  # Convert a single file to a sibling .pdf
  md2pdf report.md

  # Custom output subfolder and style rules
  md2pdf ./notes --subdir rendered --style house-style.toml

  # Machine-readable summary, non-zero exit if anything failed
  md2pdf ./notes --json --strict

MANIFEST FORMAT:
  { "input_directory": "/path/to/notes" }

  Extra fields are ignored.

OUTPUT LAYOUT:
  <input_directory>/<subdir>/<stem>.pdf for every <input_directory>/<stem>.md
  (top level only; subdirectories are not searched)

ENVIRONMENT VARIABLES:
  MD2PDF_SUBDIR        Output subfolder name (same as --subdir)
  MD2PDF_STYLE         Style rules file (same as --style)
  MD2PDF_NO_PROGRESS   Disable the progress bar
  MD2PDF_VERBOSE       Enable debug logs
  MD2PDF_QUIET         Errors only
"#;

/// Batch-convert Markdown files to styled PDFs.
#[derive(Parser, Debug)]
#[command(
    name = "md2pdf",
    version,
    about = "Batch-convert Markdown files to styled PDFs",
    long_about = "Convert Markdown documents to PDF: point it at a directory to convert every \
top-level .md file into a pdf/ subfolder, at a single .md file for one-off conversion, or at a \
JSON manifest naming the input directory. One bad file never aborts the batch.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Input directory, Markdown file, or JSON manifest. [default: ./md2pdf.json]
    input: Option<String>,

    /// Name of the output subfolder created inside the input directory.
    #[arg(short, long, env = "MD2PDF_SUBDIR", default_value = "pdf")]
    subdir: String,

    /// Style rules file (TOML) applied to every document.
    #[arg(long, env = "MD2PDF_STYLE")]
    style: Option<PathBuf>,

    /// Use the engine's built-in styling instead of the bundled rules.
    #[arg(long, conflicts_with = "style")]
    engine_style: bool,

    /// Process files in raw directory-listing order instead of sorting by name.
    #[arg(long)]
    no_sort: bool,

    /// Output the batch summary as JSON on stdout.
    #[arg(long, env = "MD2PDF_JSON")]
    json: bool,

    /// Exit non-zero if any file failed to convert.
    #[arg(long, env = "MD2PDF_STRICT")]
    strict: bool,

    /// Disable the progress bar.
    #[arg(long, env = "MD2PDF_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "MD2PDF_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "MD2PDF_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress bar is active;
    // the bar provides all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Dispatch on input kind ───────────────────────────────────────────
    let input = cli
        .input
        .clone()
        .unwrap_or_else(|| DEFAULT_MANIFEST_NAME.to_string());
    let input_path = PathBuf::from(&input);

    if input_path.is_dir() {
        let config = build_config(&cli, show_progress)?;
        let output = convert_batch(&input_path, &config).context("Batch conversion failed")?;
        finish_batch(&cli, output)
    } else if input_path.extension().and_then(|e| e.to_str()) == Some("md") {
        let config = build_config(&cli, false)?;
        let result = convert_file(&input_path, &config).context("Conversion failed")?;
        match result.error {
            None => {
                if !cli.quiet {
                    eprintln!(
                        "{} {} → {}",
                        green("✔"),
                        input_path.display(),
                        bold(&result.target_path.display().to_string()),
                    );
                }
                Ok(())
            }
            Some(e) => bail!("{e}"),
        }
    } else if input_path.extension().and_then(|e| e.to_str()) == Some("json") {
        let config = build_config(&cli, show_progress)?;
        let output =
            convert_batch_from_manifest(&input_path, &config).context("Batch conversion failed")?;
        finish_batch(&cli, output)
    } else {
        bail!(
            "'{}' is not a directory, a .md file, or a .json manifest",
            input_path.display()
        );
    }
}

/// Map CLI args to `BatchConfig`.
fn build_config(cli: &Cli, show_progress: bool) -> Result<BatchConfig> {
    let stylesheet = if cli.engine_style {
        StyleSheet::Default
    } else if let Some(ref path) = cli.style {
        anyhow::ensure!(
            path.is_file(),
            "Style rules file not found: {}",
            path.display()
        );
        StyleSheet::File(path.clone())
    } else {
        StyleSheet::default()
    };

    let mut builder = BatchConfig::builder()
        .output_subdir(&cli.subdir)
        .stylesheet(stylesheet)
        .sort_files(!cli.no_sort);

    if show_progress {
        let cb = CliProgressCallback::new();
        builder = builder.progress_callback(cb as ProgressCallback);
    }

    builder.build().context("Invalid configuration")
}

/// Print the batch summary and apply `--json` / `--strict`.
fn finish_batch(cli: &Cli, output: BatchOutput) -> Result<()> {
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("Failed to serialise summary")?
        );
    } else if !cli.quiet {
        if output.is_empty() {
            eprintln!("{} No Markdown files found — nothing to do", cyan("◆"));
        } else if output.stats.failed == 0 {
            eprintln!(
                "{} {} file(s) converted  {}ms  →  {}",
                green("✔"),
                bold(&output.stats.converted.to_string()),
                output.stats.total_duration_ms,
                bold(&output.output_dir.display().to_string()),
            );
        } else {
            eprintln!(
                "{} {}/{} file(s) converted  ({} failed)  →  {}",
                if output.stats.converted == 0 {
                    red("✘")
                } else {
                    cyan("⚠")
                },
                bold(&output.stats.converted.to_string()),
                output.stats.discovered,
                red(&output.stats.failed.to_string()),
                output.output_dir.display(),
            );
            for failure in output.failures() {
                if let Some(ref e) = failure.error {
                    eprintln!("   {} {}", red("✗"), e);
                }
            }
        }
    }

    if cli.strict {
        output.into_result().context("Some files failed")?;
    }
    Ok(())
}
