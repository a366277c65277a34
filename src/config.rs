//! Configuration types for batch Markdown-to-PDF conversion.
//!
//! All conversion behaviour is controlled through [`BatchConfig`], built via
//! its [`BatchConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share a config across entry points and to test with alternate
//! styles or output folder names without touching global state.
//!
//! # Design choice: builder over constructor
//! A many-field constructor breaks on every new field. The builder lets
//! callers set only what they care about and rely on documented defaults
//! for the rest.

use crate::error::BatchError;
use crate::pipeline::render::PdfRenderer;
use crate::progress::ProgressCallback;
use crate::style::StyleSheet;
use std::fmt;
use std::path::{Component, Path};
use std::sync::Arc;

/// Name of the output subfolder when none is configured.
pub const DEFAULT_OUTPUT_SUBDIR: &str = "pdf";

/// Configuration for a batch conversion run.
///
/// Built via [`BatchConfig::builder()`] or using [`BatchConfig::default()`].
///
/// # Example
/// ```rust
/// use md2pdf_batch::BatchConfig;
///
/// let config = BatchConfig::builder()
///     .output_subdir("rendered")
///     .sort_files(true)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct BatchConfig {
    /// Name of the subfolder, inside the input directory, that receives the
    /// PDFs. Default: `"pdf"`.
    ///
    /// A single path component; nested or absolute values are rejected at
    /// build time so every target stays inside the input directory.
    pub output_subdir: String,

    /// Style rules handed to the engine with every job. Default: the
    /// crate's built-in rules ([`crate::style::DEFAULT_STYLE_RULES`]).
    ///
    /// One sheet per run; every file in the batch renders with the same
    /// rules.
    pub stylesheet: StyleSheet,

    /// Sort discovered files by name before converting. Default: true.
    ///
    /// Directory listing order is filesystem-dependent; sorting makes runs
    /// and summaries deterministic. Disable to process in raw listing
    /// order.
    pub sort_files: bool,

    /// Pre-constructed rendering engine. When `None`, the bundled
    /// [`crate::pipeline::render::Markdown2PdfRenderer`] is used.
    ///
    /// Injecting a renderer is how tests exercise the batch logic without
    /// producing real PDFs.
    pub renderer: Option<Arc<dyn PdfRenderer>>,

    /// Receives per-file progress events. Default: none.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            output_subdir: DEFAULT_OUTPUT_SUBDIR.to_string(),
            stylesheet: StyleSheet::default(),
            sort_files: true,
            renderer: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for BatchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchConfig")
            .field("output_subdir", &self.output_subdir)
            .field("stylesheet", &self.stylesheet)
            .field("sort_files", &self.sort_files)
            .field("renderer", &self.renderer.as_ref().map(|_| "<dyn PdfRenderer>"))
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn BatchProgressCallback>"),
            )
            .finish()
    }
}

impl BatchConfig {
    /// Create a new builder for `BatchConfig`.
    pub fn builder() -> BatchConfigBuilder {
        BatchConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`BatchConfig`].
pub struct BatchConfigBuilder {
    config: BatchConfig,
}

impl BatchConfigBuilder {
    pub fn output_subdir(mut self, name: impl Into<String>) -> Self {
        self.config.output_subdir = name.into();
        self
    }

    pub fn stylesheet(mut self, sheet: StyleSheet) -> Self {
        self.config.stylesheet = sheet;
        self
    }

    pub fn sort_files(mut self, v: bool) -> Self {
        self.config.sort_files = v;
        self
    }

    pub fn renderer(mut self, renderer: Arc<dyn PdfRenderer>) -> Self {
        self.config.renderer = Some(renderer);
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<BatchConfig, BatchError> {
        let name = &self.config.output_subdir;
        if name.is_empty() {
            return Err(BatchError::InvalidConfig(
                "Output subfolder name must not be empty".into(),
            ));
        }
        // Exactly one normal component keeps targets inside the input dir.
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => {}
            _ => {
                return Err(BatchError::InvalidConfig(format!(
                    "Output subfolder name must be a single directory name, got '{name}'"
                )));
            }
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let c = BatchConfig::default();
        assert_eq!(c.output_subdir, "pdf");
        assert!(c.sort_files);
        assert!(c.renderer.is_none());
        assert!(c.progress_callback.is_none());
    }

    #[test]
    fn builder_overrides_fields() {
        let c = BatchConfig::builder()
            .output_subdir("rendered")
            .sort_files(false)
            .stylesheet(StyleSheet::Default)
            .build()
            .unwrap();
        assert_eq!(c.output_subdir, "rendered");
        assert!(!c.sort_files);
        assert_eq!(c.stylesheet, StyleSheet::Default);
    }

    #[test]
    fn empty_subdir_is_rejected() {
        let err = BatchConfig::builder().output_subdir("").build().unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn nested_subdir_is_rejected() {
        for bad in ["a/b", "..", "/abs"] {
            assert!(
                BatchConfig::builder().output_subdir(bad).build().is_err(),
                "'{bad}' should be rejected"
            );
        }
    }

    #[test]
    fn debug_does_not_require_debug_collaborators() {
        let c = BatchConfig::default();
        let s = format!("{c:?}");
        assert!(s.contains("output_subdir"));
    }
}
