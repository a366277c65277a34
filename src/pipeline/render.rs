//! The rendering seam: an opaque engine behind a narrow trait.
//!
//! ## Why a trait?
//!
//! Everything interesting about this crate — discovery, per-file failure
//! isolation, deterministic target placement — is independent of how PDF
//! bytes actually get made. [`PdfRenderer`] keeps that boundary to one
//! method, so tests drive the batch logic with a fake while production
//! delegates to the `markdown2pdf` engine. The engine is treated as an
//! opaque, possibly-failing function: no contract is assumed beyond
//! "returns bytes or an error".
//!
//! ## Why render into a temp file?
//!
//! The engine serialises straight to a filesystem path — it cannot hand
//! back a byte buffer. Rendering into a managed temp directory and reading
//! the result keeps the trait's byte-oriented contract while the temp dir
//! cleans itself up on drop, even if the engine call panics.

use crate::style::StyleSheet;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Boxed error type any renderer implementation may fail with.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Everything a renderer gets for one document.
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    /// The full UTF-8 Markdown text, rendered as a single logical section.
    pub markdown: &'a str,
    /// Presentation rules, applied to the whole document.
    pub style: &'a StyleSheet,
    /// Document title metadata — the source file's name without extension.
    pub title: &'a str,
}

/// Turns Markdown text plus style rules into PDF bytes.
pub trait PdfRenderer: Send + Sync {
    /// Render one document.
    ///
    /// Implementations are free to fail for any reason; the converter
    /// records the failure against the current job and moves on.
    fn render(&self, request: &RenderRequest<'_>) -> Result<Vec<u8>, BoxError>;
}

/// Production backend delegating to the `markdown2pdf` engine.
///
/// Style rules reach the engine through its TOML configuration file:
/// [`StyleSheet::Inline`] rules are materialised into a temp file first,
/// [`StyleSheet::File`] is passed through, and [`StyleSheet::Default`] uses
/// the engine's own defaults. The engine derives document properties
/// itself and has no metadata hook, so [`RenderRequest::title`] is not
/// forwarded; alternative backends receive it and may embed it.
pub struct Markdown2PdfRenderer;

impl PdfRenderer for Markdown2PdfRenderer {
    fn render(&self, request: &RenderRequest<'_>) -> Result<Vec<u8>, BoxError> {
        use markdown2pdf::config::ConfigSource;

        let scratch = tempfile::tempdir()?;
        let out_path = scratch.path().join("render.pdf");

        // Keeps an Inline sheet's temp file alive across the engine call.
        let mut _rules_file: Option<tempfile::NamedTempFile> = None;
        let rules_path: Option<String> = match request.style {
            StyleSheet::Default => None,
            StyleSheet::File(path) => Some(path.to_string_lossy().into_owned()),
            StyleSheet::Inline(rules) => {
                let mut file = tempfile::NamedTempFile::new()?;
                file.write_all(rules.as_bytes())?;
                file.flush()?;
                let path = file.path().to_string_lossy().into_owned();
                _rules_file = Some(file);
                Some(path)
            }
        };
        let config_source = match rules_path.as_deref() {
            Some(path) => ConfigSource::File(path),
            None => ConfigSource::Default,
        };

        debug!("Rendering '{}' ({} bytes of Markdown)", request.title, request.markdown.len());
        markdown2pdf::parse_into_file(
            request.markdown.to_string(),
            &out_path.to_string_lossy(),
            config_source,
            Default::default(),
        )
        .map_err(|e| -> BoxError { format!("{e}").into() })?;

        let bytes = std::fs::read(&out_path)?;
        Ok(bytes)
    }
}

/// Title metadata for a source file: its name without the extension.
///
/// Kept here so batch and single-file mode agree on naming.
pub fn title_for(source: &Path) -> String {
    source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_the_file_stem() {
        assert_eq!(title_for(Path::new("docs/past-year-answer.md")), "past-year-answer");
        assert_eq!(title_for(Path::new("a.tar.md")), "a.tar");
    }

    #[test]
    fn render_request_borrows_its_parts() {
        let style = StyleSheet::Default;
        let req = RenderRequest {
            markdown: "# Title\n\nBody text.",
            style: &style,
            title: "Title",
        };
        assert_eq!(req.title, "Title");
        assert!(req.markdown.starts_with("# "));
    }

    #[test]
    fn box_error_accepts_plain_strings() {
        fn fails() -> Result<Vec<u8>, BoxError> {
            Err("engine exploded".to_string().into())
        }
        let err = fails().unwrap_err();
        assert_eq!(err.to_string(), "engine exploded");
    }
}
