//! Style rules applied to every rendered document.
//!
//! Centralising the presentation rules here serves two purposes:
//!
//! 1. **Single source of truth** — tweaking the default look (code-block
//!    shading, heading sizes) requires editing exactly one place.
//!
//! 2. **Testability** — unit tests can inspect the rules directly without
//!    invoking the rendering engine.
//!
//! Callers can override the default via
//! [`crate::config::BatchConfigBuilder::stylesheet`]; the constant here is
//! used only when no override is provided. One style sheet applies uniformly
//! to every file in a batch; there is no per-file override.

use std::path::PathBuf;

/// Presentation rules handed to the rendering engine with every job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleSheet {
    /// Use the engine's built-in defaults.
    Default,
    /// Inline rules text, in the engine's TOML styling dialect.
    Inline(String),
    /// Load rules from a file on disk at render time.
    File(PathBuf),
}

impl Default for StyleSheet {
    fn default() -> Self {
        StyleSheet::Inline(DEFAULT_STYLE_RULES.to_string())
    }
}

/// Default style rules, in the engine's TOML dialect.
///
/// The look aims at readable technical documents: a light grey, bordered
/// background for code blocks, a monospace face for code, and a tinted
/// inline-code colour, over the engine's defaults for everything else.
pub const DEFAULT_STYLE_RULES: &str = r##"# md2pdf-batch default style rules

[text]
size = 11

[code]
font-family = "Courier"
size = 10
text-color = "#333333"
background-color = "#f6f8fa"
border-color = "#e1e4e8"
padding = 8

[inline-code]
text-color = "#c95100"
background-color = "#eeeeee"

[heading-1]
size = 22
bold = true

[heading-2]
size = 17
bold = true

[heading-3]
size = 14
bold = true
"##;
