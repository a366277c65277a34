//! Input resolution: normalise a manifest file or literal path to a
//! validated input directory.
//!
//! ## Why validate here at all?
//!
//! The discoverer and converter both assume they are pointed at a directory
//! that existed a moment ago. Validating once up front turns the common
//! mistakes (typo'd path, manifest pointing at a file) into single, clear,
//! run-fatal messages before any work starts. The check is advisory — a
//! directory removed between this check and the listing surfaces later as
//! [`BatchError::DiscoveryFailed`].

use crate::error::BatchError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Conventional manifest name used when the caller does not name one.
pub const DEFAULT_MANIFEST_NAME: &str = "md2pdf.json";

/// The JSON manifest shape. Unknown fields are ignored; there is no schema
/// versioning.
#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    input_directory: Option<String>,
}

/// Load a JSON manifest and return its validated input directory.
///
/// # Errors
/// * [`BatchError::ConfigNotFound`]     — no file at `path`
/// * [`BatchError::ConfigMalformed`]    — unreadable or not valid JSON
/// * [`BatchError::ConfigFieldMissing`] — `input_directory` absent or empty
/// * [`BatchError::InputPathInvalid`]   — named path is not a directory
pub fn load_manifest(path: &Path) -> Result<PathBuf, BatchError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            BatchError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            BatchError::ConfigMalformed {
                path: path.to_path_buf(),
                detail: e.to_string(),
            }
        }
    })?;

    let manifest: Manifest =
        serde_json::from_str(&text).map_err(|e| BatchError::ConfigMalformed {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

    let input_directory = manifest
        .input_directory
        .filter(|s| !s.trim().is_empty())
        .ok_or(BatchError::ConfigFieldMissing {
            path: path.to_path_buf(),
            field: "input_directory",
        })?;

    debug!("Manifest {} → {}", path.display(), input_directory);
    resolve_input_dir(Path::new(&input_directory))
}

/// Validate a literal path as the input directory.
///
/// Returns the path unchanged (absolute or relative, as given); it is
/// guaranteed to be a directory at the moment of the check only.
pub fn resolve_input_dir(path: &Path) -> Result<PathBuf, BatchError> {
    if path.is_dir() {
        Ok(path.to_path_buf())
    } else {
        Err(BatchError::InputPathInvalid {
            path: path.to_path_buf(),
        })
    }
}
