//! # Download
//!
//! Writes a generated document to disk without another generator round
//! trip. Only the final component of the backend-supplied filename is
//! used, so a hostile filename cannot escape the output directory.

use std::path::{Path, PathBuf};

use rforge_core::{ForgeError, GeneratedDocument};

/// Errors raised while saving a generated document.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// The filename has no usable final component.
    #[error("refusing to save document under filename {0:?}")]
    UnsafeFilename(String),

    /// Binary content could not be decoded.
    #[error(transparent)]
    Decode(#[from] ForgeError),

    /// Writing the file failed.
    #[error("cannot write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}

/// The last path component of `raw`, treating both `/` and `\` as separators.
pub fn safe_file_name(raw: &str) -> Option<&str> {
    let name = raw
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .map(str::trim)
        .unwrap_or_default();
    match name {
        "" | "." | ".." => None,
        name => Some(name),
    }
}

/// Save `doc` under `dir`, creating the directory if needed.
///
/// Returns the path written. An existing file of the same name is replaced.
pub fn save(doc: &GeneratedDocument, dir: &Path) -> Result<PathBuf, DownloadError> {
    let name = safe_file_name(&doc.filename)
        .ok_or_else(|| DownloadError::UnsafeFilename(doc.filename.clone()))?;
    let bytes = doc.bytes()?;

    let write_err = |path: &Path, source| DownloadError::Write {
        path: path.display().to_string(),
        source,
    };
    std::fs::create_dir_all(dir).map_err(|e| write_err(dir, e))?;
    let path = dir.join(name);
    std::fs::write(&path, &bytes).map_err(|e| write_err(&path, e))?;

    tracing::info!(
        path = %path.display(),
        bytes = bytes.len(),
        format = %doc.format,
        "document saved"
    );
    Ok(path)
}
