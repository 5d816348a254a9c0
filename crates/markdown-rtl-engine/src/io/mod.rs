use std::fs;
use std::path::{Path, PathBuf};

use crate::editing::MarkdownBuffer;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("File is not valid UTF-8: {path}")]
    InvalidUtf8 {
        path: PathBuf,
        source: std::str::Utf8Error,
    },
}

/// Read a markdown file into a buffer, byte for byte.
pub fn read_document(path: &Path) -> Result<MarkdownBuffer, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let bytes = fs::read(path)?;
    MarkdownBuffer::from_bytes(&bytes).map_err(|source| IoError::InvalidUtf8 {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a buffer back to disk exactly as it stands.
pub fn write_document(path: &Path, document: &MarkdownBuffer) -> Result<(), IoError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, document.to_bytes())?;
    Ok(())
}
