//! Loading the texts being compared: reading files and asking the user to
//! pick them.

pub mod errors;
pub mod picker;

use std::io;
use std::path::{Path, PathBuf};
use std::string::FromUtf8Error;
use thiserror::Error;

/// Result type for file reading.
pub type Result<T> = std::result::Result<T, FileReadError>;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Recoverable failures while reading a text file.
#[derive(Debug, Error)]
pub enum FileReadError {
    #[error("{path} is not a regular file")]
    InvalidPath { path: String },
    #[error("permission denied reading {path}")]
    PermissionDenied {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("reading {path} is not supported on this platform")]
    Unsupported {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("{path} is not valid UTF-8 text")]
    Decode {
        path: String,
        #[source]
        source: FromUtf8Error,
    },
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("file dialog failed: {0}")]
    Dialog(String),
}

/// A file chosen and read for one side of the comparison.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LoadedFile {
    pub path: PathBuf,
    pub text: String,
}

impl LoadedFile {
    /// File name shown in the header, falling back to the full path.
    pub fn label(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Reads a UTF-8 text file. A missing file is `Ok(None)`.
pub async fn read_text_file(path: &Path) -> Result<Option<String>> {
    let display = path.display().to_string();

    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(source) if source.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(classify_io_error(display, source)),
    };
    if metadata.is_dir() {
        return Err(FileReadError::InvalidPath { path: display });
    }

    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(source) if source.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(classify_io_error(display, source)),
    };
    let bytes = match bytes.strip_prefix(UTF8_BOM) {
        Some(rest) => rest.to_vec(),
        None => bytes,
    };

    String::from_utf8(bytes)
        .map(Some)
        .map_err(|source| FileReadError::Decode {
            path: display,
            source,
        })
}

/// Reads `path`, handing any failure to `on_error` instead of returning it.
pub async fn try_read_text_file(
    path: &Path,
    on_error: impl FnOnce(FileReadError),
) -> Option<LoadedFile> {
    match read_text_file(path).await {
        Ok(Some(text)) => Some(LoadedFile {
            path: path.to_path_buf(),
            text,
        }),
        Ok(None) => {
            log::warn!("{} disappeared before it could be read", path.display());
            None
        }
        Err(error) => {
            log::warn!("could not read {}: {error}", path.display());
            on_error(error);
            None
        }
    }
}

fn classify_io_error(path: String, source: io::Error) -> FileReadError {
    match source.kind() {
        io::ErrorKind::PermissionDenied => FileReadError::PermissionDenied { path, source },
        io::ErrorKind::Unsupported => FileReadError::Unsupported { path, source },
        io::ErrorKind::InvalidInput => FileReadError::InvalidPath { path },
        _ => FileReadError::Io { path, source },
    }
}
