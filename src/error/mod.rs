//! Error types for payloadrs.

use std::fmt;
use std::path::PathBuf;

/// Errors that can occur while constructing or consuming a payload.
#[derive(Debug)]
pub enum PayloadError {
    /// An I/O error occurred while reading the source or writing to a sink.
    Io(std::io::Error),

    /// A chunk session was requested with a chunk size of zero.
    InvalidChunkSize,

    /// The backing file could not be opened or queried when an operation
    /// tried to create its read path.
    SourceUnavailable {
        /// The path of the backing file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Deleting the backing file after a session was released failed.
    ///
    /// The read handle is already closed when this is reported; the error
    /// never invalidates bytes that were read before release.
    Deletion {
        /// The path that could not be deleted.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadError::Io(e) => write!(f, "io error: {}", e),
            PayloadError::InvalidChunkSize => {
                write!(f, "chunk size must be positive")
            }
            PayloadError::SourceUnavailable { path, source } => {
                write!(f, "source unavailable: {}: {}", path.display(), source)
            }
            PayloadError::Deletion { path, source } => {
                write!(f, "failed to delete {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for PayloadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PayloadError::Io(e) => Some(e),
            PayloadError::SourceUnavailable { source, .. } => Some(source),
            PayloadError::Deletion { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PayloadError {
    fn from(e: std::io::Error) -> Self {
        PayloadError::Io(e)
    }
}
