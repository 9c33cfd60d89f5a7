//! Centralized error types for attachview.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the attachview library.
#[derive(Error, Debug)]
pub enum ViewerError {
    /// I/O error with the associated file path.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The attachment list could not be retrieved from the host.
    #[error("Failed to fetch attachments: {0}")]
    Fetch(String),

    /// The host refused or failed to delete an attachment.
    #[error("Failed to delete attachment '{id}': {reason}")]
    Delete { id: String, reason: String },

    /// Delete was requested while `allow_delete` is off.
    #[error("Deleting attachments is disabled")]
    DeleteDisabled,

    /// The PDF document could not be opened.
    #[error("Failed to open PDF: {0}")]
    PdfParse(String),

    /// A slide index outside `[0, len)` was requested.
    #[error("Slide index {index} is out of range (attachments: {len})")]
    NavigationOutOfRange { index: usize, len: usize },

    /// The base64 payload is malformed.
    #[error("Invalid base64 payload at byte {offset}: {reason}")]
    Decode { offset: usize, reason: String },

    /// An export operation failed.
    #[error("Export error: {0}")]
    Export(String),

    /// An invalid path or identifier was provided.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// The operation was cancelled before it completed.
    #[error("Operation cancelled")]
    Cancelled,

    /// The controller needs a Tokio runtime to run suspended work.
    #[error("No async runtime available")]
    NoRuntime,
}

/// Convenience alias for `Result<T, ViewerError>`.
pub type Result<T> = std::result::Result<T, ViewerError>;

impl ViewerError {
    /// Create an `Io` variant from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Allow `?` on `std::io::Error` when no path context is available
/// (rare, prefer `ViewerError::io`).
impl From<std::io::Error> for ViewerError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            path: PathBuf::from("<unknown>"),
            source,
        }
    }
}
