use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while cutting an image into tiles.
///
/// Every variant is fatal to a run: nothing is retried and tiles written
/// before the failure stay on disk.
#[derive(Debug, Error)]
pub enum TilerError {
    /// Source image could not be opened or decoded
    #[error("Failed to decode {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Image shape or tiling parameters are not usable
    #[error("Validation error: {0}")]
    Validation(String),

    /// A tile could not be encoded to the output format
    #[error("Failed to encode tile: {message}")]
    Encode { message: String },

    /// Directory creation or tile write failed
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TilerError {
    /// Build a [`TilerError::Io`] for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TilerError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true for the precondition failures raised before any write.
    pub fn is_validation(&self) -> bool {
        matches!(self, TilerError::Validation(_))
    }
}
