//! Error types for stratum-fs

use std::path::PathBuf;

/// Result type for stratum-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in stratum-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Permission denied at {path}")]
    Permission { path: PathBuf },

    #[error("Not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Failed to spawn {command}: {message}")]
    Spawn { command: String, message: String },
}

impl Error {
    /// Wrap an `std::io::Error` with path context, classifying the common
    /// kinds the pipeline distinguishes.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            std::io::ErrorKind::PermissionDenied => Self::Permission { path },
            _ => Self::Io { path, source },
        }
    }
}
