//! Error types for stratum-merge

use stratum_config::ErrorCode;

/// Result type for stratum-merge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running a merge strategy
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Merge strategy requires at least one layer")]
    NoLayers,

    #[error("Unknown builtin strategy '{name}'")]
    UnknownStrategy { name: String },

    #[error("No layer contributed content for target {target}")]
    NothingContributed { target: String },

    #[error("No linkable content in layer '{layer}' ({path})")]
    NothingToLink { layer: String, path: String },

    #[error("Backup failed for {target}: {reason}")]
    Backup { target: String, reason: String },

    #[error("Invalid JSON in {path}: {message}")]
    Json { path: String, message: String },

    #[error(transparent)]
    Fs(#[from] stratum_fs::Error),
}

impl Error {
    /// Map onto the closed error-code taxonomy.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::NoLayers | Self::UnknownStrategy { .. } | Self::Json { .. } => {
                ErrorCode::InvalidInput
            }
            Self::NothingContributed { .. } | Self::NothingToLink { .. } => ErrorCode::NotFound,
            Self::Backup { .. } => ErrorCode::BackupFailed,
            Self::Fs(inner) => match inner {
                stratum_fs::Error::NotFound { .. } => ErrorCode::NotFound,
                stratum_fs::Error::Permission { .. } => ErrorCode::Permission,
                _ => ErrorCode::Failure,
            },
        }
    }
}
