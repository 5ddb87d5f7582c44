//! Error types for stratum-core

/// Result type for stratum-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in stratum-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Orchestrator used before `init`
    #[error("Orchestrator is not initialized")]
    NotInitialized,

    #[error("Profile '{name}' not found at {path}")]
    ProfileNotFound { name: String, path: String },

    #[error("Profile '{name}' does not declare tool '{tool}'")]
    ToolNotInProfile { name: String, tool: String },

    #[error(transparent)]
    Fs(#[from] stratum_fs::Error),

    #[error(transparent)]
    Config(#[from] stratum_config::Error),

    #[error(transparent)]
    Repo(#[from] stratum_repo::Error),
}
