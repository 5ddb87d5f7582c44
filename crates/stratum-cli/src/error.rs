//! Error types for stratum-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from stratum-core
    #[error(transparent)]
    Core(#[from] stratum_core::Error),

    /// Error from stratum-fs
    #[error(transparent)]
    Fs(#[from] stratum_fs::Error),

    /// Error from stratum-repo
    #[error(transparent)]
    Repo(#[from] stratum_repo::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// One or more tools failed during an apply run
    #[error("{failed} tool(s) failed: {}", failed_tools.join(", "))]
    RunFailed {
        failed: usize,
        failed_tools: Vec<String>,
    },
}
