//! Error types for stratum-repo

/// Result type for stratum-repo operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in stratum-repo operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Repository '{name}' is not configured")]
    RepoNotConfigured { name: String },

    #[error("git {operation} failed for '{name}': {stderr}")]
    GitCommand {
        name: String,
        operation: String,
        stderr: String,
    },

    #[error("Layer '{layer}' ({spec}) could not be resolved: {reason}")]
    LayerUnresolvable {
        layer: String,
        spec: String,
        reason: String,
    },

    #[error("Invalid layer spec '{spec}': {reason}")]
    InvalidSpec { spec: String, reason: String },

    /// Aggregated resolved-layer existence check. Collects every missing
    /// layer directory rather than stopping at the first.
    #[error("{}", format_missing(tool, missing))]
    MissingLayers { tool: String, missing: Vec<String> },

    #[error(transparent)]
    Fs(#[from] stratum_fs::Error),

    #[error(transparent)]
    Config(#[from] stratum_config::Error),
}

fn format_missing(tool: &str, missing: &[String]) -> String {
    let mut message = format!("Missing layer directories for tool '{tool}':");
    for entry in missing {
        message.push_str("\n  - ");
        message.push_str(entry);
    }
    message
}
