//! Error types for stratum-config

/// Result type for stratum-config operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in stratum-config operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Aggregated contract-validation failure. Validators never stop at the
    /// first violated rule; every violation appears in the diagnostic.
    #[error("{}", format_validation(subject, violations))]
    Validation {
        subject: String,
        violations: Vec<String>,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to parse {format} definition: {message}")]
    Parse { format: String, message: String },

    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}

impl Error {
    /// Build a validation error from collected rule violations.
    pub fn validation(subject: impl Into<String>, violations: Vec<String>) -> Self {
        Self::Validation {
            subject: subject.into(),
            violations,
        }
    }
}

fn format_validation(subject: &str, violations: &[String]) -> String {
    let mut message = format!("Validation failed for {subject}:");
    for violation in violations {
        message.push_str("\n  - ");
        message.push_str(violation);
    }
    message
}
