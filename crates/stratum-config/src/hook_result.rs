//! Hook invocation results and the closed error-code taxonomy

use std::fmt;

/// Closed set of outcome codes shared by the whole pipeline.
///
/// The numeric values are stable: they surface in hook results and map to
/// external-hook exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCode {
    Ok = 0,
    Failure = 1,
    InvalidInput = 2,
    NotFound = 3,
    Permission = 4,
    Validation = 5,
    MissingDependency = 6,
    BackupFailed = 7,
}

impl ErrorCode {
    /// The stable numeric value.
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ok => "ok",
            Self::Failure => "failure",
            Self::InvalidInput => "invalid-input",
            Self::NotFound => "not-found",
            Self::Permission => "permission",
            Self::Validation => "validation",
            Self::MissingDependency => "missing-dependency",
            Self::BackupFailed => "backup-failed",
        };
        write!(f, "{name}")
    }
}

/// Result of a single merge or install hook invocation.
///
/// Created fresh by every strategy invocation and never shared between
/// invocations. `error_code` is present iff `success` is false; the
/// constructors maintain that invariant.
#[derive(Debug, Clone)]
pub struct HookResult {
    pub success: bool,
    pub error_code: Option<ErrorCode>,
    pub error_message: Option<String>,
    /// Paths the hook created or replaced
    pub modified_files: Vec<String>,
}

impl HookResult {
    /// Successful result listing the files the hook touched.
    pub fn ok(modified_files: Vec<String>) -> Self {
        Self {
            success: true,
            error_code: None,
            error_message: None,
            modified_files,
        }
    }

    /// Failed result with a code and diagnostic message.
    pub fn failed(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_code: Some(code),
            error_message: Some(message.into()),
            modified_files: Vec::new(),
        }
    }

    /// Check the success/error_code pairing invariant.
    pub fn validate(&self) -> crate::Result<()> {
        let mut violations = Vec::new();
        if self.success && self.error_code.is_some() {
            violations.push("error_code must be absent on success".to_string());
        }
        if !self.success && self.error_code.is_none() {
            violations.push("error_code must be present on failure".to_string());
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(crate::Error::validation("hook result", violations))
        }
    }
}
