//! Builtin merge strategies for Stratum
//!
//! The four framework-provided algorithms (symlink, concat, json-merge,
//! source) that combine a tool's resolved layers into one artifact at the
//! target path, plus the shared back-up-if-exists primitive every strategy
//! runs before its first destructive change.

pub mod backup;
pub mod concat;
pub mod discover;
pub mod dispatcher;
pub mod error;
pub mod json_merge;
pub mod source;
pub mod strategy;
pub mod symlink;

pub use backup::backup_if_exists;
pub use dispatcher::{is_builtin, run_builtin};
pub use error::{Error, Result};
pub use strategy::{MergeContext, MergeStrategy};
