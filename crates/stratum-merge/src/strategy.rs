//! Merge strategy contract

use stratum_config::ToolConfig;
use stratum_fs::Backend;

use crate::Result;

/// Everything a strategy needs to run: the backend, the expanded absolute
/// target path, and where backups go.
pub struct MergeContext<'a> {
    pub backend: &'a dyn Backend,
    /// Expanded, normalized, absolute target path
    pub target: String,
    /// Backup root directory
    pub backup_root: String,
}

impl MergeContext<'_> {
    /// The target's final path component, used for file discovery.
    pub fn target_name(&self) -> &str {
        self.target.rsplit('/').next().unwrap_or(&self.target)
    }

    /// Parent directory of the target.
    pub fn target_parent(&self) -> Option<&str> {
        let trimmed = self.target.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(0) => Some("/"),
            Some(idx) => Some(&trimmed[..idx]),
            None => None,
        }
    }
}

/// One builtin merge algorithm.
///
/// Strategies receive a resolved [`ToolConfig`] (every layer's
/// `resolved_path` filled in) and return the list of files they modified.
/// The dispatcher wraps the outcome into a `HookResult`.
pub trait MergeStrategy {
    /// Strategy name as referenced by `builtin:<name>`.
    fn name(&self) -> &'static str;

    /// Combine the tool's layers into the target artifact.
    fn merge(&self, ctx: &MergeContext<'_>, config: &ToolConfig) -> Result<Vec<String>>;
}
