//! Builtin strategy dispatch
//!
//! Routes `builtin:<name>` merge hooks to the matching algorithm and wraps
//! the shared preamble every strategy runs: require at least one layer,
//! ensure the target's parent directory exists, back up an existing target
//! before any destructive change, and unlink a symlinked target so
//! strategies always produce a fresh file in its place.

use tracing::info;

use stratum_config::{HookResult, ToolConfig};

use crate::backup::backup_if_exists;
use crate::concat::ConcatStrategy;
use crate::json_merge::JsonMergeStrategy;
use crate::source::SourceStrategy;
use crate::strategy::{MergeContext, MergeStrategy};
use crate::symlink::SymlinkStrategy;
use crate::{Error, Result};

/// Names of the four builtin strategies.
pub const BUILTIN_NAMES: [&str; 4] = ["symlink", "concat", "json-merge", "source"];

/// Whether a name refers to a builtin strategy.
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_NAMES.contains(&name)
}

fn strategy_by_name(name: &str) -> Result<Box<dyn MergeStrategy>> {
    let strategy: Box<dyn MergeStrategy> = match name {
        "symlink" => Box::new(SymlinkStrategy),
        "concat" => Box::new(ConcatStrategy),
        "json-merge" => Box::new(JsonMergeStrategy),
        "source" => Box::new(SourceStrategy),
        other => {
            return Err(Error::UnknownStrategy {
                name: other.to_string(),
            });
        }
    };
    Ok(strategy)
}

/// Run a builtin strategy against a resolved tool config.
///
/// Never panics and never returns `Err`: every failure is folded into the
/// returned [`HookResult`] with its taxonomy code.
pub fn run_builtin(name: &str, ctx: &MergeContext<'_>, config: &ToolConfig) -> HookResult {
    match execute(name, ctx, config) {
        Ok(modified) => HookResult::ok(modified),
        Err(e) => HookResult::failed(e.error_code(), e.to_string()),
    }
}

fn execute(name: &str, ctx: &MergeContext<'_>, config: &ToolConfig) -> Result<Vec<String>> {
    let strategy = strategy_by_name(name)?;
    if config.layers.is_empty() {
        return Err(Error::NoLayers);
    }

    if let Some(parent) = ctx.target_parent() {
        ctx.backend.create_dir_all(parent)?;
    }
    backup_if_exists(ctx.backend, &ctx.target, &ctx.backup_root)?;
    // A symlinked target must be unlinked once it is backed up: writing
    // through the old link would clobber the file it points at.
    if ctx.backend.is_symlink(&ctx.target) {
        ctx.backend.remove_file(&ctx.target)?;
    }

    let modified = strategy.merge(ctx, config)?;
    info!(
        tool = %config.tool_name,
        strategy = name,
        target = %ctx.target,
        "merge strategy completed"
    );
    Ok(modified)
}
