//! Symlink strategy: last layer wins
//!
//! Links the highest-priority (last) layer's content at the target. Earlier
//! layers are ignored entirely; this is a replacement, not a merge. When the
//! layer's resolved path is a file it is linked directly; for a directory, a
//! file found by the standard search order is linked, and a directory with
//! no regular files is linked wholesale.

use tracing::debug;

use stratum_config::ToolConfig;

use crate::discover::discover_file;
use crate::strategy::{MergeContext, MergeStrategy};
use crate::{Error, Result};

pub struct SymlinkStrategy;

impl MergeStrategy for SymlinkStrategy {
    fn name(&self) -> &'static str {
        "symlink"
    }

    fn merge(&self, ctx: &MergeContext<'_>, config: &ToolConfig) -> Result<Vec<String>> {
        let Some(layer) = config.layers.last() else {
            return Err(Error::NoLayers);
        };
        let backend = ctx.backend;

        let origin = if backend.is_file(&layer.resolved_path) {
            layer.resolved_path.clone()
        } else if backend.is_dir(&layer.resolved_path) {
            match discover_file(backend, &layer.resolved_path, ctx.target_name()) {
                Some(file) => file,
                // No regular files: link the whole directory.
                None => layer.resolved_path.clone(),
            }
        } else {
            return Err(Error::NothingToLink {
                layer: layer.name.clone(),
                path: layer.resolved_path.clone(),
            });
        };

        // The dispatcher already backed the target up; clear it for the link.
        if backend.is_symlink(&ctx.target) || backend.is_file(&ctx.target) {
            backend.remove_file(&ctx.target)?;
        } else if backend.is_dir(&ctx.target) {
            backend.remove_dir_all(&ctx.target)?;
        }

        debug!(origin = %origin, link = %ctx.target, "linking");
        backend.symlink(&origin, &ctx.target)?;
        Ok(vec![ctx.target.clone()])
    }
}
