//! Layer spec resolution
//!
//! Resolves `source:relativePath` specs to absolute normalized paths:
//! `local` against the dotfiles root, anything else against the configured
//! repository's checkout. Resolution is pure path work; the separate
//! [`LayerResolver::validate_resolved`] pass is the only place that consults
//! the filesystem, and it aggregates every missing layer into one
//! diagnostic.

use tracing::debug;

use stratum_config::ToolConfig;
use stratum_fs::{Backend, normalize_path};

use crate::registry::RepoRegistry;
use crate::{Error, Result};

/// Resolves layer specs against the dotfiles root and repository registry.
#[derive(Debug, Clone)]
pub struct LayerResolver {
    dotfiles_root: String,
    registry: RepoRegistry,
}

impl LayerResolver {
    pub fn new(dotfiles_root: impl Into<String>, registry: RepoRegistry) -> Self {
        Self {
            dotfiles_root: normalize_path(&dotfiles_root.into()),
            registry,
        }
    }

    /// The configured dotfiles root.
    pub fn root(&self) -> &str {
        &self.dotfiles_root
    }

    /// The repository registry this resolver consults.
    pub fn registry(&self) -> &RepoRegistry {
        &self.registry
    }

    /// Resolve a `source:relativePath` spec to an absolute normalized path.
    pub fn resolve_spec(&self, spec: &str) -> Result<String> {
        let (source, rel) = spec.split_once(':').ok_or_else(|| Error::InvalidSpec {
            spec: spec.to_string(),
            reason: "expected 'source:path'".to_string(),
        })?;
        if rel.starts_with('/') {
            return Err(Error::InvalidSpec {
                spec: spec.to_string(),
                reason: "path half must be relative".to_string(),
            });
        }

        let base = if source == "local" {
            self.dotfiles_root.as_str()
        } else {
            self.registry.get_path(source)?
        };
        Ok(normalize_path(&format!("{base}/{rel}")))
    }

    /// Resolve every layer of a tool config, in index order.
    ///
    /// Fail-fast: the first unresolvable layer aborts resolution for this
    /// tool, naming the offending layer and spec.
    pub fn resolve_tool_config(&self, config: &mut ToolConfig) -> Result<()> {
        for index in 0..config.layers.len() {
            let (name, spec) = {
                let layer = &config.layers[index];
                (layer.name.clone(), layer.spec())
            };
            let resolved = self.resolve_spec(&spec).map_err(|e| Error::LayerUnresolvable {
                layer: name.clone(),
                spec: spec.clone(),
                reason: e.to_string(),
            })?;
            debug!(tool = %config.tool_name, layer = %name, %resolved, "layer resolved");
            config.set_resolved_path(index, resolved)?;
        }
        Ok(())
    }

    /// Check that every resolved layer path is an existing directory.
    ///
    /// Aggregates ALL missing layers into one diagnostic rather than
    /// stopping at the first.
    pub fn validate_resolved(&self, backend: &dyn Backend, config: &ToolConfig) -> Result<()> {
        let mut missing = Vec::new();
        for layer in &config.layers {
            if !backend.is_dir(&layer.resolved_path) {
                missing.push(format!("{} -> {}", layer.name, layer.resolved_path));
            }
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingLayers {
                tool: config.tool_name.clone(),
                missing,
            })
        }
    }
}
