//! Source strategy: generate a file of guarded source statements
//!
//! Emits a generated artifact that, per layer, sources that layer's
//! discovered file behind a file-exists guard. Each layer may also carry an
//! optional `pre-init` companion; all existing pre-init blocks are emitted
//! and sourced as one block strictly before every primary layer statement,
//! preserving across-layer order in both groups.

use tracing::warn;

use stratum_config::ToolConfig;

use crate::discover::{discover_file, discover_pre_init};
use crate::strategy::{MergeContext, MergeStrategy};
use crate::{Error, Result};

pub struct SourceStrategy;

impl MergeStrategy for SourceStrategy {
    fn name(&self) -> &'static str {
        "source"
    }

    fn merge(&self, ctx: &MergeContext<'_>, config: &ToolConfig) -> Result<Vec<String>> {
        let backend = ctx.backend;
        let mut pre_init_blocks = Vec::new();
        let mut primary_blocks = Vec::new();

        for layer in &config.layers {
            let pre_init = discover_pre_init(backend, &layer.resolved_path);
            if let Some(path) = &pre_init {
                pre_init_blocks.push(block("pre-init", &layer.name, path));
            }

            let primary = discover_file(backend, &layer.resolved_path, ctx.target_name())
                // The generic fallback can land on the companion itself.
                .filter(|file| pre_init.as_deref() != Some(file.as_str()));
            match primary {
                Some(path) => primary_blocks.push(block("layer", &layer.name, &path)),
                None => warn!(
                    tool = %config.tool_name,
                    layer = %layer.name,
                    path = %layer.resolved_path,
                    "layer contributed nothing, skipping"
                ),
            }
        }

        if pre_init_blocks.is_empty() && primary_blocks.is_empty() {
            return Err(Error::NothingContributed {
                target: ctx.target.clone(),
            });
        }

        let mut output = format!(
            "# Generated by stratum for tool '{}'. Do not edit by hand.\n",
            config.tool_name
        );
        for group in [&pre_init_blocks, &primary_blocks] {
            for entry in group {
                output.push('\n');
                output.push_str(entry);
            }
        }

        backend.write(&ctx.target, &output)?;
        Ok(vec![ctx.target.clone()])
    }
}

fn block(kind: &str, layer: &str, path: &str) -> String {
    format!("# {kind}: {layer}\n[ -f \"{path}\" ] && . \"{path}\"\n")
}
