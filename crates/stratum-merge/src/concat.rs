//! Concat strategy: append every layer's contribution in order
//!
//! Each layer's discovered file is appended to the target prefixed by a
//! header naming the layer and its source path. Layers contributing nothing
//! are warned and skipped; the strategy fails only when zero layers
//! contributed.

use tracing::warn;

use stratum_config::ToolConfig;

use crate::discover::discover_file;
use crate::strategy::{MergeContext, MergeStrategy};
use crate::{Error, Result};

pub struct ConcatStrategy;

impl MergeStrategy for ConcatStrategy {
    fn name(&self) -> &'static str {
        "concat"
    }

    fn merge(&self, ctx: &MergeContext<'_>, config: &ToolConfig) -> Result<Vec<String>> {
        let backend = ctx.backend;
        let mut output = String::new();
        let mut contributed = 0usize;

        for layer in &config.layers {
            let Some(file) = discover_file(backend, &layer.resolved_path, ctx.target_name())
            else {
                warn!(
                    tool = %config.tool_name,
                    layer = %layer.name,
                    path = %layer.resolved_path,
                    "layer contributed nothing, skipping"
                );
                continue;
            };
            let content = backend.read_to_string(&file)?;

            output.push_str(&format!("# ===== layer: {} =====\n", layer.name));
            output.push_str(&format!("# source: {file}\n"));
            output.push_str(&content);
            if !content.ends_with('\n') {
                output.push('\n');
            }
            contributed += 1;
        }

        if contributed == 0 {
            return Err(Error::NothingContributed {
                target: ctx.target.clone(),
            });
        }

        backend.write(&ctx.target, &output)?;
        Ok(vec![ctx.target.clone()])
    }
}
