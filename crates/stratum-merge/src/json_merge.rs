//! JSON-merge strategy: recursive structural merge
//!
//! Accumulates from an empty object: each layer's discovered JSON file is
//! merged over the accumulator, objects key-by-key recursively, every other
//! value replaced wholesale by the later layer.

use serde_json::{Map, Value};
use tracing::warn;

use stratum_config::ToolConfig;

use crate::discover::discover_json_file;
use crate::strategy::{MergeContext, MergeStrategy};
use crate::{Error, Result};

pub struct JsonMergeStrategy;

impl MergeStrategy for JsonMergeStrategy {
    fn name(&self) -> &'static str {
        "json-merge"
    }

    fn merge(&self, ctx: &MergeContext<'_>, config: &ToolConfig) -> Result<Vec<String>> {
        let backend = ctx.backend;
        let mut accumulated = Value::Object(Map::new());
        let mut contributed = 0usize;

        for layer in &config.layers {
            let Some(file) = discover_json_file(backend, &layer.resolved_path, ctx.target_name())
            else {
                warn!(
                    tool = %config.tool_name,
                    layer = %layer.name,
                    path = %layer.resolved_path,
                    "layer contributed no JSON, skipping"
                );
                continue;
            };
            let content = backend.read_to_string(&file)?;
            let value: Value = serde_json::from_str(&content).map_err(|e| Error::Json {
                path: file.clone(),
                message: e.to_string(),
            })?;
            deep_merge(&mut accumulated, value);
            contributed += 1;
        }

        if contributed == 0 {
            return Err(Error::NothingContributed {
                target: ctx.target.clone(),
            });
        }

        let mut rendered = serde_json::to_string_pretty(&accumulated).map_err(|e| Error::Json {
            path: ctx.target.clone(),
            message: e.to_string(),
        })?;
        rendered.push('\n');
        backend.write(&ctx.target, &rendered)?;
        Ok(vec![ctx.target.clone()])
    }
}

/// Merge `overlay` into `base`: objects merge key-by-key recursively,
/// non-object values are replaced wholesale.
pub fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => {
                        base_map.insert(key, overlay_value);
                    }
                }
            }
        }
        (base_slot, overlay_value) => *base_slot = overlay_value,
    }
}
