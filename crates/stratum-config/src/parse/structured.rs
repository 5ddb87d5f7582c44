//! Structured (TOML) tool-definition parser

use std::collections::BTreeMap;

use serde::Deserialize;

use super::{RawLayer, RawToolDef};
use crate::{Error, Result};

#[derive(Debug, Deserialize)]
struct ToolDefFile {
    target: String,
    merge_hook: String,
    install_hook: Option<String>,
    #[serde(default)]
    env: BTreeMap<String, String>,
    #[serde(default)]
    layers: Vec<LayerEntry>,
}

#[derive(Debug, Deserialize)]
struct LayerEntry {
    name: String,
    source: String,
    path: String,
}

/// Parse the structured `tool.toml` format.
pub fn parse_structured(content: &str) -> Result<RawToolDef> {
    let file: ToolDefFile = toml::from_str(content).map_err(|e| Error::Parse {
        format: "structured tool".to_string(),
        message: e.to_string(),
    })?;

    Ok(RawToolDef {
        target: file.target,
        merge_hook: file.merge_hook,
        install_hook: file.install_hook,
        env: file.env,
        layers: file
            .layers
            .into_iter()
            .map(|l| RawLayer {
                name: l.name,
                source: l.source,
                path: l.path,
            })
            .collect(),
    })
}
