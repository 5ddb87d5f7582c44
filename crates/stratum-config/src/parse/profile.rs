//! Machine profile parser
//!
//! Profile files name the profile, list tools in processing order, and map
//! each tool to a space-separated string of requested layer names:
//!
//! ```toml
//! profile = "work-laptop"
//! tools = ["vim", "git"]
//!
//! [layers]
//! vim = "base work"
//! git = ""
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::machine::MachineConfig;
use crate::{Error, Result};

#[derive(Debug, Deserialize)]
struct ProfileFile {
    profile: String,
    tools: Vec<String>,
    #[serde(default)]
    layers: BTreeMap<String, String>,
}

/// Parse a machine profile.
pub fn parse_profile(content: &str) -> Result<MachineConfig> {
    let file: ProfileFile = toml::from_str(content).map_err(|e| Error::Parse {
        format: "profile".to_string(),
        message: e.to_string(),
    })?;

    let mut config = MachineConfig::new(file.profile);
    config.tools = file.tools;
    config.layers = file
        .layers
        .into_iter()
        .map(|(tool, names)| {
            let layers = names
                .split_whitespace()
                .map(str::to_string)
                .collect::<Vec<_>>();
            (tool, layers)
        })
        .collect();
    Ok(config)
}
