//! Legacy flat key/value tool-definition parser
//!
//! The pre-structured format: one `key = "value"` per line, `#` comments,
//! layers encoded as `layers_<name> = "source:path"` with declaration order
//! preserved. Environment entries use `env_<NAME> = "value"`.

use super::{RawLayer, RawToolDef};
use crate::{Error, Result};

/// Parse the legacy `tool.conf` format.
pub fn parse_legacy(content: &str) -> Result<RawToolDef> {
    let mut raw = RawToolDef::default();
    let mut saw_target = false;
    let mut saw_merge_hook = false;

    for (number, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (key, value) = line.split_once('=').ok_or_else(|| Error::Parse {
            format: "legacy tool".to_string(),
            message: format!("line {}: expected 'key = value', got '{line}'", number + 1),
        })?;
        let key = key.trim();
        let value = unquote(value.trim());

        match key {
            "target" => {
                raw.target = value;
                saw_target = true;
            }
            "merge_hook" => {
                raw.merge_hook = value;
                saw_merge_hook = true;
            }
            "install_hook" => raw.install_hook = Some(value),
            _ => {
                if let Some(name) = key.strip_prefix("layers_") {
                    raw.layers.push(RawLayer::from_spec(name, &value)?);
                } else if let Some(name) = key.strip_prefix("env_") {
                    raw.env.insert(name.to_string(), value);
                } else {
                    return Err(Error::Parse {
                        format: "legacy tool".to_string(),
                        message: format!("line {}: unknown key '{key}'", number + 1),
                    });
                }
            }
        }
    }

    if !saw_target || !saw_merge_hook {
        return Err(Error::Parse {
            format: "legacy tool".to_string(),
            message: "target and merge_hook are required".to_string(),
        });
    }

    Ok(raw)
}

fn unquote(value: &str) -> String {
    let value = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);
    value.to_string()
}
