//! Definition parsers
//!
//! Two independent tool-definition parsers behind one dispatch: structured
//! TOML is tried first and wins whenever both forms exist; the legacy flat
//! key/value form is the fallback. Machine profiles have their own parser.

mod legacy;
mod profile;
mod structured;

use std::collections::BTreeMap;

pub use legacy::parse_legacy;
pub use profile::parse_profile;
pub use structured::parse_structured;

use crate::{Error, Result};

/// A raw, unvalidated layer entry as read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLayer {
    pub name: String,
    pub source: String,
    pub path: String,
}

/// A raw, unvalidated tool definition as read from disk.
///
/// Field and layer order match the on-disk declaration order.
#[derive(Debug, Clone, Default)]
pub struct RawToolDef {
    pub target: String,
    pub merge_hook: String,
    pub install_hook: Option<String>,
    pub env: BTreeMap<String, String>,
    pub layers: Vec<RawLayer>,
}

impl RawLayer {
    /// Split a `source:path` spec string on its first colon.
    pub fn from_spec(name: &str, spec: &str) -> Result<Self> {
        let (source, path) = spec.split_once(':').ok_or_else(|| {
            Error::InvalidInput(format!(
                "layer '{name}': spec '{spec}' must be 'source:path'"
            ))
        })?;
        Ok(Self {
            name: name.to_string(),
            source: source.to_string(),
            path: path.to_string(),
        })
    }
}

/// Parse a tool definition, preferring the structured form.
///
/// `structured` and `legacy` hold the file contents when the respective file
/// exists. The structured form wins if both are present.
pub fn parse_tool_definition(
    structured: Option<&str>,
    legacy: Option<&str>,
) -> Result<RawToolDef> {
    match (structured, legacy) {
        (Some(text), _) => parse_structured(text),
        (None, Some(text)) => parse_legacy(text),
        (None, None) => Err(Error::Parse {
            format: "tool".to_string(),
            message: "no definition content provided".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_wins_when_both_present() {
        let structured = r#"
target = "~/.vimrc"
merge_hook = "builtin:concat"

[[layers]]
name = "base"
source = "local"
path = "vim/base"
"#;
        let legacy = "target = \"/elsewhere\"\nmerge_hook = \"builtin:symlink\"\n";

        let raw = parse_tool_definition(Some(structured), Some(legacy)).unwrap();
        assert_eq!(raw.target, "~/.vimrc");
        assert_eq!(raw.merge_hook, "builtin:concat");
    }

    #[test]
    fn falls_back_to_legacy() {
        let legacy = "target = \"~/.gitconfig\"\nmerge_hook = \"builtin:concat\"\n";
        let raw = parse_tool_definition(None, Some(legacy)).unwrap();
        assert_eq!(raw.target, "~/.gitconfig");
    }

    #[test]
    fn neither_present_is_an_error() {
        assert!(parse_tool_definition(None, None).is_err());
    }

    #[test]
    fn spec_splits_on_first_colon() {
        let layer = RawLayer::from_spec("base", "WORK:vim:odd/path").unwrap();
        assert_eq!(layer.source, "WORK");
        assert_eq!(layer.path, "vim:odd/path");
        assert!(RawLayer::from_spec("base", "nocolon").is_err());
    }
}
