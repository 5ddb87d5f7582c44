//! Tool configuration contract
//!
//! A [`ToolConfig`] is built once per tool per orchestration pass from the
//! ingested raw definition, mutated only by appending layers and filling in
//! resolved paths, and discarded when that tool's pipeline run ends.

use std::collections::BTreeMap;

use stratum_fs::{normalize_path, validate_identifier};

use crate::parse::RawToolDef;
use crate::{Error, Result};

/// Marker prefix for framework-provided merge strategies.
pub const BUILTIN_PREFIX: &str = "builtin:";

/// One named contributor to a tool's final configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerSpec {
    /// Layer name as referenced by machine profiles
    pub name: String,
    /// `local` or an uppercase external-repository identifier
    pub source: String,
    /// Path relative to the source root
    pub path: String,
    /// Absolute normalized path, empty until the resolver runs
    pub resolved_path: String,
}

impl LayerSpec {
    pub fn new(
        name: impl Into<String>,
        source: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            path: path.into(),
            resolved_path: String::new(),
        }
    }

    /// The `source:path` form this layer was declared with.
    pub fn spec(&self) -> String {
        format!("{}:{}", self.source, self.path)
    }

    fn collect_violations(&self, index: usize, violations: &mut Vec<String>) {
        if self.name.is_empty() {
            violations.push(format!("layer {index}: name must not be empty"));
        }
        if self.source.is_empty() {
            violations.push(format!("layer {index}: source must not be empty"));
        } else if self.source != "local" && !is_repo_identifier(&self.source) {
            violations.push(format!(
                "layer {index} ('{}'): source '{}' must be 'local' or match [A-Z][A-Z0-9_]*",
                self.name, self.source
            ));
        }
        if self.path.is_empty() {
            violations.push(format!("layer {index}: path must not be empty"));
        } else if self.path.starts_with('/') {
            violations.push(format!(
                "layer {index} ('{}'): path '{}' must be relative",
                self.name, self.path
            ));
        }
    }
}

fn is_repo_identifier(source: &str) -> bool {
    let mut chars = source.chars();
    match chars.next() {
        Some(c) if c.is_ascii_uppercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

/// Validated per-tool configuration.
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// Tool identifier (`[A-Za-z0-9_-]+`)
    pub tool_name: String,
    /// Target path, absolute or home-relative
    pub target: String,
    /// `builtin:<name>` or an executable script path
    pub merge_hook: String,
    /// Optional install hook, same grammar as `merge_hook`
    pub install_hook: Option<String>,
    /// Ordered layer list
    pub layers: Vec<LayerSpec>,
    /// Tool-declared extra environment for external hooks
    pub env: BTreeMap<String, String>,
}

impl ToolConfig {
    /// Construct with required fields; everything else starts empty.
    pub fn new(
        tool_name: impl Into<String>,
        target: impl Into<String>,
        merge_hook: impl Into<String>,
    ) -> Self {
        Self {
            tool_name: tool_name.into(),
            target: target.into(),
            merge_hook: merge_hook.into(),
            install_hook: None,
            layers: Vec::new(),
            env: BTreeMap::new(),
        }
    }

    /// Build a ToolConfig from a parsed raw definition.
    ///
    /// Hook paths beginning `builtin:` pass through verbatim; anything else
    /// resolves relative to the tool's definition directory unless already
    /// absolute.
    pub fn from_raw(tool_name: &str, raw: RawToolDef, definition_dir: &str) -> Self {
        let mut config = Self::new(
            tool_name,
            raw.target,
            resolve_hook_path(&raw.merge_hook, definition_dir),
        );
        config.install_hook = raw
            .install_hook
            .map(|hook| resolve_hook_path(&hook, definition_dir));
        for layer in raw.layers {
            config.add_layer(LayerSpec::new(layer.name, layer.source, layer.path));
        }
        config.env = raw.env;
        config
    }

    /// Append a layer.
    pub fn add_layer(&mut self, layer: LayerSpec) {
        self.layers.push(layer);
    }

    /// Set the optional install hook.
    pub fn set_install_hook(&mut self, hook: impl Into<String>) {
        self.install_hook = Some(hook.into());
    }

    /// Fill in a layer's resolved path by index.
    pub fn set_resolved_path(&mut self, index: usize, resolved: impl Into<String>) -> Result<()> {
        match self.layers.get_mut(index) {
            Some(layer) => {
                layer.resolved_path = resolved.into();
                Ok(())
            }
            None => Err(Error::InvalidInput(format!(
                "layer index {index} out of range for tool '{}' ({} layers)",
                self.tool_name,
                self.layers.len()
            ))),
        }
    }

    /// Layer by index, if present.
    pub fn layer(&self, index: usize) -> Option<&LayerSpec> {
        self.layers.get(index)
    }

    /// Whether the merge hook names a builtin strategy.
    pub fn merge_hook_is_builtin(&self) -> bool {
        self.merge_hook.starts_with(BUILTIN_PREFIX)
    }

    /// The builtin strategy name, when the merge hook is `builtin:<name>`.
    pub fn builtin_strategy(&self) -> Option<&str> {
        self.merge_hook.strip_prefix(BUILTIN_PREFIX)
    }

    /// Keep only the named layers, in the requested order.
    ///
    /// Returns an error naming every requested layer the tool does not
    /// declare.
    pub fn filter_layers(&mut self, requested: &[String]) -> Result<()> {
        let mut filtered = Vec::with_capacity(requested.len());
        let mut unknown = Vec::new();
        for name in requested {
            match self.layers.iter().find(|l| &l.name == name) {
                Some(layer) => filtered.push(layer.clone()),
                None => unknown.push(format!(
                    "requested layer '{name}' is not declared by tool '{}'",
                    self.tool_name
                )),
            }
        }
        if !unknown.is_empty() {
            return Err(Error::validation(
                format!("tool '{}'", self.tool_name),
                unknown,
            ));
        }
        self.layers = filtered;
        Ok(())
    }

    /// Check every contract rule, aggregating all violations.
    pub fn validate(&self) -> Result<()> {
        let mut violations = Vec::new();

        if !validate_identifier(&self.tool_name) {
            violations.push(format!(
                "tool_name '{}' must match [A-Za-z0-9_-]+",
                self.tool_name
            ));
        }
        if !(self.target.starts_with('/') || self.target.starts_with('~')) {
            violations.push(format!(
                "target '{}' must start with '/' or '~'",
                self.target
            ));
        }
        check_hook(&self.merge_hook, "merge_hook", &mut violations);
        if let Some(install) = &self.install_hook {
            check_hook(install, "install_hook", &mut violations);
        }
        for (index, layer) in self.layers.iter().enumerate() {
            layer.collect_violations(index, &mut violations);
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(Error::validation(
                format!("tool '{}'", self.tool_name),
                violations,
            ))
        }
    }
}

fn check_hook(hook: &str, field: &str, violations: &mut Vec<String>) {
    if hook.is_empty() {
        violations.push(format!("{field} must not be empty"));
        return;
    }
    if !hook.starts_with(BUILTIN_PREFIX) && hook.chars().any(char::is_whitespace) {
        violations.push(format!(
            "{field} '{hook}' must not contain whitespace unless builtin"
        ));
    }
}

fn resolve_hook_path(hook: &str, definition_dir: &str) -> String {
    if hook.starts_with(BUILTIN_PREFIX) || hook.starts_with('/') || hook.starts_with('~') {
        hook.to_string()
    } else {
        normalize_path(&format!("{definition_dir}/{hook}"))
    }
}
