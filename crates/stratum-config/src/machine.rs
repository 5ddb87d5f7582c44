//! Machine profile contract

use std::collections::BTreeMap;

use stratum_fs::validate_identifier;

use crate::{Error, Result};

/// A named tool→layer-subset assignment representing one target environment.
#[derive(Debug, Clone, Default)]
pub struct MachineConfig {
    /// Profile identifier (`[A-Za-z0-9_-]+`)
    pub profile_name: String,
    /// Tools to process, in order
    pub tools: Vec<String>,
    /// Requested layer names per tool, in request order. An empty list means
    /// "no subset restriction"; a missing entry for a declared tool fails
    /// validation.
    pub layers: BTreeMap<String, Vec<String>>,
}

impl MachineConfig {
    pub fn new(profile_name: impl Into<String>) -> Self {
        Self {
            profile_name: profile_name.into(),
            tools: Vec::new(),
            layers: BTreeMap::new(),
        }
    }

    /// Append a tool with its requested layer names.
    pub fn add_tool(&mut self, tool: impl Into<String>, layers: Vec<String>) {
        let tool = tool.into();
        self.tools.push(tool.clone());
        self.layers.insert(tool, layers);
    }

    /// Requested layers for a tool, if the profile declares it.
    pub fn requested_layers(&self, tool: &str) -> Option<&[String]> {
        self.layers.get(tool).map(Vec::as_slice)
    }

    /// Whether the profile declares the tool.
    pub fn declares(&self, tool: &str) -> bool {
        self.tools.iter().any(|t| t == tool)
    }

    /// Check every contract rule, aggregating all violations.
    pub fn validate(&self) -> Result<()> {
        let mut violations = Vec::new();

        if !validate_identifier(&self.profile_name) {
            violations.push(format!(
                "profile_name '{}' must match [A-Za-z0-9_-]+",
                self.profile_name
            ));
        }
        for tool in &self.tools {
            if !validate_identifier(tool) {
                violations.push(format!("tool name '{tool}' must match [A-Za-z0-9_-]+"));
            }
            if !self.layers.contains_key(tool) {
                violations.push(format!("declared tool '{tool}' has no layer entry"));
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(Error::validation(
                format!("profile '{}'", self.profile_name),
                violations,
            ))
        }
    }
}
