//! Per-tool pipeline
//!
//! Runs one tool through Parsing → Validating → LayerFiltering → Resolving
//! → ResolvedChecking → Executing with the exact failure policy of each
//! step: a missing definition skips, malformed input and hook failures fail
//! this tool only, a missing resolved layer directory and an install-hook
//! failure are warnings.

use std::fmt;

use tracing::{debug, info, warn};

use stratum_config::{BUILTIN_PREFIX, MachineConfig, ToolConfig, parse_tool_definition};
use stratum_fs::{Backend, expand_path, normalize_path};
use stratum_merge::{MergeContext, run_builtin};
use stratum_repo::LayerResolver;

use crate::hook_env::hook_environment;

/// Stage names for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolStage {
    Parsing,
    Validating,
    LayerFiltering,
    Resolving,
    ResolvedChecking,
    Executing,
}

impl fmt::Display for ToolStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Parsing => "parsing",
            Self::Validating => "validating",
            Self::LayerFiltering => "layer-filtering",
            Self::Resolving => "resolving",
            Self::ResolvedChecking => "resolved-checking",
            Self::Executing => "executing",
        };
        write!(f, "{name}")
    }
}

/// Terminal state of one tool's pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    Succeeded,
    Failed(String),
    Skipped,
}

/// One tool's trip through the pipeline. Borrowed wiring, no state of its
/// own; constructed fresh per tool by the orchestrator.
pub struct Pipeline<'a> {
    pub backend: &'a dyn Backend,
    pub resolver: &'a LayerResolver,
    pub profile: &'a MachineConfig,
    pub backup_root: &'a str,
    pub dry_run: bool,
}

impl Pipeline<'_> {
    /// Run the whole pipeline for one tool.
    ///
    /// Never returns an error: every failure mode folds into the outcome so
    /// the orchestrator can continue with the next tool.
    pub fn run_tool(&self, tool: &str, actions: &mut Vec<String>) -> ToolOutcome {
        let definition_dir = format!("{}/tools/{tool}", self.resolver.root());

        // Step 1: locate. Absence is a skip, not a failure.
        let structured_path = format!("{definition_dir}/tool.toml");
        let legacy_path = format!("{definition_dir}/tool.conf");
        let structured = self.read_if_file(&structured_path);
        let legacy = self.read_if_file(&legacy_path);
        if structured.is_none() && legacy.is_none() {
            info!(tool, "no definition found, skipping");
            return ToolOutcome::Skipped;
        }

        // Step 2: parse. Structured wins when both exist.
        let raw = match parse_tool_definition(structured.as_deref(), legacy.as_deref()) {
            Ok(raw) => raw,
            Err(e) => return self.fail(tool, ToolStage::Parsing, e),
        };

        // Step 3: build and validate the contract.
        let mut config = ToolConfig::from_raw(tool, raw, &definition_dir);
        if let Err(e) = config.validate() {
            return self.fail(tool, ToolStage::Validating, e);
        }

        // Step 4: profile-requested layer subset, in the profile's order.
        if let Some(requested) = self.profile.requested_layers(tool)
            && !requested.is_empty()
            && let Err(e) = config.filter_layers(requested)
        {
            return self.fail(tool, ToolStage::LayerFiltering, e);
        }

        // Step 5: resolve layers; fail-fast per tool.
        if let Err(e) = self.resolver.resolve_tool_config(&mut config) {
            return self.fail(tool, ToolStage::Resolving, e);
        }

        // Step 6: best-effort existence check. Absent optional overlays are
        // expected; never a hard failure.
        if let Err(e) = self.resolver.validate_resolved(self.backend, &config) {
            warn!(tool, "{e}");
        }

        let target = normalize_path(&expand_path(&config.target));

        // Step 7: dry-run stops before any mutation.
        if self.dry_run {
            actions.push(format!(
                "[dry-run] Would merge {} layer(s) into {target} via {}",
                config.layers.len(),
                config.merge_hook
            ));
            if let Some(install) = &config.install_hook {
                actions.push(format!("[dry-run] Would run install hook {install}"));
            }
            return ToolOutcome::Succeeded;
        }

        // Step 8: merge hook. Failure fails the tool.
        match self.execute_hook(&config, &config.merge_hook, &target) {
            Ok(()) => actions.push(format!(
                "Merged {} layer(s) into {target} via {}",
                config.layers.len(),
                config.merge_hook
            )),
            Err(message) => return self.fail_message(tool, ToolStage::Executing, message),
        }

        // Step 9: install hook. Failure is logged, never fails the tool.
        if let Some(install) = config.install_hook.clone() {
            match self.execute_hook(&config, &install, &target) {
                Ok(()) => actions.push(format!("Ran install hook {install}")),
                Err(message) => {
                    warn!(tool, hook = %install, "install hook failed: {message}");
                }
            }
        }

        ToolOutcome::Succeeded
    }

    /// Run a merge or install hook: builtin dispatch, or an external script
    /// under the fixed environment contract.
    fn execute_hook(&self, config: &ToolConfig, hook: &str, target: &str) -> Result<(), String> {
        if let Some(strategy) = hook.strip_prefix(BUILTIN_PREFIX) {
            let ctx = MergeContext {
                backend: self.backend,
                target: target.to_string(),
                backup_root: self.backup_root.to_string(),
            };
            let result = run_builtin(strategy, &ctx, config);
            if result.success {
                Ok(())
            } else {
                Err(result
                    .error_message
                    .unwrap_or_else(|| format!("builtin:{strategy} failed")))
            }
        } else {
            let script = normalize_path(&expand_path(hook));
            let env = hook_environment(
                config,
                target,
                self.resolver.root(),
                &self.profile.profile_name,
            );
            debug!(tool = %config.tool_name, %script, "running external hook");
            let output = self
                .backend
                .run(&script, &[], Some(self.resolver.root()), &env)
                .map_err(|e| e.to_string())?;
            if output.success() {
                Ok(())
            } else {
                Err(format!(
                    "{script} exited with code {}: {}",
                    output.code,
                    output.stderr.trim()
                ))
            }
        }
    }

    fn read_if_file(&self, path: &str) -> Option<String> {
        if self.backend.is_file(path) {
            self.backend.read_to_string(path).ok()
        } else {
            None
        }
    }

    fn fail(&self, tool: &str, stage: ToolStage, error: impl fmt::Display) -> ToolOutcome {
        self.fail_message(tool, stage, error.to_string())
    }

    fn fail_message(&self, tool: &str, stage: ToolStage, message: String) -> ToolOutcome {
        warn!(tool, %stage, "tool failed: {message}");
        ToolOutcome::Failed(format!("{stage}: {message}"))
    }
}
