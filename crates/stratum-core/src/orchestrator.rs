//! Orchestrator: profile-wide sequencing with partial-failure isolation

use std::sync::Arc;

use tracing::{debug, info};

use stratum_config::{MachineConfig, parse_profile};
use stratum_fs::{Backend, expand_path, normalize_path};
use stratum_repo::{LayerResolver, RepoRegistry};

use crate::pipeline::Pipeline;
use crate::report::RunReport;
use crate::{Error, Result};

/// Orchestrator lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrchestratorState {
    Uninitialized,
    Initialized,
}

/// Settings accepted at initialization.
#[derive(Debug, Clone, Default)]
pub struct OrchestratorOptions {
    /// Stop each tool's pipeline before any mutating step and report
    /// intended actions instead.
    pub dry_run: bool,
}

/// Sequences the per-tool pipeline across an entire machine profile.
///
/// No state persists across runs: every tool's contracts are fresh local
/// values, and `reset` returns to `Uninitialized`.
pub struct Orchestrator {
    state: OrchestratorState,
    backend: Arc<dyn Backend>,
    options: OrchestratorOptions,
    resolver: Option<LayerResolver>,
}

impl Orchestrator {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            state: OrchestratorState::Uninitialized,
            backend,
            options: OrchestratorOptions::default(),
            resolver: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> OrchestratorState {
        self.state
    }

    /// Accept the dotfiles root and options, and wire the sub-resolvers.
    ///
    /// Loads `<root>/repos.toml` into the repository registry when present.
    pub fn init(&mut self, dotfiles_root: &str, options: OrchestratorOptions) -> Result<()> {
        let root = normalize_path(&expand_path(dotfiles_root));

        let registry_path = format!("{root}/repos.toml");
        let registry = if self.backend.is_file(&registry_path) {
            let content = self.backend.read_to_string(&registry_path)?;
            RepoRegistry::parse(&content)?
        } else {
            RepoRegistry::new()
        };

        debug!(%root, dry_run = options.dry_run, "orchestrator initialized");
        self.resolver = Some(LayerResolver::new(root, registry));
        self.options = options;
        self.state = OrchestratorState::Initialized;
        Ok(())
    }

    /// Return to `Uninitialized`, dropping all wiring.
    pub fn reset(&mut self) {
        self.state = OrchestratorState::Uninitialized;
        self.resolver = None;
        self.options = OrchestratorOptions::default();
    }

    /// The wired resolver, when initialized.
    pub fn resolver(&self) -> Result<&LayerResolver> {
        self.resolver.as_ref().ok_or(Error::NotInitialized)
    }

    /// Load and validate a machine profile from `<root>/profiles/<name>.toml`.
    pub fn load_profile(&self, name: &str) -> Result<MachineConfig> {
        let resolver = self.resolver()?;
        let path = format!("{}/profiles/{name}.toml", resolver.root());
        if !self.backend.is_file(&path) {
            return Err(Error::ProfileNotFound {
                name: name.to_string(),
                path,
            });
        }
        let profile = parse_profile(&self.backend.read_to_string(&path)?)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Names of all profiles under `<root>/profiles`, sorted.
    pub fn list_profiles(&self) -> Result<Vec<String>> {
        let resolver = self.resolver()?;
        let dir = format!("{}/profiles", resolver.root());
        if !self.backend.is_dir(&dir) {
            return Ok(Vec::new());
        }
        Ok(self
            .backend
            .list_dir(&dir)?
            .into_iter()
            .filter_map(|name| name.strip_suffix(".toml").map(str::to_string))
            .collect())
    }

    /// Clone any configured external repository whose checkout is absent.
    ///
    /// A no-op under dry-run: ensuring clones is a mutation.
    pub fn ensure_repos(&self) -> Result<()> {
        let resolver = self.resolver()?;
        if self.options.dry_run {
            return Ok(());
        }
        for name in resolver.registry().names() {
            resolver.registry().ensure(self.backend.as_ref(), name)?;
        }
        Ok(())
    }

    /// Run the pipeline for every tool of the profile, in profile order.
    ///
    /// One tool's hard failure never stops subsequent tools.
    pub fn run(&self, profile: &MachineConfig) -> Result<RunReport> {
        self.run_restricted(profile, None)
    }

    /// Run the pipeline restricted to one named tool of the profile.
    pub fn run_restricted(
        &self,
        profile: &MachineConfig,
        only_tool: Option<&str>,
    ) -> Result<RunReport> {
        let resolver = self.resolver()?;
        if let Some(tool) = only_tool
            && !profile.declares(tool)
        {
            return Err(Error::ToolNotInProfile {
                name: profile.profile_name.clone(),
                tool: tool.to_string(),
            });
        }

        let backup_root = format!("{}/.backups", resolver.root());
        let pipeline = Pipeline {
            backend: self.backend.as_ref(),
            resolver,
            profile,
            backup_root: &backup_root,
            dry_run: self.options.dry_run,
        };

        let mut report = RunReport::new(&profile.profile_name);
        for tool in &profile.tools {
            if let Some(only) = only_tool
                && only != tool
            {
                continue;
            }
            info!(tool, profile = %profile.profile_name, "processing tool");
            let outcome = pipeline.run_tool(tool, &mut report.actions);
            report.record(tool, &outcome);
        }

        info!(
            profile = %profile.profile_name,
            processed = report.processed,
            succeeded = report.succeeded,
            failed = report.failed,
            skipped = report.skipped,
            "run complete"
        );
        Ok(report)
    }
}
