//! External repository registry
//!
//! Declares git-backed repositories as `{name → (url, local path)}` and
//! manages their local checkouts. Clone and pull are the only operations in
//! the core with external-process side effects; both run system git through
//! the injected [`Backend`] so tests can no-op them deterministically.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::{debug, info};

use stratum_fs::{Backend, expand_path, normalize_path};

use crate::{Error, Result};

/// One configured external repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoEntry {
    /// Clone URL
    pub url: String,
    /// Local checkout path (absolute, normalized)
    pub local_path: String,
}

#[derive(Debug, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    repos: BTreeMap<String, RegistryEntry>,
}

#[derive(Debug, Deserialize)]
struct RegistryEntry {
    url: String,
    path: String,
}

/// Registry of external repositories keyed by their uppercase identifier.
#[derive(Debug, Clone, Default)]
pub struct RepoRegistry {
    repos: BTreeMap<String, RepoEntry>,
}

impl RepoRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `repos.toml` registry file. Local paths are tilde/variable
    /// expanded and normalized at load time.
    pub fn parse(content: &str) -> Result<Self> {
        let file: RegistryFile =
            toml::from_str(content).map_err(stratum_config::Error::from)?;
        let mut registry = Self::new();
        for (name, entry) in file.repos {
            registry.add(&name, &entry.url, &normalize_path(&expand_path(&entry.path)));
        }
        Ok(registry)
    }

    /// Register a repository.
    pub fn add(&mut self, name: &str, url: &str, local_path: &str) {
        self.repos.insert(
            name.to_string(),
            RepoEntry {
                url: url.to_string(),
                local_path: local_path.to_string(),
            },
        );
    }

    /// Whether the name is configured.
    pub fn is_configured(&self, name: &str) -> bool {
        self.repos.contains_key(name)
    }

    /// Local checkout path for a configured repository.
    pub fn get_path(&self, name: &str) -> Result<&str> {
        self.entry(name).map(|e| e.local_path.as_str())
    }

    /// Clone URL for a configured repository.
    pub fn get_url(&self, name: &str) -> Result<&str> {
        self.entry(name).map(|e| e.url.as_str())
    }

    /// Configured repository names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.repos.keys().map(String::as_str).collect()
    }

    /// Whether the repository's local checkout exists.
    ///
    /// Probes for the repo marker directory — the only filesystem check in
    /// this subsystem.
    pub fn exists(&self, backend: &dyn Backend, name: &str) -> Result<bool> {
        let entry = self.entry(name)?;
        Ok(backend.is_dir(&format!("{}/.git", entry.local_path)))
    }

    /// Clone the repository if its checkout is absent; no-op otherwise.
    pub fn ensure(&self, backend: &dyn Backend, name: &str) -> Result<()> {
        if self.exists(backend, name)? {
            debug!(repo = name, "repository already present");
            return Ok(());
        }
        let entry = self.entry(name)?;
        info!(repo = name, url = %entry.url, "cloning repository");
        let output = backend.run(
            "git",
            &[
                "clone".to_string(),
                entry.url.clone(),
                entry.local_path.clone(),
            ],
            None,
            &[],
        )?;
        if !output.success() {
            return Err(Error::GitCommand {
                name: name.to_string(),
                operation: "clone".to_string(),
                stderr: output.stderr,
            });
        }
        Ok(())
    }

    /// Pull the repository's checkout.
    pub fn update(&self, backend: &dyn Backend, name: &str) -> Result<()> {
        let entry = self.entry(name)?;
        info!(repo = name, "pulling repository");
        let output = backend.run(
            "git",
            &["pull".to_string(), "--ff-only".to_string()],
            Some(&entry.local_path),
            &[],
        )?;
        if !output.success() {
            return Err(Error::GitCommand {
                name: name.to_string(),
                operation: "pull".to_string(),
                stderr: output.stderr,
            });
        }
        Ok(())
    }

    fn entry(&self, name: &str) -> Result<&RepoEntry> {
        self.repos.get(name).ok_or_else(|| Error::RepoNotConfigured {
            name: name.to_string(),
        })
    }
}
