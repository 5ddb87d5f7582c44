//! `stratum repos` - list external repositories and checkout status

use std::sync::Arc;

use colored::Colorize;

use stratum_core::{Orchestrator, OrchestratorOptions};
use stratum_fs::{Backend, RealBackend};

use crate::error::Result;

pub fn run_repos(root: &str, update: bool) -> Result<()> {
    let backend: Arc<dyn Backend> = Arc::new(RealBackend::new());
    let mut orchestrator = Orchestrator::new(backend.clone());
    orchestrator.init(root, OrchestratorOptions::default())?;

    let registry = orchestrator.resolver()?.registry();
    let names = registry.names();
    if names.is_empty() {
        println!("No external repositories configured in {root}/repos.toml");
        return Ok(());
    }

    for name in names {
        if update {
            if registry.exists(backend.as_ref(), name)? {
                registry.update(backend.as_ref(), name)?;
            } else {
                registry.ensure(backend.as_ref(), name)?;
            }
        }
        let status = if registry.exists(backend.as_ref(), name)? {
            "cloned".green()
        } else {
            "missing".yellow()
        };
        println!(
            "{:<12} {} {}",
            name.cyan(),
            status,
            registry.get_url(name)?
        );
    }
    Ok(())
}
