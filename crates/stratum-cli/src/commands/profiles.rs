//! `stratum profiles` - list machine profiles

use std::sync::Arc;

use colored::Colorize;

use stratum_core::{Orchestrator, OrchestratorOptions};
use stratum_fs::RealBackend;

use crate::error::Result;

pub fn run_profiles(root: &str) -> Result<()> {
    let mut orchestrator = Orchestrator::new(Arc::new(RealBackend::new()));
    orchestrator.init(root, OrchestratorOptions::default())?;

    let profiles = orchestrator.list_profiles()?;
    if profiles.is_empty() {
        println!("No profiles found under {root}/profiles");
        return Ok(());
    }
    for profile in profiles {
        println!("{}", profile.cyan());
    }
    Ok(())
}
