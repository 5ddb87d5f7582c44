//! `stratum apply` - run a machine profile through the pipeline

use std::sync::Arc;

use colored::Colorize;
use tracing::warn;

use stratum_core::{Orchestrator, OrchestratorOptions};
use stratum_fs::RealBackend;

use crate::error::{CliError, Result};

pub fn run_apply(root: &str, profile_name: &str, tool: Option<&str>, dry_run: bool) -> Result<()> {
    let mut orchestrator = Orchestrator::new(Arc::new(RealBackend::new()));
    orchestrator.init(root, OrchestratorOptions { dry_run })?;

    let profile = orchestrator.load_profile(profile_name)?;

    // Best effort: a failed clone surfaces later as that tool's failure.
    if let Err(e) = orchestrator.ensure_repos() {
        warn!("repository preparation failed: {e}");
    }

    let report = orchestrator.run_restricted(&profile, tool)?;

    for action in &report.actions {
        println!("  {action}");
    }
    println!(
        "{} processed={} succeeded={} failed={} skipped={}",
        if report.success() {
            "ok".green().bold()
        } else {
            "failed".red().bold()
        },
        report.processed,
        report.succeeded,
        report.failed,
        report.skipped
    );

    if report.success() {
        Ok(())
    } else {
        Err(CliError::RunFailed {
            failed: report.failed,
            failed_tools: report.failed_tools,
        })
    }
}
