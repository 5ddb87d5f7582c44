//! Aggregate result of an orchestration run

use crate::pipeline::ToolOutcome;

/// Tally of one orchestration pass over a machine profile.
///
/// `success()` holds iff no tool failed; skipped tools (profiles may list
/// tools a checkout does not define) never count against the run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Profile the run was driven by
    pub profile: String,
    /// Tools iterated, including skipped ones
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
    /// Names of the tools that failed, in processing order
    pub failed_tools: Vec<String>,
    /// Human-readable actions taken (or, under dry-run, intended)
    pub actions: Vec<String>,
}

impl RunReport {
    pub fn new(profile: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
            ..Self::default()
        }
    }

    /// Fold one tool's outcome into the tally.
    pub fn record(&mut self, tool: &str, outcome: &ToolOutcome) {
        self.processed += 1;
        match outcome {
            ToolOutcome::Succeeded => self.succeeded += 1,
            ToolOutcome::Skipped => self.skipped += 1,
            ToolOutcome::Failed(_) => {
                self.failed += 1;
                self.failed_tools.push(tool.to_string());
            }
        }
    }

    /// Whether the whole run succeeded.
    pub fn success(&self) -> bool {
        self.failed == 0
    }
}
