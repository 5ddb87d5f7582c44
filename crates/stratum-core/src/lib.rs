//! Orchestration pipeline for Stratum
//!
//! Sequences the ingestion→validation→layer-filtering→resolution→execution
//! pipeline across every tool of a machine profile, aggregating a
//! success/failure/skip tally. One tool's hard failure never stops
//! subsequent tools; partial-failure isolation is this crate's central
//! reliability property.

pub mod error;
pub mod hook_env;
pub mod orchestrator;
pub mod pipeline;
pub mod report;

pub use error::{Error, Result};
pub use hook_env::{hook_environment, os_family};
pub use orchestrator::{Orchestrator, OrchestratorOptions, OrchestratorState};
pub use pipeline::{ToolOutcome, ToolStage};
pub use report::RunReport;
