//! Configuration contracts and ingestion for Stratum
//!
//! The validated record types every other crate consumes (tool definitions,
//! machine profiles, hook results) plus the parsers that produce them from
//! on-disk text: structured TOML, the legacy flat key/value form, and the
//! machine-profile format.

pub mod error;
pub mod hook_result;
pub mod machine;
pub mod parse;
pub mod tool;

pub use error::{Error, Result};
pub use hook_result::{ErrorCode, HookResult};
pub use machine::MachineConfig;
pub use parse::{
    RawLayer, RawToolDef, parse_legacy, parse_profile, parse_structured, parse_tool_definition,
};
pub use tool::{BUILTIN_PREFIX, LayerSpec, ToolConfig};
