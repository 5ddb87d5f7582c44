//! External repository registry and layer resolver for Stratum
//!
//! Turns `source:relativePath` layer specs into absolute normalized paths,
//! consulting a registry of git-backed external repositories. Clone and pull
//! go through the injected process backend so tests can stub them.

pub mod error;
pub mod registry;
pub mod resolver;

pub use error::{Error, Result};
pub use registry::{RepoEntry, RepoRegistry};
pub use resolver::LayerResolver;
