//! Filesystem abstraction for Stratum
//!
//! Provides the injectable [`Backend`] capability (filesystem plus external
//! process invocation) with a real and an in-memory implementation, and the
//! pure path algorithms used by the resolver.

pub mod backend;
pub mod error;
pub mod memory;
pub mod path;
pub mod real;

pub use backend::{Backend, ProcessOutput};
pub use error::{Error, Result};
pub use memory::{MemoryBackend, Operation};
pub use path::{expand_path, expand_path_with, normalize_path, validate_identifier};
pub use real::RealBackend;
