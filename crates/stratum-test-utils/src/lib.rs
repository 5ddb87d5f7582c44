//! Shared test utilities for the Stratum workspace.
//!
//! Provides the [`DotfilesTree`] builder used by integration and CLI tests
//! to lay out a real on-disk dotfiles root. It is a dev-dependency only —
//! never published.

pub mod tree;

pub use tree::DotfilesTree;
