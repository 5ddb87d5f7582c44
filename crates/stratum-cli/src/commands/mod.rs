//! Command implementations for stratum-cli

pub mod apply;
pub mod profiles;
pub mod repos;

pub use apply::run_apply;
pub use profiles::run_profiles;
pub use repos::run_repos;
