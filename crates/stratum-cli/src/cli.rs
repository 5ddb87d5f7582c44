//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};

/// Stratum - Compose tool configurations from ordered layers
#[derive(Parser, Debug)]
#[command(name = "stratum")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Override the dotfiles root
    #[arg(long, global = true, env = "STRATUM_ROOT", default_value = "~/dotfiles")]
    pub root: String,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Apply a machine profile
    ///
    /// Runs every tool of the profile through the merge pipeline. Exits
    /// non-zero when any tool failed.
    Apply {
        /// Machine profile name
        profile: String,

        /// Restrict the run to one tool of the profile
        #[arg(short, long)]
        tool: Option<String>,

        /// Report intended actions without mutating anything
        #[arg(long)]
        dry_run: bool,
    },

    /// List available machine profiles
    Profiles,

    /// List configured external repositories and their checkout status
    Repos {
        /// Clone missing checkouts and pull existing ones
        #[arg(long)]
        update: bool,
    },
}
