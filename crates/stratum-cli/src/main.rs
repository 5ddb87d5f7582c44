//! Stratum CLI
//!
//! Composes tool configurations from ordered layers according to a machine
//! profile.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Apply {
            profile,
            tool,
            dry_run,
        }) => commands::run_apply(&cli.root, &profile, tool.as_deref(), dry_run),
        Some(Commands::Profiles) => commands::run_profiles(&cli.root),
        Some(Commands::Repos { update }) => commands::run_repos(&cli.root, update),
        None => {
            println!("{} Stratum", "stratum".green().bold());
            println!();
            println!("Run {} for available commands.", "stratum --help".cyan());
            Ok(())
        }
    }
}
