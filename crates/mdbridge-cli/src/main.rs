//! mdbridge CLI
//!
//! Keeps a Hugo content tree and an Obsidian vault in sync, converting
//! shortcodes, callouts and links between the two dialects.

mod cli;
mod commands;
mod error;
mod interactive;
mod logging;

use std::path::Path;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use commands::SyncArgs;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose)
        .map_err(|e| CliError::user(format!("Failed to set up logging: {}", e)))?;
    tracing::debug!("Verbose mode enabled");

    match cli.command {
        Some(cmd) => execute_command(cmd, cli.config.as_deref()),
        None => {
            println!(
                "{} Hugo <-> Obsidian sync",
                "mdbridge".green().bold()
            );
            println!();
            println!("Run {} for available commands.", "mdbridge --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands, config: Option<&Path>) -> Result<()> {
    match cmd {
        Commands::Sync {
            push,
            pull,
            dry_run,
            force,
        } => commands::run_sync(
            config,
            SyncArgs {
                push,
                pull,
                dry_run,
                force: force.map(Into::into),
            },
        ),
        Commands::Status => commands::run_status(config),
        Commands::Convert { file, to } => commands::run_convert(&file, to.map(Into::into)),
    }
}
