//! Sync command implementation

use std::path::Path;

use colored::Colorize;
use mdbridge_core::{
    MarkupTransform, Outcome, ReportEntry, Side, SyncDirection, SyncReport, SyncSession,
};

use super::load_config;
use crate::error::Result;
use crate::interactive::InteractiveResolver;

/// Command line overrides for one sync run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncArgs {
    pub push: bool,
    pub pull: bool,
    pub dry_run: bool,
    pub force: Option<Side>,
}

/// Run the sync command
pub fn run_sync(config_path: Option<&Path>, args: SyncArgs) -> Result<()> {
    let config = load_config(config_path)?;

    let mut options = config.options();
    options.dry_run = args.dry_run;
    if args.push {
        options.direction = SyncDirection::Push;
    } else if args.pull {
        options.direction = SyncDirection::Pull;
    }
    if args.force.is_some() {
        options.force = args.force;
    }

    let transform = MarkupTransform;
    let session = SyncSession::open(&config, options, &transform)?;

    println!(
        "{} Hugo: {} ({} documents)",
        "=>".blue().bold(),
        config.hugo_dir().display(),
        session.snapshot().hugo.len()
    );
    println!(
        "{} Obsidian: {} ({} documents)",
        "=>".blue().bold(),
        config.obsidian_dir().display(),
        session.snapshot().obsidian.len()
    );
    let mode = if options.dry_run { "DRY RUN".yellow() } else { "LIVE".green() };
    println!("   Mode: {}", mode);
    println!("   Direction: {}", options.direction);
    if let Some(side) = options.force {
        println!("   Conflicts: keep {}", side);
    }
    println!();

    let report = session.execute(&mut InteractiveResolver)?;
    print_report(&report);

    Ok(())
}

fn print_report(report: &SyncReport) {
    for entry in &report.entries {
        print_entry(entry);
    }
    if !report.is_empty() {
        println!();
    }
    println!("{}", report.to_string().bold());
}

fn print_entry(entry: &ReportEntry) {
    let label = format!("[{}]", entry.action);
    let label = match entry.outcome {
        Outcome::Synced { .. } | Outcome::WouldSync { .. } => label.green(),
        Outcome::Skipped { .. } => label.yellow(),
        Outcome::Unresolved => label.red(),
    };
    println!("{} {}", label, entry.id);

    if let Some(detail) = entry.detail {
        println!("    {}", detail.dimmed());
    }
    match &entry.outcome {
        Outcome::Synced { path, direction } => {
            println!("    {} {} ({})", "->".dimmed(), path.display(), direction)
        }
        Outcome::WouldSync { path, direction } => {
            println!("    Would write: {} ({})", path.display(), direction)
        }
        Outcome::Skipped { reason } => println!("    {}", reason),
        Outcome::Unresolved => println!("    unresolved (dry run)"),
    }
}
