//! Status command implementation
//!
//! Classification only: no writes, no prompts, no state save.

use std::path::Path;

use colored::Colorize;
use mdbridge_core::{MarkupTransform, SyncAction, SyncOptions, SyncSession};

use super::load_config;
use crate::error::Result;

/// Run the status command
pub fn run_status(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let options = SyncOptions {
        dry_run: true,
        ..config.options()
    };

    let transform = MarkupTransform;
    let session = SyncSession::open(&config, options, &transform)?;
    let plan = session.plan();

    println!(
        "{} {} Hugo, {} Obsidian documents",
        "=>".blue().bold(),
        session.snapshot().hugo.len(),
        session.snapshot().obsidian.len()
    );
    match session.state().last_sync {
        Some(at) => println!("   Last sync: {}", at.to_rfc3339()),
        None => println!("   Last sync: {}", "never".dimmed()),
    }
    println!();

    let pending: Vec<_> = plan
        .iter()
        .filter(|p| p.action != SyncAction::Unchanged)
        .collect();

    if pending.is_empty() {
        println!("{} Everything is in sync.", "OK".green().bold());
        return Ok(());
    }

    for planned in &pending {
        let label = format!("[{}]", planned.action);
        let label = match planned.action {
            SyncAction::Conflict => label.red(),
            a if a.is_deletion() => label.yellow(),
            _ => label.green(),
        };
        println!("{} {}", label, planned.id);
        if let Some(detail) = planned.detail {
            println!("    {}", detail.dimmed());
        }
    }

    println!();
    println!(
        "{}",
        format!("{} of {} documents need attention", pending.len(), plan.len()).bold()
    );
    Ok(())
}
