//! Interactive conflict resolution
//!
//! Shows both versions of a conflicting document as a colored unified diff
//! and asks which side to keep.

use std::io::IsTerminal;

use colored::Colorize;
use dialoguer::Select;
use mdbridge_core::{Conflict, ConflictResolver, Resolution};

const CHOICES: &[&str] = &["Keep Hugo version", "Keep Obsidian version", "Skip"];

/// Prompts on the terminal for every conflict.
///
/// Without a terminal on stdin there is nobody to ask, so conflicts are
/// skipped and left for a later run.
#[derive(Debug, Default)]
pub struct InteractiveResolver;

impl ConflictResolver for InteractiveResolver {
    fn resolve(&mut self, conflict: &Conflict) -> mdbridge_core::Result<Resolution> {
        println!();
        println!("{} {}", "CONFLICT".yellow().bold(), conflict.id.to_string().bold());
        println!("  {}: {}", "Hugo".dimmed(), conflict.hugo_path.display());
        println!("  {}: {}", "Obsidian".dimmed(), conflict.obsidian_path.display());
        println!();
        print_diff(&conflict.unified_diff());

        if !std::io::stdin().is_terminal() {
            tracing::warn!(id = %conflict.id, "No terminal to prompt on, skipping conflict");
            return Ok(Resolution::Skip);
        }

        let choice = Select::new()
            .with_prompt("Keep [H]ugo / [O]bsidian / [S]kip")
            .items(CHOICES)
            .default(2)
            .interact()
            .map_err(std::io::Error::other)?;

        Ok(match choice {
            0 => Resolution::KeepHugo,
            1 => Resolution::KeepObsidian,
            _ => Resolution::Skip,
        })
    }
}

fn print_diff(diff: &str) {
    for line in diff.lines() {
        let styled = if line.starts_with("+++") || line.starts_with("---") {
            line.bold()
        } else if line.starts_with("@@") {
            line.cyan()
        } else if line.starts_with('+') {
            line.green()
        } else if line.starts_with('-') {
            line.red()
        } else {
            line.normal()
        };
        println!("{}", styled);
    }
}
