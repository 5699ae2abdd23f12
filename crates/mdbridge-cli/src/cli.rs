//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use mdbridge_core::Side;

/// mdbridge - Keep a Hugo content tree and an Obsidian vault in sync
#[derive(Parser, Debug)]
#[command(name = "mdbridge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to $MDBRIDGE_CONFIG, then the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Synchronize both trees
    ///
    /// Examples:
    ///   mdbridge sync                  # Both directions, prompt on conflicts
    ///   mdbridge sync --dry-run        # Show what would happen
    ///   mdbridge sync --pull           # Hugo -> Obsidian only
    ///   mdbridge sync --force hugo     # Conflicts keep the Hugo version
    Sync {
        /// Only copy Obsidian changes to Hugo
        #[arg(long, conflicts_with = "pull")]
        push: bool,

        /// Only copy Hugo changes to Obsidian
        #[arg(long)]
        pull: bool,

        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,

        /// Resolve every conflict in favour of this side
        #[arg(long, value_enum, value_name = "SIDE")]
        force: Option<SideArg>,
    },

    /// Show what a sync would do, without prompting or writing anything
    Status,

    /// Convert one file between dialects and print the result
    Convert {
        /// Markdown file to convert
        file: PathBuf,

        /// Target dialect (detected from the file when omitted)
        #[arg(long, value_enum, value_name = "SIDE")]
        to: Option<SideArg>,
    },
}

/// Side names accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideArg {
    Hugo,
    Obsidian,
}

impl From<SideArg> for Side {
    fn from(arg: SideArg) -> Self {
        match arg {
            SideArg::Hugo => Side::Hugo,
            SideArg::Obsidian => Side::Obsidian,
        }
    }
}
