//! Convert command implementation

use std::path::Path;

use mdbridge_convert::{Dialect, Direction, convert, detect_dialect};
use mdbridge_core::Side;
use mdbridge_fs::{NormalizedPath, io};

use crate::error::{CliError, Result};

/// Convert `file` and print the result to stdout.
///
/// Without `to`, the direction follows the file's detected dialect.
pub fn run_convert(file: &Path, to: Option<Side>) -> Result<()> {
    let content = io::read_text(&NormalizedPath::new(file))?;
    let direction = direction_for(&content, to).ok_or_else(|| {
        CliError::user(format!(
            "Could not detect the dialect of {}; pass --to hugo or --to obsidian",
            file.display()
        ))
    })?;

    tracing::debug!(file = %file.display(), %direction, "Converting");
    print!("{}", convert(&content, direction));
    Ok(())
}

fn direction_for(content: &str, to: Option<Side>) -> Option<Direction> {
    match to {
        Some(Side::Hugo) => Direction::into_dialect(Dialect::Hugo),
        Some(Side::Obsidian) => Direction::into_dialect(Dialect::Obsidian),
        None => match detect_dialect(content) {
            Dialect::Hugo => Some(Direction::HugoToObsidian),
            Dialect::Obsidian => Some(Direction::ObsidianToHugo),
            Dialect::Unknown => None,
        },
    }
}
