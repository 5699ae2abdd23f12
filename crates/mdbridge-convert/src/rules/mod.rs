//! Rewrite rules per conversion direction
//!
//! - [`hugo`]: Hugo shortcodes to Obsidian markup
//! - [`obsidian`]: Obsidian markup to Hugo shortcodes

pub mod hugo;
pub mod obsidian;

pub use hugo::hugo_to_obsidian;
pub use obsidian::obsidian_to_hugo;

/// Final path segment of a `/`-separated reference.
fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
