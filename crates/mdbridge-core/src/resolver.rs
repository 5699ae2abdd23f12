//! Conflict resolution seam
//!
//! A conflict arises when both sides changed a document since the last run.
//! Resolution always picks one whole side; content is never merged.

use std::path::PathBuf;

use similar::TextDiff;

use crate::Result;
use crate::id::DocumentId;
use crate::side::Side;

/// Both versions of a document changed on both sides.
#[derive(Debug, Clone)]
pub struct Conflict {
    pub id: DocumentId,
    pub hugo_path: PathBuf,
    pub obsidian_path: PathBuf,
    /// Current Hugo content, in Hugo dialect
    pub hugo_content: String,
    /// Current Obsidian content, in Obsidian dialect
    pub obsidian_content: String,
}

impl Conflict {
    /// Unified line diff from the Hugo version to the Obsidian version.
    pub fn unified_diff(&self) -> String {
        TextDiff::from_lines(&self.hugo_content, &self.obsidian_content)
            .unified_diff()
            .context_radius(3)
            .header("Hugo", "Obsidian")
            .to_string()
    }
}

/// Decision for one conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    KeepHugo,
    KeepObsidian,
    /// Leave both sides and the recorded state alone; the conflict comes
    /// back on the next run
    Skip,
}

impl Resolution {
    pub fn keep(side: Side) -> Self {
        match side {
            Side::Hugo => Resolution::KeepHugo,
            Side::Obsidian => Resolution::KeepObsidian,
        }
    }

    /// The side whose content wins, if any.
    pub fn winner(self) -> Option<Side> {
        match self {
            Resolution::KeepHugo => Some(Side::Hugo),
            Resolution::KeepObsidian => Some(Side::Obsidian),
            Resolution::Skip => None,
        }
    }
}

/// Decides conflicts. Implementations may block (for operator input).
pub trait ConflictResolver {
    fn resolve(&mut self, conflict: &Conflict) -> Result<Resolution>;
}

/// Always keeps one configured side. Never blocks.
#[derive(Debug, Clone, Copy)]
pub struct ForcedResolver(pub Side);

impl ConflictResolver for ForcedResolver {
    fn resolve(&mut self, _conflict: &Conflict) -> Result<Resolution> {
        Ok(Resolution::keep(self.0))
    }
}

impl<F> ConflictResolver for F
where
    F: FnMut(&Conflict) -> Result<Resolution>,
{
    fn resolve(&mut self, conflict: &Conflict) -> Result<Resolution> {
        self(conflict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conflict(hugo: &str, obsidian: &str) -> Conflict {
        Conflict {
            id: DocumentId::new("post"),
            hugo_path: PathBuf::from("/hugo/post.md"),
            obsidian_path: PathBuf::from("/obsidian/post.md"),
            hugo_content: hugo.to_string(),
            obsidian_content: obsidian.to_string(),
        }
    }

    #[test]
    fn unified_diff_marks_both_versions() {
        let diff = conflict("title\nold line\n", "title\nnew line\n").unified_diff();
        assert!(diff.contains("--- Hugo"));
        assert!(diff.contains("+++ Obsidian"));
        assert!(diff.contains("-old line"));
        assert!(diff.contains("+new line"));
    }

    #[test]
    fn forced_resolver_keeps_configured_side() {
        let mut resolver = ForcedResolver(Side::Obsidian);
        let resolution = resolver.resolve(&conflict("a", "b")).unwrap();
        assert_eq!(resolution, Resolution::KeepObsidian);
        assert_eq!(resolution.winner(), Some(Side::Obsidian));
    }

    #[test]
    fn skip_has_no_winner() {
        assert_eq!(Resolution::Skip.winner(), None);
        assert_eq!(Resolution::keep(Side::Hugo), Resolution::KeepHugo);
    }
}
