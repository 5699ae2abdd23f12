//! Outcome of a sync run

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use mdbridge_convert::Direction;

use crate::action::SyncAction;
use crate::id::DocumentId;

/// Why a document was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The configured direction forbids copying from the changed side
    DirectionPolicy,
    /// The resolver chose to skip the conflict
    ConflictSkipped,
    /// Deletions are never propagated
    DeletionNeedsReview,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::DirectionPolicy => write!(f, "skipped by direction policy"),
            SkipReason::ConflictSkipped => write!(f, "conflict skipped"),
            SkipReason::DeletionNeedsReview => write!(f, "manual review recommended"),
        }
    }
}

/// What happened to one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Synced { path: PathBuf, direction: Direction },
    /// Dry run: the write that would have happened
    WouldSync { path: PathBuf, direction: Direction },
    Skipped { reason: SkipReason },
    /// Dry-run conflict, reported but not resolved
    Unresolved,
}

/// One line of the action log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub id: DocumentId,
    pub action: SyncAction,
    pub detail: Option<&'static str>,
    pub outcome: Outcome,
}

/// Everything a run did or would do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Entries for every document that was not unchanged, in id order
    pub entries: Vec<ReportEntry>,
    pub synced: usize,
    pub skipped: usize,
    pub conflicts: usize,
}

impl SyncReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: ReportEntry) {
        if entry.action == SyncAction::Conflict {
            self.conflicts += 1;
        }
        match entry.outcome {
            Outcome::Synced { .. } | Outcome::WouldSync { .. } => self.synced += 1,
            Outcome::Skipped { .. } => self.skipped += 1,
            Outcome::Unresolved => {}
        }
        self.entries.push(entry);
    }

    /// Ids left untouched whose previous fingerprints must be kept so they
    /// are detected again next run.
    pub fn pending_ids(&self) -> BTreeSet<&DocumentId> {
        self.entries
            .iter()
            .filter(|entry| matches!(entry.outcome, Outcome::Skipped { .. } | Outcome::Unresolved))
            .map(|entry| &entry.id)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Summary: {} synced, {} skipped, {} conflicts",
            self.synced, self.skipped, self.conflicts
        )
    }
}
