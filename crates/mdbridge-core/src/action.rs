//! Per-document change classification

use std::fmt;
use std::path::Path;

use mdbridge_fs::fingerprint;

use crate::id::DocumentId;
use crate::side::Side;
use crate::state::SyncState;

/// What a run should do with one document.
///
/// Derived fresh every run from the two trees and the recorded state; never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncAction {
    NewInHugo,
    NewInObsidian,
    ModifiedInHugo,
    ModifiedInObsidian,
    /// Both sides changed since the last recorded state
    Conflict,
    Unchanged,
    /// Previously recorded on Hugo, now missing there
    DeletedInHugo,
    /// Previously recorded on Obsidian, now missing there
    DeletedInObsidian,
}

impl SyncAction {
    /// The side whose content should be copied across, for new and modified
    /// documents.
    pub fn origin(self) -> Option<Side> {
        match self {
            SyncAction::NewInHugo | SyncAction::ModifiedInHugo => Some(Side::Hugo),
            SyncAction::NewInObsidian | SyncAction::ModifiedInObsidian => Some(Side::Obsidian),
            _ => None,
        }
    }

    pub fn is_deletion(self) -> bool {
        matches!(self, SyncAction::DeletedInHugo | SyncAction::DeletedInObsidian)
    }
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SyncAction::NewInHugo => "new_in_hugo",
            SyncAction::NewInObsidian => "new_in_obsidian",
            SyncAction::ModifiedInHugo => "modified_in_hugo",
            SyncAction::ModifiedInObsidian => "modified_in_obsidian",
            SyncAction::Conflict => "conflict",
            SyncAction::Unchanged => "unchanged",
            SyncAction::DeletedInHugo => "deleted_in_hugo",
            SyncAction::DeletedInObsidian => "deleted_in_obsidian",
        };
        f.write_str(label)
    }
}

/// Classify document `id` given its current paths (if scanned) and the
/// recorded state.
///
/// Rules are checked in order and the first match wins:
///
/// 1. only on Hugo, never recorded on Obsidian: new in Hugo
/// 2. only on Obsidian, never recorded on Hugo: new in Obsidian
/// 3. missing on Hugo but recorded there, Obsidian still present: deleted in Hugo
/// 4. missing on Obsidian but recorded there, Hugo still present: deleted in Obsidian
/// 5. on both: compare each side's fingerprint with its record (no record
///    counts as changed); both changed is a conflict
/// 6. anything else is unchanged
pub fn classify(
    id: &DocumentId,
    hugo_path: Option<&Path>,
    obsidian_path: Option<&Path>,
    state: &SyncState,
) -> (SyncAction, Option<&'static str>) {
    let hugo_record = state.recorded(Side::Hugo, id);
    let obsidian_record = state.recorded(Side::Obsidian, id);

    let hugo_path = hugo_path.filter(|p| p.exists());
    let obsidian_path = obsidian_path.filter(|p| p.exists());

    match (hugo_path, obsidian_path) {
        (Some(_), None) if obsidian_record.is_none() => (SyncAction::NewInHugo, None),
        (None, Some(_)) if hugo_record.is_none() => (SyncAction::NewInObsidian, None),
        (None, Some(_)) => (SyncAction::DeletedInHugo, None),
        (Some(_), None) => (SyncAction::DeletedInObsidian, None),
        (Some(hugo), Some(obsidian)) => {
            let hugo_changed = changed(hugo, hugo_record);
            let obsidian_changed = changed(obsidian, obsidian_record);

            match (hugo_changed, obsidian_changed) {
                (true, true) => (SyncAction::Conflict, Some("Both sides modified")),
                (true, false) => (SyncAction::ModifiedInHugo, None),
                (false, true) => (SyncAction::ModifiedInObsidian, None),
                (false, false) => (SyncAction::Unchanged, None),
            }
        }
        (None, None) => (SyncAction::Unchanged, None),
    }
}

fn changed(path: &Path, recorded: Option<&str>) -> bool {
    recorded.is_none_or(|record| fingerprint(path) != record)
}
