//! Reconciliation engine
//!
//! One pass over the union of document ids from both trees: classify each
//! id against the recorded state, then copy, resolve or report. The engine
//! never deletes files and never writes the state itself; [`SyncEngine::finalize`]
//! produces the state to persist once the pass has finished.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use chrono::Utc;
use mdbridge_fs::{NormalizedPath, fingerprint, io};

use crate::{Error, Result};
use crate::action::{SyncAction, classify};
use crate::config::SyncOptions;
use crate::executor::Executor;
use crate::id::DocumentId;
use crate::report::{Outcome, ReportEntry, SkipReason, SyncReport};
use crate::resolver::{Conflict, ConflictResolver, Resolution};
use crate::scanner::{DocumentMap, scan};
use crate::side::Side;
use crate::state::SyncState;
use crate::transform::Transform;

/// Documents found in both trees at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub hugo: DocumentMap,
    pub obsidian: DocumentMap,
}

impl Snapshot {
    pub fn documents(&self, side: Side) -> &DocumentMap {
        match side {
            Side::Hugo => &self.hugo,
            Side::Obsidian => &self.obsidian,
        }
    }

    pub fn path(&self, side: Side, id: &DocumentId) -> Option<&Path> {
        self.documents(side).get(id).map(PathBuf::as_path)
    }

    /// Sorted union of ids from both trees.
    pub fn ids(&self) -> BTreeSet<&DocumentId> {
        self.hugo.keys().chain(self.obsidian.keys()).collect()
    }
}

/// Classification of one document, before anything is done about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedAction {
    pub id: DocumentId,
    pub action: SyncAction,
    pub detail: Option<&'static str>,
}

/// Drives synchronization between one Hugo tree and one Obsidian vault.
pub struct SyncEngine<'a> {
    hugo_root: PathBuf,
    obsidian_root: PathBuf,
    options: SyncOptions,
    transform: &'a dyn Transform,
}

impl<'a> SyncEngine<'a> {
    pub fn new(
        hugo_root: impl Into<PathBuf>,
        obsidian_root: impl Into<PathBuf>,
        options: SyncOptions,
        transform: &'a dyn Transform,
    ) -> Self {
        Self {
            hugo_root: hugo_root.into(),
            obsidian_root: obsidian_root.into(),
            options,
            transform,
        }
    }

    pub fn root(&self, side: Side) -> &Path {
        match side {
            Side::Hugo => &self.hugo_root,
            Side::Obsidian => &self.obsidian_root,
        }
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// Scan both trees.
    pub fn scan(&self) -> Result<Snapshot> {
        Ok(Snapshot {
            hugo: scan(&self.hugo_root)?,
            obsidian: scan(&self.obsidian_root)?,
        })
    }

    /// Classify every document in `snapshot`, in id order.
    pub fn plan(&self, snapshot: &Snapshot, state: &SyncState) -> Vec<PlannedAction> {
        snapshot
            .ids()
            .into_iter()
            .map(|id| {
                let (action, detail) = classify(
                    id,
                    snapshot.path(Side::Hugo, id),
                    snapshot.path(Side::Obsidian, id),
                    state,
                );
                tracing::debug!(id = %id, %action, "Classified document");
                PlannedAction {
                    id: id.clone(),
                    action,
                    detail,
                }
            })
            .collect()
    }

    /// Act on every classified document.
    ///
    /// `state` is read for fingerprints and updated with shape hints only;
    /// pass it to [`finalize`](Self::finalize) afterwards to get the state to
    /// persist.
    ///
    /// # Errors
    ///
    /// Write failures and resolver errors abort the pass. Documents already
    /// written stay written; the state is not updated, so a rerun picks up
    /// where this one stopped.
    pub fn run(
        &self,
        snapshot: &Snapshot,
        state: &mut SyncState,
        resolver: &mut dyn ConflictResolver,
    ) -> Result<SyncReport> {
        let mut report = SyncReport::new();

        for planned in self.plan(snapshot, state) {
            let outcome = match planned.action {
                SyncAction::Unchanged => continue,
                SyncAction::NewInHugo
                | SyncAction::NewInObsidian
                | SyncAction::ModifiedInHugo
                | SyncAction::ModifiedInObsidian => {
                    let Some(origin) = planned.action.origin() else {
                        continue;
                    };
                    self.copy(snapshot, state, &planned.id, origin)?
                }
                SyncAction::Conflict => self.reconcile(snapshot, state, &planned.id, resolver)?,
                SyncAction::DeletedInHugo | SyncAction::DeletedInObsidian => {
                    tracing::warn!(
                        id = %planned.id,
                        action = %planned.action,
                        "Deletion detected, manual review recommended"
                    );
                    Outcome::Skipped {
                        reason: SkipReason::DeletionNeedsReview,
                    }
                }
            };

            report.record(ReportEntry {
                id: planned.id,
                action: planned.action,
                detail: planned.detail,
                outcome,
            });
        }

        Ok(report)
    }

    /// Build the state to persist after [`run`](Self::run).
    ///
    /// Both trees are rescanned and fingerprinted. Documents the report left
    /// pending keep their previous fingerprints (or stay unrecorded) so
    /// the same action is detected again on the next run.
    pub fn finalize(&self, state: &SyncState, report: &SyncReport) -> Result<SyncState> {
        let snapshot = self.scan()?;
        let pending = report.pending_ids();

        let mut next = SyncState {
            format: state.format.clone(),
            last_sync: Some(Utc::now()),
            ..SyncState::default()
        };

        for side in Side::BOTH {
            let fingerprints = next.fingerprints_mut(side);
            for (id, path) in snapshot.documents(side) {
                fingerprints.insert(id.clone(), fingerprint(path));
            }

            for id in &pending {
                match state.fingerprints(side).get(*id) {
                    Some(previous) => {
                        fingerprints.insert((*id).clone(), previous.clone());
                    }
                    None => {
                        fingerprints.remove(*id);
                    }
                }
            }
        }

        Ok(next)
    }

    fn copy(
        &self,
        snapshot: &Snapshot,
        state: &mut SyncState,
        id: &DocumentId,
        from: Side,
    ) -> Result<Outcome> {
        if !self.options.direction.allows(from) {
            tracing::debug!(id = %id, %from, direction = %self.options.direction, "Skipped by direction policy");
            return Ok(Outcome::Skipped {
                reason: SkipReason::DirectionPolicy,
            });
        }

        let source = snapshot.path(from, id).ok_or_else(|| Error::Scan {
            path: self.root(from).to_path_buf(),
            message: format!("document '{}' is not in the scanned tree", id),
        })?;

        let path = Executor::new(self.transform, self.options.dry_run).materialize(
            source,
            self.root(from),
            from,
            self.root(from.opposite()),
            id,
            state,
        )?;

        let direction = from.outbound();
        Ok(if self.options.dry_run {
            Outcome::WouldSync {
                path,
                direction,
            }
        } else {
            Outcome::Synced {
                path,
                direction,
            }
        })
    }

    fn reconcile(
        &self,
        snapshot: &Snapshot,
        state: &mut SyncState,
        id: &DocumentId,
        resolver: &mut dyn ConflictResolver,
    ) -> Result<Outcome> {
        let resolution = match (self.options.force, self.options.dry_run) {
            (Some(side), _) => Resolution::keep(side),
            (None, true) => return Ok(Outcome::Unresolved),
            (None, false) => {
                let conflict = self.conflict(snapshot, id)?;
                resolver.resolve(&conflict)?
            }
        };

        match resolution.winner() {
            Some(side) => {
                tracing::info!(id = %id, keep = %side, "Resolved conflict");
                self.copy(snapshot, state, id, side)
            }
            None => {
                tracing::info!(id = %id, "Conflict skipped");
                Ok(Outcome::Skipped {
                    reason: SkipReason::ConflictSkipped,
                })
            }
        }
    }

    fn conflict(&self, snapshot: &Snapshot, id: &DocumentId) -> Result<Conflict> {
        let hugo_path = snapshot.hugo.get(id).cloned().unwrap_or_default();
        let obsidian_path = snapshot.obsidian.get(id).cloned().unwrap_or_default();

        Ok(Conflict {
            id: id.clone(),
            hugo_content: io::read_text(&NormalizedPath::new(&hugo_path))?,
            obsidian_content: io::read_text(&NormalizedPath::new(&obsidian_path))?,
            hugo_path,
            obsidian_path,
        })
    }
}
