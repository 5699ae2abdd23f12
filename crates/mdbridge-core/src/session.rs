//! One configured sync run
//!
//! Wires configuration, state and engine together: validate the trees, load
//! the state, scan, run, finalize and save. The state file is written exactly
//! once, at the end, and never in dry-run mode.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{SyncConfig, SyncOptions};
use crate::engine::{PlannedAction, Snapshot, SyncEngine};
use crate::report::SyncReport;
use crate::resolver::ConflictResolver;
use crate::side::Side;
use crate::state::SyncState;
use crate::transform::Transform;
use crate::{Error, Result};

/// A validated, scanned pair of trees ready to be synchronized.
pub struct SyncSession<'a> {
    engine: SyncEngine<'a>,
    state_path: PathBuf,
    state: SyncState,
    snapshot: Snapshot,
}

impl<'a> SyncSession<'a> {
    /// Open a session from a loaded configuration.
    pub fn open(
        config: &SyncConfig,
        options: SyncOptions,
        transform: &'a dyn Transform,
    ) -> Result<Self> {
        Self::new(
            config.hugo_dir(),
            config.obsidian_dir(),
            config.state_path(),
            options,
            transform,
        )
    }

    /// Open a session over explicit paths.
    ///
    /// # Errors
    ///
    /// [`Error::TreeNotFound`] when the Hugo tree is missing, plus state
    /// parse and scan errors. A missing Obsidian vault is created unless
    /// this is a dry run.
    pub fn new(
        hugo_root: impl Into<PathBuf>,
        obsidian_root: impl Into<PathBuf>,
        state_path: impl Into<PathBuf>,
        options: SyncOptions,
        transform: &'a dyn Transform,
    ) -> Result<Self> {
        let hugo_root = hugo_root.into();
        let obsidian_root = obsidian_root.into();
        let state_path = state_path.into();

        if !hugo_root.is_dir() {
            return Err(Error::TreeNotFound {
                side: Side::Hugo,
                path: hugo_root,
            });
        }

        if !obsidian_root.exists() {
            if options.dry_run {
                tracing::info!(path = %obsidian_root.display(), "Would create Obsidian vault");
            } else {
                fs::create_dir_all(&obsidian_root)
                    .map_err(|e| mdbridge_fs::Error::io(&obsidian_root, e))?;
                tracing::info!(path = %obsidian_root.display(), "Created Obsidian vault");
            }
        }

        let state = SyncState::load(&state_path)?;
        let engine = SyncEngine::new(hugo_root, obsidian_root, options, transform);
        let snapshot = engine.scan()?;

        Ok(Self {
            engine,
            state_path,
            state,
            snapshot,
        })
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn state(&self) -> &SyncState {
        &self.state
    }

    pub fn state_path(&self) -> &Path {
        &self.state_path
    }

    pub fn options(&self) -> &SyncOptions {
        self.engine.options()
    }

    /// Classification of every document without acting on any.
    pub fn plan(&self) -> Vec<PlannedAction> {
        self.engine.plan(&self.snapshot, &self.state)
    }

    /// Run the pass and, unless dry-running, persist the resulting state.
    pub fn execute(mut self, resolver: &mut dyn ConflictResolver) -> Result<SyncReport> {
        let report = self.engine.run(&self.snapshot, &mut self.state, resolver)?;

        if self.engine.options().dry_run {
            tracing::debug!("Dry run, state left untouched");
        } else {
            let next = self.engine.finalize(&self.state, &report)?;
            next.save(&self.state_path)?;
        }

        Ok(report)
    }
}
