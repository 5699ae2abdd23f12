//! Persisted sync state
//!
//! The state records, per side, the fingerprint each document had at the end
//! of the last run, plus a shape hint remembering which [`Layout`] a document
//! was written with. It is read once at the start of a run and rewritten
//! once at the end; a run interrupted in between leaves the previous file
//! untouched.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use mdbridge_fs::{NormalizedPath, io};
use serde::{Deserialize, Serialize};

use crate::id::DocumentId;
use crate::layout::Layout;
use crate::side::Side;
use crate::{Error, Result};

/// Fingerprints by document id for one side.
pub type Fingerprints = BTreeMap<DocumentId, String>;

/// Sync state shared by one Hugo tree and one Obsidian vault.
///
/// Every field defaults when missing so state files written by older
/// versions (without `format`, say) still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncState {
    /// Last recorded fingerprints of the Hugo tree
    #[serde(default)]
    pub hugo: Fingerprints,
    /// Last recorded fingerprints of the Obsidian vault
    #[serde(default)]
    pub obsidian: Fingerprints,
    /// Shape hints: the layout each document was last written with
    #[serde(default)]
    pub format: BTreeMap<DocumentId, Layout>,
    /// When the state was last rewritten
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<DateTime<Utc>>,
}

impl SyncState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load state from `path`, or start empty if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No sync state yet, starting empty");
            return Ok(Self::new());
        }

        let content = io::read_text(&NormalizedPath::new(path))?;
        serde_json::from_str(&content).map_err(|e| Error::StateParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Save state to `path` atomically, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        io::write_text(&NormalizedPath::new(path), &content)?;
        tracing::debug!(path = %path.display(), "Saved sync state");
        Ok(())
    }

    pub fn fingerprints(&self, side: Side) -> &Fingerprints {
        match side {
            Side::Hugo => &self.hugo,
            Side::Obsidian => &self.obsidian,
        }
    }

    pub fn fingerprints_mut(&mut self, side: Side) -> &mut Fingerprints {
        match side {
            Side::Hugo => &mut self.hugo,
            Side::Obsidian => &mut self.obsidian,
        }
    }

    /// Last recorded fingerprint of `id` on `side`.
    ///
    /// An empty recorded fingerprint means the document was absent and is
    /// reported as `None`, the same as never having been recorded.
    pub fn recorded(&self, side: Side, id: &DocumentId) -> Option<&str> {
        self.fingerprints(side)
            .get(id)
            .map(String::as_str)
            .filter(|fp| !fp.is_empty())
    }

    pub fn shape_hint(&self, id: &DocumentId) -> Option<Layout> {
        self.format.get(id).copied()
    }

    pub fn record_shape(&mut self, id: &DocumentId, layout: Layout) {
        self.format.insert(id.clone(), layout);
    }
}
