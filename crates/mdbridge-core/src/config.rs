//! Sync configuration
//!
//! Loaded from a YAML (or JSON/TOML) file through [`load_config`]; command
//! line flags override individual fields afterwards.

use std::fmt;
use std::path::{Path, PathBuf};

use mdbridge_fs::{expand_home, load_config};
use serde::{Deserialize, Serialize};

use crate::side::Side;
use crate::{Error, Result};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "MDBRIDGE_CONFIG";

/// State file used when the configuration names none.
pub const DEFAULT_STATE_FILE: &str = "~/.config/mdbridge/state.json";

/// Which way documents are allowed to flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncDirection {
    #[default]
    Bidirectional,
    /// Obsidian to Hugo only
    Push,
    /// Hugo to Obsidian only
    Pull,
}

impl SyncDirection {
    /// Whether content may be copied away from side `from`.
    pub fn allows(self, from: Side) -> bool {
        match self {
            SyncDirection::Bidirectional => true,
            SyncDirection::Push => from == Side::Obsidian,
            SyncDirection::Pull => from == Side::Hugo,
        }
    }
}

impl fmt::Display for SyncDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncDirection::Bidirectional => write!(f, "bidirectional"),
            SyncDirection::Push => write!(f, "push (Obsidian -> Hugo)"),
            SyncDirection::Pull => write!(f, "pull (Hugo -> Obsidian)"),
        }
    }
}

/// Per-run behaviour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    pub direction: SyncDirection,
    /// Report what would happen without touching either tree or the state
    pub dry_run: bool,
    /// Resolve every conflict in favour of this side without asking
    pub force: Option<Side>,
}

/// Contents of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Hugo content directory
    pub hugo_content: String,
    /// Obsidian vault directory
    pub obsidian_vault: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_file: Option<String>,
    #[serde(default)]
    pub direction: SyncDirection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force: Option<Side>,
}

impl SyncConfig {
    /// Load the configuration at `path`.
    ///
    /// # Errors
    ///
    /// [`Error::ConfigNotFound`] when the file does not exist, or the
    /// underlying parse error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let config: Self = load_config(path)?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Configuration path from `MDBRIDGE_CONFIG`, else the per-user config
    /// directory.
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("mdbridge").join("config.yaml"))
    }

    pub fn hugo_dir(&self) -> PathBuf {
        expand_home(&self.hugo_content)
    }

    pub fn obsidian_dir(&self) -> PathBuf {
        expand_home(&self.obsidian_vault)
    }

    pub fn state_path(&self) -> PathBuf {
        expand_home(self.state_file.as_deref().unwrap_or(DEFAULT_STATE_FILE))
    }

    /// Options as configured, before command line overrides.
    pub fn options(&self) -> SyncOptions {
        SyncOptions {
            direction: self.direction,
            dry_run: false,
            force: self.force,
        }
    }
}
