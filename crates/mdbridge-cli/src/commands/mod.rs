//! Command implementations for mdbridge-cli

pub mod convert;
pub mod status;
pub mod sync;

use std::path::{Path, PathBuf};

use mdbridge_core::SyncConfig;

use crate::error::{CliError, Result};

pub use convert::run_convert;
pub use status::run_status;
pub use sync::{SyncArgs, run_sync};

/// Resolve the configuration path and load it.
fn load_config(explicit: Option<&Path>) -> Result<SyncConfig> {
    let path: PathBuf = match explicit {
        Some(path) => path.to_path_buf(),
        None => SyncConfig::default_path().ok_or_else(|| {
            CliError::user("No configuration directory; pass --config or set MDBRIDGE_CONFIG")
        })?,
    };
    Ok(SyncConfig::load(&path)?)
}
