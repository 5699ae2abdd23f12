//! Filesystem primitives for mdbridge
//!
//! Content fingerprints, atomic writes, forward-slash paths and
//! config loading by file extension shared by the sync crates.

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use checksum::{compute_content_checksum, compute_file_checksum, fingerprint};
pub use config::{ConfigFormat, load_config};
pub use error::{Error, Result};
pub use path::{NormalizedPath, expand_home};
