//! SHA-256 content fingerprints
//!
//! Every fingerprint uses the canonical `sha256:<hex>` format. The empty
//! string is reserved for "file absent" so that state records can compare a
//! missing document against a recorded one without a separate flag.

use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::Path;

/// Prefix for all checksums produced by this module
const PREFIX: &str = "sha256:";

/// Fingerprint denoting a file that does not exist.
pub const ABSENT: &str = "";

/// Compute the SHA-256 checksum of string content.
///
/// Returns a string in the canonical format `"sha256:<hex>"`.
pub fn compute_content_checksum(content: &str) -> String {
    compute_bytes_checksum(content.as_bytes())
}

/// Compute the SHA-256 checksum of a file's contents.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn compute_file_checksum(path: &Path) -> std::io::Result<String> {
    let content = std::fs::read(path)?;
    Ok(compute_bytes_checksum(&content))
}

/// Fingerprint a file, yielding [`ABSENT`] when it does not exist.
///
/// A file that exists but cannot be read is also reported as absent, with a
/// warning, so one unreadable document never aborts a scan.
pub fn fingerprint(path: &Path) -> String {
    match compute_file_checksum(path) {
        Ok(checksum) => checksum,
        Err(e) if e.kind() == ErrorKind::NotFound => ABSENT.to_string(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Unreadable file fingerprinted as absent");
            ABSENT.to_string()
        }
    }
}

fn compute_bytes_checksum(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{}{:x}", PREFIX, hasher.finalize())
}
