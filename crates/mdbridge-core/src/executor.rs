//! Writing a document onto the other tree
//!
//! The executor decides where a document lands on the destination side,
//! converts its markup, writes it atomically and carries its assets along.
//! The chosen [`Layout`] is remembered as a shape hint so repeated round
//! trips never move a document between the single-file and directory forms.

use std::fs;
use std::path::{Path, PathBuf};

use mdbridge_fs::{NormalizedPath, io};

use crate::id::DocumentId;
use crate::layout::Layout;
use crate::scanner::detect_layout;
use crate::side::Side;
use crate::state::SyncState;
use crate::transform::Transform;
use crate::{Error, Result};

/// Image extensions that make a single-file document directory-worthy.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "svg", "webp"];

/// Copies documents from one tree to the other.
pub struct Executor<'a> {
    transform: &'a dyn Transform,
    dry_run: bool,
}

impl<'a> Executor<'a> {
    pub fn new(transform: &'a dyn Transform, dry_run: bool) -> Self {
        Self { transform, dry_run }
    }

    /// Write document `id` from `source` (inside `source_root` on
    /// `source_side`) into `dest_root` on the opposite side.
    ///
    /// Returns the destination document path, which in dry-run mode is the
    /// path that would have been written.
    ///
    /// # Errors
    ///
    /// Any read, write or copy failure. Nothing is written in dry-run mode.
    pub fn materialize(
        &self,
        source: &Path,
        source_root: &Path,
        source_side: Side,
        dest_root: &Path,
        id: &DocumentId,
        state: &mut SyncState,
    ) -> Result<PathBuf> {
        let dest_side = source_side.opposite();
        let source_layout = detect_layout(source, source_root);
        let assets = source_assets(source, source_layout)?;

        let (layout, path) = destination(dest_root, dest_side, id, source_layout, &assets, state);

        let dest_dir = path.parent().unwrap_or(dest_root).to_path_buf();
        let copy_assets = source_layout == Layout::Directory || layout == Layout::Directory;
        let asset_targets: Vec<(PathBuf, PathBuf)> = if copy_assets {
            assets
                .into_iter()
                .filter_map(|asset| {
                    let name = asset.file_name()?.to_owned();
                    Some((asset, dest_dir.join(name)))
                })
                .collect()
        } else {
            Vec::new()
        };

        if self.dry_run {
            tracing::info!(
                id = %id,
                path = %path.display(),
                assets = asset_targets.len(),
                "Would write document"
            );
            return Ok(path);
        }

        let content = io::read_text(&NormalizedPath::new(source))?;
        let converted = self.transform.transform(&content, source_side.outbound());
        io::write_text(&NormalizedPath::new(&path), &converted)?;

        for (asset, dest) in &asset_targets {
            io::copy_preserving(asset, dest)?;
        }

        state.record_shape(id, layout);
        tracing::info!(
            id = %id,
            from = %source_side,
            path = %path.display(),
            %layout,
            assets = asset_targets.len(),
            "Wrote document"
        );

        Ok(path)
    }
}

/// Layout and path a document takes on the destination tree.
///
/// A document already present is overwritten where it stands, whichever
/// directory filename it uses. Otherwise the shape hint decides, and for a
/// first copy the source's form and assets do.
fn destination(
    dest_root: &Path,
    dest_side: Side,
    id: &DocumentId,
    source_layout: Layout,
    assets: &[PathBuf],
    state: &SyncState,
) -> (Layout, PathBuf) {
    let hint = state.shape_hint(id);

    if let Some((existing, path)) = Layout::locate(dest_root, id) {
        if hint.is_some_and(|hint| hint != existing) {
            tracing::debug!(
                id = %id,
                ?hint,
                %existing,
                path = %path.display(),
                "Keeping the {} document where it is",
                dest_side
            );
        }
        return (existing, path);
    }

    let layout = match hint {
        Some(hint) => hint,
        None if source_layout == Layout::Directory || !assets.is_empty() => Layout::Directory,
        None => Layout::Single,
    };
    (layout, layout.document_path(dest_root, id, dest_side))
}

/// Files that travel with a document.
///
/// A directory-form document owns every non-markdown file in its directory.
/// A single-file document only has images next to it, and only those.
fn source_assets(source: &Path, layout: Layout) -> Result<Vec<PathBuf>> {
    let Some(dir) = source.parent() else {
        return Ok(Vec::new());
    };

    let entries = fs::read_dir(dir).map_err(|e| Error::Fs(mdbridge_fs::Error::io(dir, e)))?;
    let mut assets = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() || path == source {
            continue;
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        let wanted = match layout {
            Layout::Directory => extension != "md",
            Layout::Single => IMAGE_EXTENSIONS.contains(&extension.as_str()),
        };
        if wanted {
            assets.push(path);
        }
    }

    assets.sort();
    Ok(assets)
}
