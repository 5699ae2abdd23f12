//! Document discovery
//!
//! Walks a tree and maps every markdown document to its [`DocumentId`].
//! Files whose name starts with `_` (Hugo section pages such as `_index.md`)
//! are not documents, and hidden directories (`.obsidian`, `.git`) are never
//! entered.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::path::{Path, PathBuf};

use mdbridge_fs::NormalizedPath;
use walkdir::{DirEntry, WalkDir};

use crate::id::DocumentId;
use crate::layout::{HUGO_INDEX, Layout};
use crate::{Error, Result};

/// Extension of document files.
const DOCUMENT_EXTENSION: &str = "md";

/// Prefix marking markdown files that are not documents.
const RESERVED_PREFIX: char = '_';

/// Documents of one tree, keyed and ordered by id.
pub type DocumentMap = BTreeMap<DocumentId, PathBuf>;

/// Scan `root` for documents.
///
/// A missing root is an empty tree.
///
/// # Errors
///
/// Returns [`Error::IdCollision`] when two files resolve to one id (for
/// example `gallery.md` next to `gallery/index.md`), and [`Error::Scan`] when
/// the walk itself fails.
pub fn scan(root: &Path) -> Result<DocumentMap> {
    let mut documents = DocumentMap::new();

    if !root.exists() {
        tracing::debug!(root = %root.display(), "Tree does not exist, treating as empty");
        return Ok(documents);
    }

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e));

    for entry in walker {
        let entry = entry.map_err(|e| Error::Scan {
            path: root.to_path_buf(),
            message: e.to_string(),
        })?;

        if !entry.file_type().is_file() || !is_document(entry.path()) {
            continue;
        }

        let Some((id, _)) = identify(entry.path(), root) else {
            continue;
        };

        match documents.entry(id) {
            Entry::Vacant(slot) => {
                slot.insert(entry.path().to_path_buf());
            }
            Entry::Occupied(existing) => {
                return Err(Error::IdCollision {
                    id: existing.key().to_string(),
                    first: existing.get().clone(),
                    second: entry.path().to_path_buf(),
                });
            }
        }
    }

    tracing::debug!(root = %root.display(), count = documents.len(), "Scanned tree");
    Ok(documents)
}

/// Derive the id and physical layout of the document at `path` under `root`.
///
/// - `<dir>/index.md` is the directory-form document `<dir>`
/// - `<dir>/<leaf>/<leaf>.md` is the directory-form document `<dir>/<leaf>`
/// - anything else is the single-file document named by its extension-free path
///
/// Returns `None` when `path` is not below `root`.
pub fn identify(path: &Path, root: &Path) -> Option<(DocumentId, Layout)> {
    let relative = NormalizedPath::new(path.strip_prefix(root).ok()?);
    let segments: Vec<&str> = relative.as_str().split('/').collect();

    if let [parents @ .., dir, file] = segments.as_slice() {
        let stem = file.strip_suffix(".md").unwrap_or(*file);
        if *file == HUGO_INDEX || stem == *dir {
            let mut id = parents.join("/");
            if !id.is_empty() {
                id.push('/');
            }
            id.push_str(dir);
            return Some((DocumentId::new(id), Layout::Directory));
        }
    }

    Some((
        DocumentId::new(relative.without_extension().as_str()),
        Layout::Single,
    ))
}

/// Physical layout of the document at `path` under `root`.
pub fn detect_layout(path: &Path, root: &Path) -> Layout {
    identify(path, root)
        .map(|(_, layout)| layout)
        .unwrap_or(Layout::Single)
}

fn is_document(path: &Path) -> bool {
    let is_markdown = path
        .extension()
        .is_some_and(|ext| ext == DOCUMENT_EXTENSION);
    let reserved = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(RESERVED_PREFIX));
    is_markdown && !reserved
}

fn is_hidden(entry: &DirEntry) -> bool {
    // The root itself may live under a dot-directory
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}
