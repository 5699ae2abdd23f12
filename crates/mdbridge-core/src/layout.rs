//! Physical layouts of a document

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::id::DocumentId;
use crate::side::Side;

/// File name of a Hugo page bundle's content file.
pub const HUGO_INDEX: &str = "index.md";

/// How a document is stored on disk.
///
/// Serialized as `"single"` / `"directory"` in the state file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// `<id>.md`
    Single,
    /// `<id>/index.md` on Hugo, `<id>/<leaf>.md` on Obsidian, next to the
    /// document's assets
    Directory,
}

impl Layout {
    /// Path of document `id` stored with this layout in a `side` tree at `root`.
    pub fn document_path(self, root: &Path, id: &DocumentId, side: Side) -> PathBuf {
        match self {
            Layout::Single => root.join(format!("{}.md", id)),
            Layout::Directory => {
                let dir = root.join(id.as_str());
                match side {
                    Side::Hugo => dir.join(HUGO_INDEX),
                    Side::Obsidian => dir.join(format!("{}.md", id.leaf())),
                }
            }
        }
    }

    /// Where `id` currently lives in the tree at `root`, if anywhere.
    ///
    /// Both directory filenames are accepted on either side since the
    /// scanner maps both to the same id. The directory forms are tried
    /// first; a tree holding more than one of these files is rejected by
    /// the scanner as an id collision.
    pub fn locate(root: &Path, id: &DocumentId) -> Option<(Layout, PathBuf)> {
        let dir = root.join(id.as_str());
        [
            (Layout::Directory, dir.join(HUGO_INDEX)),
            (Layout::Directory, dir.join(format!("{}.md", id.leaf()))),
            (Layout::Single, Layout::Single.document_path(root, id, Side::Hugo)),
        ]
        .into_iter()
        .find(|(_, path)| path.is_file())
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Single => write!(f, "single"),
            Layout::Directory => write!(f, "directory"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn document_paths_per_side() {
        let root = Path::new("/trees");
        let id = DocumentId::new("posts/gallery");

        assert_eq!(
            Layout::Single.document_path(root, &id, Side::Hugo),
            PathBuf::from("/trees/posts/gallery.md")
        );
        assert_eq!(
            Layout::Directory.document_path(root, &id, Side::Hugo),
            PathBuf::from("/trees/posts/gallery/index.md")
        );
        assert_eq!(
            Layout::Directory.document_path(root, &id, Side::Obsidian),
            PathBuf::from("/trees/posts/gallery/gallery.md")
        );
    }

    #[test]
    fn locate_accepts_either_directory_filename() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("gallery")).unwrap();
        std::fs::write(dir.path().join("gallery/index.md"), "x").unwrap();
        std::fs::create_dir_all(dir.path().join("notes")).unwrap();
        std::fs::write(dir.path().join("notes/notes.md"), "x").unwrap();

        assert_eq!(
            Layout::locate(dir.path(), &DocumentId::new("gallery")),
            Some((Layout::Directory, dir.path().join("gallery/index.md")))
        );
        assert_eq!(
            Layout::locate(dir.path(), &DocumentId::new("notes")),
            Some((Layout::Directory, dir.path().join("notes/notes.md")))
        );
    }

    #[test]
    fn locate_finds_single_file_or_nothing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("post.md"), "x").unwrap();

        assert_eq!(
            Layout::locate(dir.path(), &DocumentId::new("post")),
            Some((Layout::Single, dir.path().join("post.md")))
        );
        assert_eq!(Layout::locate(dir.path(), &DocumentId::new("missing")), None);
    }

    #[test]
    fn serde_tags_match_state_file_format() {
        assert_eq!(serde_json::to_string(&Layout::Single).unwrap(), "\"single\"");
        assert_eq!(
            serde_json::from_str::<Layout>("\"directory\"").unwrap(),
            Layout::Directory
        );
    }
}
