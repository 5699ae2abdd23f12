//! [`SyncFixture`] for sync scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding `hugo/`, `obsidian/` and a state file path.
///
/// Both trees exist on creation; the state file does not.
///
/// # Example
///
/// ```rust,no_run
/// use mdbridge_test_utils::SyncFixture;
///
/// let fixture = SyncFixture::new();
/// fixture.write_hugo("my-post.md", "# Hello\n");
/// fixture.assert_obsidian_missing("my-post.md");
/// ```
pub struct SyncFixture {
    temp_dir: TempDir,
}

impl Default for SyncFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("hugo")).unwrap();
        fs::create_dir_all(temp_dir.path().join("obsidian")).unwrap();
        Self { temp_dir }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn hugo_root(&self) -> PathBuf {
        self.root().join("hugo")
    }

    pub fn obsidian_root(&self) -> PathBuf {
        self.root().join("obsidian")
    }

    pub fn state_path(&self) -> PathBuf {
        self.root().join("state").join("state.json")
    }

    pub fn hugo_path(&self, relative: &str) -> PathBuf {
        self.hugo_root().join(relative)
    }

    pub fn obsidian_path(&self, relative: &str) -> PathBuf {
        self.obsidian_root().join(relative)
    }

    /// Write `content` at `relative` inside the Hugo tree, creating parents.
    pub fn write_hugo(&self, relative: &str, content: &str) -> PathBuf {
        write(self.hugo_path(relative), content)
    }

    /// Write `content` at `relative` inside the Obsidian vault, creating parents.
    pub fn write_obsidian(&self, relative: &str, content: &str) -> PathBuf {
        write(self.obsidian_path(relative), content)
    }

    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read_hugo(&self, relative: &str) -> String {
        read(self.hugo_path(relative))
    }

    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read_obsidian(&self, relative: &str) -> String {
        read(self.obsidian_path(relative))
    }

    /// Write a YAML configuration pointing at this fixture's trees and
    /// return its path. `extra` is appended verbatim (e.g. `"direction: pull\n"`).
    pub fn write_config(&self, extra: &str) -> PathBuf {
        let path = self.root().join("config.yaml");
        let config = format!(
            "hugo_content: {}\nobsidian_vault: {}\nstate_file: {}\n{extra}",
            self.hugo_root().display(),
            self.obsidian_root().display(),
            self.state_path().display(),
        );
        fs::write(&path, config).unwrap();
        path
    }

    /// # Panics
    /// Panics if the Obsidian file does not exist.
    pub fn assert_obsidian_exists(&self, relative: &str) {
        let path = self.obsidian_path(relative);
        assert!(path.exists(), "Expected file to exist: {}", path.display());
    }

    /// # Panics
    /// Panics if the Obsidian file exists.
    pub fn assert_obsidian_missing(&self, relative: &str) {
        let path = self.obsidian_path(relative);
        assert!(!path.exists(), "Expected file NOT to exist: {}", path.display());
    }

    /// # Panics
    /// Panics if the Hugo file does not exist.
    pub fn assert_hugo_exists(&self, relative: &str) {
        let path = self.hugo_path(relative);
        assert!(path.exists(), "Expected file to exist: {}", path.display());
    }

    /// # Panics
    /// Panics if the Hugo file exists.
    pub fn assert_hugo_missing(&self, relative: &str) {
        let path = self.hugo_path(relative);
        assert!(!path.exists(), "Expected file NOT to exist: {}", path.display());
    }
}

fn write(path: PathBuf, content: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

fn read(path: PathBuf) -> String {
    fs::read_to_string(&path)
        .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
}
