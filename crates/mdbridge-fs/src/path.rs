//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Document identifiers and state keys are derived from these, so the same
/// document yields the same key on every platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        let normalized = path_str.replace('\\', "/");
        Self { inner: normalized }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 { None } else { Some(&name[idx + 1..]) }
        })
    }

    /// Strip the extension from the final component, if any.
    pub fn without_extension(&self) -> Self {
        match self.extension() {
            Some(ext) => {
                let trimmed = self.inner.trim_end_matches('/');
                Self {
                    inner: trimmed[..trimmed.len() - ext.len() - 1].to_string(),
                }
            }
            None => self.clone(),
        }
    }
}

/// Expand a leading `~` to the current user's home directory.
///
/// Paths without the shorthand, and `~user` forms, are returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    let rest = if path == "~" {
        Some("")
    } else {
        path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\"))
    };

    match (rest, dirs::home_dir()) {
        (Some(""), Some(home)) => home,
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("posts/my-post.md", "posts/my-post")]
    #[case("my-post.md", "my-post")]
    #[case("gallery/index.md", "gallery/index")]
    #[case("v1.2/notes.md", "v1.2/notes")]
    #[case("no-extension", "no-extension")]
    #[case(".hidden", ".hidden")]
    fn without_extension_strips_final_suffix(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(NormalizedPath::new(input).without_extension().as_str(), expected);
    }

    #[test]
    fn backslashes_are_normalized() {
        let path = NormalizedPath::new("posts\\nested\\a.md");
        assert_eq!(path.as_str(), "posts/nested/a.md");
        assert_eq!(path.file_name(), Some("a.md"));
        assert_eq!(path.extension(), Some("md"));
    }

    #[test]
    fn expand_home_leaves_plain_paths() {
        assert_eq!(expand_home("/var/state.json"), PathBuf::from("/var/state.json"));
        assert_eq!(expand_home("relative/dir"), PathBuf::from("relative/dir"));
    }

    #[test]
    fn expand_home_replaces_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~"), home);
            assert_eq!(expand_home("~/.config/mdbridge"), home.join(".config/mdbridge"));
        }
    }
}
