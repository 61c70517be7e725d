//! [`TestTree`] sandbox for copy scenarios.

use dotcopy_fs::{Ownership, PathExpander};
use std::fs;
use std::os::unix::fs::{MetadataExt, PermissionsExt, symlink};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding a dotfiles checkout (`dotfiles/`) and a
/// fake home directory (`home/`).
///
/// # Example
///
/// ```rust,no_run
/// use dotcopy_test_utils::TestTree;
///
/// let tree = TestTree::new();
/// tree.write_source("vimrc", "set number\n");
/// tree.assert_missing("home/.vimrc");
/// ```
pub struct TestTree {
    temp_dir: TempDir,
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTree {
    /// Create the sandbox with empty `dotfiles/` and `home/` directories.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("dotfiles")).unwrap();
        fs::create_dir(temp_dir.path().join("home")).unwrap();
        Self { temp_dir }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Base directory relative sources resolve against.
    pub fn base(&self) -> PathBuf {
        self.root().join("dotfiles")
    }

    /// Fake home directory `~` expands to.
    pub fn home(&self) -> PathBuf {
        self.root().join("home")
    }

    /// Expander pinned to [`TestTree::home`].
    pub fn expander(&self) -> PathExpander {
        PathExpander::new().with_home(self.home())
    }

    /// Owner and group of the sandbox, i.e. the test process's identity.
    pub fn owner(&self) -> Ownership {
        let metadata = fs::metadata(self.root()).unwrap();
        Ownership::new(metadata.uid(), metadata.gid())
    }

    /// Whether the test process runs as root, which bypasses permission checks.
    pub fn is_root(&self) -> bool {
        self.owner().uid == 0
    }

    /// Write a file under `dotfiles/`, creating its directories.
    pub fn write_source(&self, rel: &str, content: &str) -> PathBuf {
        self.write(&self.base().join(rel), content)
    }

    /// Write a file under `home/`, creating its directories.
    pub fn write_home(&self, rel: &str, content: &str) -> PathBuf {
        self.write(&self.home().join(rel), content)
    }

    /// Create a symlink at `dotfiles/<rel>` pointing at `target` verbatim.
    pub fn symlink_source(&self, rel: &str, target: &str) -> PathBuf {
        let link = self.base().join(rel);
        if let Some(parent) = link.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        symlink(target, &link).unwrap();
        link
    }

    /// Set the permission bits of `path` (relative to root).
    pub fn chmod(&self, rel: &str, mode: u32) {
        fs::set_permissions(self.root().join(rel), fs::Permissions::from_mode(mode)).unwrap();
    }

    /// Permission bits of `path` (relative to root), without following links.
    pub fn mode_of(&self, rel: &str) -> u32 {
        fs::symlink_metadata(self.root().join(rel))
            .unwrap_or_else(|_| panic!("Could not stat {rel}"))
            .permissions()
            .mode()
            & 0o7777
    }

    /// Assert that `path` (relative to root) has exactly `mode`.
    pub fn assert_mode(&self, rel: &str, mode: u32) {
        let actual = self.mode_of(rel);
        assert_eq!(
            actual, mode,
            "Mode of {rel}: expected {mode:04o}, got {actual:04o}"
        );
    }

    /// Assert that `path` (relative to root) is owned by `owner`.
    pub fn assert_owner(&self, rel: &str, owner: Ownership) {
        let metadata = fs::symlink_metadata(self.root().join(rel)).unwrap();
        assert_eq!(
            (metadata.uid(), metadata.gid()),
            (owner.uid, owner.gid),
            "Ownership of {rel}"
        );
    }

    /// Assert that `path` (relative to root) is a regular file with `content`.
    pub fn assert_file(&self, rel: &str, content: &str) {
        let full_path = self.root().join(rel);
        let metadata = fs::symlink_metadata(&full_path)
            .unwrap_or_else(|_| panic!("Expected file to exist: {}", full_path.display()));
        assert!(metadata.is_file(), "Expected regular file: {}", full_path.display());
        assert_eq!(fs::read_to_string(&full_path).unwrap(), content, "Content of {rel}");
    }

    /// Assert that `path` (relative to root) is a symlink pointing at `target`.
    pub fn assert_symlink(&self, rel: &str, target: &str) {
        let full_path = self.root().join(rel);
        let metadata = fs::symlink_metadata(&full_path)
            .unwrap_or_else(|_| panic!("Expected symlink to exist: {}", full_path.display()));
        assert!(
            metadata.file_type().is_symlink(),
            "Expected symlink: {}",
            full_path.display()
        );
        assert_eq!(fs::read_link(&full_path).unwrap(), Path::new(target));
    }

    /// Assert that nothing exists at `path` (relative to root), not even a
    /// dangling link.
    pub fn assert_missing(&self, rel: &str) {
        let full_path = self.root().join(rel);
        assert!(
            fs::symlink_metadata(&full_path).is_err(),
            "Expected path NOT to exist: {}",
            full_path.display()
        );
    }

    fn write(&self, path: &Path, content: &str) -> PathBuf {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
        path.to_path_buf()
    }
}
