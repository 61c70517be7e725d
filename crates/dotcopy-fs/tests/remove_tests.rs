//! Tests for destructive removal

use assert_fs::TempDir;
use assert_fs::prelude::*;
use dotcopy_fs::{Removed, remove_existing};
use predicates::prelude::*;
use std::os::unix::fs::symlink;

#[test]
fn missing_path_is_a_no_op() {
    let temp = TempDir::new().unwrap();
    let removed = remove_existing(&temp.path().join("absent")).unwrap();
    assert_eq!(removed, Removed::Nothing);
    assert_eq!(removed.kind(), None);
}

#[test]
fn regular_file_is_removed() {
    let temp = TempDir::new().unwrap();
    let file = temp.child(".bashrc");
    file.write_str("old").unwrap();

    assert_eq!(remove_existing(file.path()).unwrap(), Removed::File);
    file.assert(predicate::path::missing());
}

#[test]
fn symlink_is_unlinked_without_touching_target() {
    let temp = TempDir::new().unwrap();
    let target = temp.child("target-dir");
    target.child("precious").write_str("keep me").unwrap();
    let link = temp.path().join("link");
    symlink(target.path(), &link).unwrap();

    assert_eq!(remove_existing(&link).unwrap(), Removed::Link);
    assert!(std::fs::symlink_metadata(&link).is_err());
    target.child("precious").assert("keep me");
}

#[test]
fn dangling_symlink_is_unlinked() {
    let temp = TempDir::new().unwrap();
    let link = temp.path().join("dangling");
    symlink("/no/such/target", &link).unwrap();

    assert_eq!(remove_existing(&link).unwrap(), Removed::Link);
    assert!(std::fs::symlink_metadata(&link).is_err());
}

#[test]
fn directory_tree_is_removed_recursively() {
    let temp = TempDir::new().unwrap();
    let dir = temp.child(".config/app");
    dir.child("a/b/c.txt").write_str("deep").unwrap();

    assert_eq!(remove_existing(dir.path()).unwrap(), Removed::Directory);
    dir.assert(predicate::path::missing());
    temp.child(".config").assert(predicate::path::is_dir());
}

mod permission_tests {
    use super::*;
    use std::fs::{self, Permissions};
    use std::os::unix::fs::PermissionsExt;

    /// New files are owned by the effective uid of the test process.
    fn is_root() -> bool {
        use std::os::unix::fs::MetadataExt;
        let probe = tempfile::NamedTempFile::new().unwrap();
        fs::metadata(probe.path()).unwrap().uid() == 0
    }

    #[test]
    fn removal_in_readonly_directory_fails() {
        if is_root() {
            eprintln!("Skipping test: running as root bypasses permission checks");
            return;
        }
        let temp = TempDir::new().unwrap();
        let locked = temp.child("locked");
        locked.child("file").write_str("x").unwrap();
        fs::set_permissions(locked.path(), Permissions::from_mode(0o555)).unwrap();

        let result = remove_existing(&locked.path().join("file"));

        fs::set_permissions(locked.path(), Permissions::from_mode(0o755)).unwrap();
        assert!(result.is_err(), "Removing from a read-only directory should fail");
        locked.child("file").assert("x");
    }
}
