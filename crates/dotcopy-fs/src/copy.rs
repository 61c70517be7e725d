//! Symlink-preserving file and tree copies
//!
//! Neither function applies any metadata policy: modes copied here are
//! whatever the platform copy leaves behind and are expected to be
//! overwritten by [`crate::meta`].

use crate::{Error, Result};
use std::fs;
use std::os::unix::fs::{MetadataExt, symlink};
use std::path::Path;

/// Copy a single non-directory `source` to `destination`.
///
/// A symlink source is recreated as a symlink with the same target instead
/// of being dereferenced. A regular file is copied byte for byte, replacing
/// an existing regular file at `destination`. A symlink already sitting at
/// `destination` is unlinked first so the write never lands on its target.
pub fn copy_file(source: &Path, destination: &Path) -> Result<()> {
    let destination_is_link = fs::symlink_metadata(destination)
        .is_ok_and(|metadata| metadata.file_type().is_symlink());
    if !destination_is_link && same_file(source, destination) {
        return Err(Error::SameFile {
            path: source.to_path_buf(),
        });
    }

    let metadata = fs::symlink_metadata(source).map_err(|e| Error::io(source, e))?;
    let file_type = metadata.file_type();
    if file_type.is_symlink() {
        copy_symlink(source, destination)
    } else if file_type.is_file() {
        if destination_is_link {
            fs::remove_file(destination).map_err(|e| Error::io(destination, e))?;
            tracing::debug!(path = %destination.display(), "Unlinked symlink at copy destination");
        }
        fs::copy(source, destination)
            .map(|_| ())
            .map_err(|e| Error::copy(source, destination, e))
    } else {
        Err(Error::UnsupportedFileType {
            path: source.to_path_buf(),
        })
    }
}

/// Recursively copy the directory `source` to a new `destination`.
///
/// `destination` must not exist yet; missing ancestors are created. Symlinks
/// are recreated as links and never followed. Failures on individual entries
/// do not stop the copy: every entry is attempted and all failures are
/// reported together as [`Error::Tree`].
pub fn copy_tree(source: &Path, destination: &Path) -> Result<()> {
    if fs::symlink_metadata(destination).is_ok() {
        return Err(Error::DestinationExists {
            path: destination.to_path_buf(),
        });
    }
    let entries = fs::read_dir(source).map_err(|e| Error::io(source, e))?;
    fs::create_dir_all(destination).map_err(|e| Error::io(destination, e))?;

    let mut failures = Vec::new();
    copy_entries(source, entries, destination, &mut failures);

    if failures.is_empty() {
        tracing::debug!(
            source = %source.display(),
            destination = %destination.display(),
            "Copied directory tree"
        );
        Ok(())
    } else {
        Err(Error::Tree {
            source_root: source.to_path_buf(),
            destination: destination.to_path_buf(),
            failures,
        })
    }
}

fn copy_entries(
    source: &Path,
    entries: fs::ReadDir,
    destination: &Path,
    failures: &mut Vec<Error>,
) {
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                failures.push(Error::io(source, e));
                continue;
            }
        };
        let from = entry.path();
        let to = destination.join(entry.file_name());

        if let Err(e) = copy_entry(&entry, &from, &to, failures) {
            failures.push(e);
        }
    }
}

fn copy_entry(
    entry: &fs::DirEntry,
    from: &Path,
    to: &Path,
    failures: &mut Vec<Error>,
) -> Result<()> {
    let file_type = entry.file_type().map_err(|e| Error::io(from, e))?;

    if file_type.is_symlink() {
        copy_symlink(from, to)
    } else if file_type.is_dir() {
        let entries = fs::read_dir(from).map_err(|e| Error::io(from, e))?;
        fs::create_dir(to).map_err(|e| Error::io(to, e))?;
        copy_entries(from, entries, to, failures);
        Ok(())
    } else if file_type.is_file() {
        fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| Error::copy(from, to, e))
    } else {
        Err(Error::UnsupportedFileType {
            path: from.to_path_buf(),
        })
    }
}

fn copy_symlink(source: &Path, destination: &Path) -> Result<()> {
    let target = fs::read_link(source).map_err(|e| Error::io(source, e))?;
    symlink(&target, destination).map_err(|e| Error::copy(source, destination, e))
}

/// Whether both paths resolve to the same inode. Missing paths never match.
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::metadata(a), fs::metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

/// Whether `path` resolves to a directory, following symlinks.
///
/// Unreadable or missing paths are not directories; the copy that follows
/// reports the real error.
pub fn is_dir(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|metadata| metadata.is_dir())
}
