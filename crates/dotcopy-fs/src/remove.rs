//! Destructive removal of whatever occupies a destination

use crate::{Error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// What [`remove_existing`] found and removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removed {
    /// A symlink was unlinked; its target is untouched.
    Link,
    File,
    /// A directory and all of its contents.
    Directory,
    /// Nothing was there.
    Nothing,
}

impl Removed {
    /// Human-readable node kind, `None` when nothing was removed.
    pub fn kind(&self) -> Option<&'static str> {
        match self {
            Self::Link => Some("link"),
            Self::File => Some("file"),
            Self::Directory => Some("directory"),
            Self::Nothing => None,
        }
    }
}

/// Remove the symlink, file or directory tree at `path`.
///
/// A missing path is not an error. Special files (FIFOs, sockets, devices)
/// are left in place and reported as [`Removed::Nothing`].
pub fn remove_existing(path: &Path) -> Result<Removed> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Removed::Nothing),
        Err(e) => return Err(Error::io(path, e)),
    };
    let file_type = metadata.file_type();

    let removed = if file_type.is_symlink() {
        fs::remove_file(path).map_err(|e| Error::io(path, e))?;
        Removed::Link
    } else if file_type.is_file() {
        fs::remove_file(path).map_err(|e| Error::io(path, e))?;
        Removed::File
    } else if file_type.is_dir() {
        fs::remove_dir_all(path).map_err(|e| Error::io(path, e))?;
        Removed::Directory
    } else {
        Removed::Nothing
    };

    tracing::debug!(path = %path.display(), ?removed, "Removed existing destination");
    Ok(removed)
}
