//! Single-level parent directory creation

use crate::meta::{Ownership, chmod_own};
use crate::{Error, Result};
use std::fs::DirBuilder;
use std::os::unix::fs::DirBuilderExt;
use std::path::{Component, Path, PathBuf};

/// Outcome of [`create_parent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentStatus {
    /// The parent was already there and was left untouched.
    Existing(PathBuf),
    /// The parent was created with the requested mode and ownership.
    Created(PathBuf),
}

impl ParentStatus {
    pub fn path(&self) -> &Path {
        match self {
            Self::Existing(path) | Self::Created(path) => path,
        }
    }
}

/// Create the immediate parent of `destination` if it does not exist.
///
/// Only one level is created: a missing grandparent is an error. A freshly
/// created directory gets `dmode` and `owner` applied explicitly so the
/// process umask has no say.
pub fn create_parent(destination: &Path, dmode: u32, owner: Ownership) -> Result<ParentStatus> {
    let parent = parent_of(destination)?;
    if parent.exists() {
        return Ok(ParentStatus::Existing(parent));
    }

    DirBuilder::new()
        .mode(dmode)
        .create(&parent)
        .map_err(|e| Error::io(&parent, e))?;
    chmod_own(&parent, dmode, owner)?;

    tracing::debug!(path = %parent.display(), mode = format_args!("{dmode:o}"), "Created parent directory");
    Ok(ParentStatus::Created(parent))
}

/// Absolute, lexically normalized parent of `path`.
///
/// `..` components are folded without touching the filesystem, so the
/// parent of `a/b/..` is the current directory rather than `a/b`.
pub fn parent_of(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path).map_err(|e| Error::io(path, e))?;
    Ok(normalize(&absolute.join("..")))
}

fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                normalized.pop();
            }
            Component::CurDir => {}
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
