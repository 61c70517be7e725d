//! Mode and ownership application

use crate::{Error, Result};
use std::fs::{self, FileType, Permissions};
use std::os::unix::fs::{self as unix_fs, PermissionsExt};
use std::path::Path;
use walkdir::WalkDir;

/// Numeric owner and group applied to everything a copy produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ownership {
    pub uid: u32,
    pub gid: u32,
}

impl Ownership {
    pub fn new(uid: u32, gid: u32) -> Self {
        Self { uid, gid }
    }
}

/// Permission bits for the two node kinds of a copied tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeModes {
    pub file: u32,
    pub dir: u32,
}

/// Set `mode` on `path`, then hand it to `owner`.
///
/// Both calls follow symlinks.
pub fn chmod_own(path: &Path, mode: u32, owner: Ownership) -> Result<()> {
    fs::set_permissions(path, Permissions::from_mode(mode)).map_err(|e| Error::io(path, e))?;
    unix_fs::chown(path, Some(owner.uid), Some(owner.gid)).map_err(|e| Error::io(path, e))
}

/// Change the ownership of a symlink itself, leaving its target alone.
pub fn lchown(path: &Path, owner: Ownership) -> Result<()> {
    unix_fs::lchown(path, Some(owner.uid), Some(owner.gid)).map_err(|e| Error::io(path, e))
}

/// Apply `modes` and `owner` to every node under `root`, `root` included.
///
/// Directories get `modes.dir`, regular files get `modes.file`, symlinks only
/// get their ownership changed and are never followed. Children are visited
/// before their parent so a restrictive directory mode cannot lock the walk
/// out of its own subtree.
pub fn apply_tree(root: &Path, modes: TreeModes, owner: Ownership) -> Result<()> {
    for entry in WalkDir::new(root).follow_links(false).contents_first(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            let source = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
            Error::io(path, source)
        })?;
        apply_by_type(entry.path(), entry.file_type(), modes, owner)?;
    }
    Ok(())
}

/// Apply the rule for whatever kind of node `path` is, without following it.
pub fn apply_node(path: &Path, modes: TreeModes, owner: Ownership) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| Error::io(path, e))?;
    apply_by_type(path, metadata.file_type(), modes, owner)
}

fn apply_by_type(path: &Path, file_type: FileType, modes: TreeModes, owner: Ownership) -> Result<()> {
    if file_type.is_symlink() {
        lchown(path, owner)
    } else if file_type.is_dir() {
        chmod_own(path, modes.dir, owner)
    } else if file_type.is_file() {
        chmod_own(path, modes.file, owner)
    } else {
        tracing::debug!(path = %path.display(), "Skipping special file");
        Ok(())
    }
}
