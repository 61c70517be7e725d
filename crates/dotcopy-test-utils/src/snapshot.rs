//! [`TreeSnapshot`] captures everything a copy controls about a tree.

use std::fs;
use std::os::unix::fs::{MetadataExt, PermissionsExt};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    File(Vec<u8>),
    Symlink(PathBuf),
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSnapshot {
    /// Path relative to the snapshot root; empty for the root itself.
    pub path: PathBuf,
    pub kind: NodeKind,
    pub mode: u32,
    pub uid: u32,
    pub gid: u32,
}

/// Sorted list of nodes under a root, symlinks not followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeSnapshot {
    pub nodes: Vec<NodeSnapshot>,
}

impl TreeSnapshot {
    pub fn capture(root: &Path) -> Self {
        let mut nodes = Vec::new();
        for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
            let entry = entry.unwrap();
            let metadata = fs::symlink_metadata(entry.path()).unwrap();
            let file_type = metadata.file_type();
            let kind = if file_type.is_symlink() {
                NodeKind::Symlink(fs::read_link(entry.path()).unwrap())
            } else if file_type.is_dir() {
                NodeKind::Directory
            } else if file_type.is_file() {
                NodeKind::File(fs::read(entry.path()).unwrap())
            } else {
                NodeKind::Other
            };
            // Link permission bits are platform noise.
            let mode = if file_type.is_symlink() {
                0
            } else {
                metadata.permissions().mode() & 0o7777
            };
            nodes.push(NodeSnapshot {
                path: entry.path().strip_prefix(root).unwrap().to_path_buf(),
                kind,
                mode,
                uid: metadata.uid(),
                gid: metadata.gid(),
            });
        }
        Self { nodes }
    }

    pub fn get(&self, rel: &str) -> Option<&NodeSnapshot> {
        self.nodes.iter().find(|node| node.path == Path::new(rel))
    }
}
