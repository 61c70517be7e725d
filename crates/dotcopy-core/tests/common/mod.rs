//! Helpers shared by the dotcopy-core integration tests.

#![allow(dead_code)]

use dotcopy_core::{FileMode, ResolvedPolicy};
use dotcopy_test_utils::TestTree;

/// Policy copying `dotfiles/<source>` to `home/<destination>` with the
/// built-in modes and the sandbox owner.
pub fn policy(tree: &TestTree, source: &str, destination: &str) -> ResolvedPolicy {
    let owner = tree.owner();
    ResolvedPolicy {
        force: false,
        create: false,
        fmode: FileMode::new(0o644),
        dmode: FileMode::new(0o755),
        uid: owner.uid,
        gid: owner.gid,
        source: tree.base().join(source),
        destination: tree.home().join(destination),
    }
}
