//! Filesystem primitives for dotcopy
//!
//! Provides the blocking, Unix-only operations the reconciler sequences for
//! each mapping entry: path expansion, destructive removal, single-level
//! parent creation, symlink-preserving copies and the mode/ownership walk.

pub mod copy;
pub mod create;
pub mod error;
pub mod expand;
pub mod meta;
pub mod remove;

pub use copy::{copy_file, copy_tree, is_dir};
pub use create::{ParentStatus, create_parent, parent_of};
pub use error::{Error, Result};
pub use expand::PathExpander;
pub use meta::{Ownership, TreeModes, apply_node, apply_tree, chmod_own, lchown};
pub use remove::{Removed, remove_existing};
