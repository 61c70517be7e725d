//! Filesystem reconciliation for one resolved entry
//!
//! Each entry runs the same linear sequence: remove (when `force`), create
//! the parent (when `create`), copy. Every step catches its own filesystem
//! errors, logs them as warnings and reports `false`; later steps still run.
//! Nothing is rolled back.

use crate::context::Log;
use crate::policy::ResolvedPolicy;
use dotcopy_fs::{self as fs, ParentStatus};
use std::path::Path;

/// Drives the remove/create/copy sequence and reports through a [`Log`].
pub struct Reconciler<'a, L: ?Sized> {
    log: &'a L,
}

impl<'a, L: Log + ?Sized> Reconciler<'a, L> {
    pub fn new(log: &'a L) -> Self {
        Self { log }
    }

    /// Apply `policy`. Returns `true` only if every step that ran succeeded.
    pub fn reconcile(&self, policy: &ResolvedPolicy) -> bool {
        let mut success = true;
        if policy.force {
            success &= self.remove(&policy.destination);
        }
        if policy.create {
            success &= self.create(policy);
        }
        success &= self.copy(policy);
        success
    }

    /// Remove whatever occupies `destination`. Absence counts as success.
    pub fn remove(&self, destination: &Path) -> bool {
        match fs::remove_existing(destination) {
            Ok(removed) => {
                if let Some(kind) = removed.kind() {
                    self.log
                        .lowinfo(&format!("Removing {kind} {}", destination.display()));
                }
                true
            }
            Err(e) => {
                self.log.warning(&format!(
                    "Failed to remove {}. {e}",
                    destination.display()
                ));
                false
            }
        }
    }

    /// Create the destination's immediate parent with `dmode` and ownership.
    pub fn create(&self, policy: &ResolvedPolicy) -> bool {
        match fs::create_parent(
            &policy.destination,
            policy.dmode.bits(),
            policy.ownership(),
        ) {
            Ok(ParentStatus::Created(parent)) => {
                self.log
                    .lowinfo(&format!("Creating directory {}", parent.display()));
                true
            }
            Ok(ParentStatus::Existing(_)) => true,
            Err(e) => {
                let parent = fs::parent_of(&policy.destination)
                    .unwrap_or_else(|_| policy.destination.clone());
                self.log.warning(&format!(
                    "Failed to create directory {}. {e}",
                    parent.display()
                ));
                false
            }
        }
    }

    /// Copy the source and apply modes and ownership to the result.
    pub fn copy(&self, policy: &ResolvedPolicy) -> bool {
        let source = &policy.source;
        let destination = &policy.destination;

        let result = if fs::is_dir(source) {
            fs::copy_tree(source, destination)
                .and_then(|()| fs::apply_tree(destination, policy.tree_modes(), policy.ownership()))
        } else {
            fs::copy_file(source, destination)
                .and_then(|()| fs::apply_node(destination, policy.tree_modes(), policy.ownership()))
        };

        match result {
            Ok(()) => {
                self.log.lowinfo(&format!(
                    "Copied {} -> {}",
                    source.display(),
                    destination.display()
                ));
                true
            }
            Err(e) => {
                self.log.warning(&format!(
                    "Failed to copy {} -> {}. {e}",
                    source.display(),
                    destination.display()
                ));
                false
            }
        }
    }
}
