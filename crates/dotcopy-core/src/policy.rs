//! Effective per-entry policy
//!
//! Every entry's policy is layered from three sources, lowest first:
//!
//! 1. [`Fallback`] built-in values (owner and group default to the
//!    effective user and group of the process)
//! 2. directive-level defaults supplied by the host context
//! 3. the override block of an extended source entry
//!
//! Owner and group names are resolved to numeric ids here, so every
//! [`ResolvedPolicy`] is concrete before the reconciler touches the
//! filesystem.

use crate::config::{FileMode, PolicyOverrides, SourceSpec};
use crate::identity::IdentityResolver;
use crate::Result;
use dotcopy_fs::{Ownership, PathExpander, TreeModes};
use std::path::PathBuf;

/// Lowest-precedence values used when no layer sets a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fallback {
    pub force: bool,
    pub create: bool,
    pub fmode: FileMode,
    pub dmode: FileMode,
}

impl Default for Fallback {
    fn default() -> Self {
        Self {
            force: false,
            create: false,
            fmode: FileMode::new(0o644),
            dmode: FileMode::new(0o755),
        }
    }
}

/// Concrete policy for one mapping entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPolicy {
    pub force: bool,
    pub create: bool,
    pub fmode: FileMode,
    pub dmode: FileMode,
    pub uid: u32,
    pub gid: u32,
    /// Expanded source, anchored at the base directory when relative.
    pub source: PathBuf,
    /// Expanded destination.
    pub destination: PathBuf,
}

impl ResolvedPolicy {
    pub fn ownership(&self) -> Ownership {
        Ownership::new(self.uid, self.gid)
    }

    pub fn tree_modes(&self) -> TreeModes {
        TreeModes {
            file: self.fmode.bits(),
            dir: self.dmode.bits(),
        }
    }
}

/// Turns mapping entries into [`ResolvedPolicy`] values.
pub struct MetadataResolver<'a, I: ?Sized> {
    identity: &'a I,
    expander: &'a PathExpander,
    base_directory: PathBuf,
    defaults: PolicyOverrides,
    fallback: Fallback,
}

impl<'a, I: IdentityResolver + ?Sized> MetadataResolver<'a, I> {
    pub fn new(
        identity: &'a I,
        expander: &'a PathExpander,
        base_directory: impl Into<PathBuf>,
        defaults: PolicyOverrides,
    ) -> Self {
        Self {
            identity,
            expander,
            base_directory: base_directory.into(),
            defaults,
            fallback: Fallback::default(),
        }
    }

    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    /// Resolve one entry.
    ///
    /// Fails only when an owner or group name cannot be resolved; the
    /// current user and group are read per call and only when no layer
    /// names an owner or group.
    pub fn resolve(&self, destination: &str, source: &SourceSpec) -> Result<ResolvedPolicy> {
        let layered = layer(&self.defaults, source.overrides());

        let owner = match layered.owner {
            Some(owner) => owner,
            None => self.identity.current_user()?,
        };
        let group = match layered.group {
            Some(group) => group,
            None => self.identity.current_group()?,
        };

        Ok(ResolvedPolicy {
            force: layered.force.unwrap_or(self.fallback.force),
            create: layered.create.unwrap_or(self.fallback.create),
            fmode: layered.fmode.unwrap_or(self.fallback.fmode),
            dmode: layered.dmode.unwrap_or(self.fallback.dmode),
            uid: self.identity.uid_for(&owner)?,
            gid: self.identity.gid_for(&group)?,
            source: self
                .expander
                .resolve_source(&self.base_directory, source.path()),
            destination: self.expander.expand(destination),
        })
    }
}

/// Stack the per-entry overrides, if any, on the directive defaults.
pub fn layer(defaults: &PolicyOverrides, entry: Option<&PolicyOverrides>) -> PolicyOverrides {
    match entry {
        Some(entry) => entry.over(defaults),
        None => defaults.clone(),
    }
}
