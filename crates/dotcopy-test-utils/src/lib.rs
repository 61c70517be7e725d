//! Shared test utilities for the dotcopy workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only and is never published.
//!
//! # Modules
//!
//! - [`identity`]: [`SandboxIdentity`] mapping one user and group to the test process
//! - [`tree`]: [`TestTree`] sandbox with a dotfiles base directory and a fake home
//! - [`snapshot`]: [`TreeSnapshot`] for comparing resulting trees across runs

pub mod identity;
pub mod snapshot;
pub mod tree;

pub use identity::SandboxIdentity;
pub use snapshot::{NodeKind, NodeSnapshot, TreeSnapshot};
pub use tree::TestTree;
