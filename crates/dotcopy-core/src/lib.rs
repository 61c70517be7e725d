//! Copy directive engine for dotcopy
//!
//! Reconciles a declarative destination -> source mapping against the live
//! filesystem:
//!
//! - **Configuration**: typed mapping, source specifications and policy
//!   overrides decoded from host-provided data
//! - **Metadata resolution**: fallback -> directive defaults -> per-entry
//!   override, with owner and group resolved to numeric ids
//! - **Reconciliation**: optional removal, optional single-level parent
//!   creation, then a symlink-preserving copy with mode and ownership applied
//!   across the result
//!
//! # Architecture
//!
//! ```text
//!            host tool (dispatch, context, log sink)
//!                        |
//!                  CopyDirective
//!                   /          \
//!       MetadataResolver     Reconciler
//!                   \          /
//!                    dotcopy-fs
//! ```
//!
//! Filesystem failures are logged and folded into the boolean result of
//! [`CopyDirective::handle`]; only configuration errors are returned as
//! [`Error`].

pub mod config;
pub mod context;
pub mod directive;
pub mod error;
pub mod identity;
pub mod logging;
pub mod policy;
pub mod reconcile;

pub use config::{ExtendedSource, FileMode, Mapping, PolicyOverrides, SourceSpec};
pub use context::{Context, Log, StaticContext};
pub use directive::{CopyDirective, DIRECTIVE};
pub use error::{Error, Result};
pub use identity::{IdentityResolver, SystemIdentity};
pub use logging::{Level, MemoryLog, TracingLog};
pub use policy::{Fallback, MetadataResolver, ResolvedPolicy};
pub use reconcile::Reconciler;
