//! The `copy` directive entry point

use crate::config::{Mapping, PolicyOverrides};
use crate::context::{Context, Log};
use crate::identity::{IdentityResolver, SystemIdentity};
use crate::policy::{Fallback, MetadataResolver, ResolvedPolicy};
use crate::reconcile::Reconciler;
use crate::{Error, Result};
use dotcopy_fs::PathExpander;
use serde_json::Value;

/// Name of the directive this engine owns.
pub const DIRECTIVE: &str = "copy";

/// Copies declared sources into place with ownership and mode policy.
///
/// # Example
///
/// ```no_run
/// use dotcopy_core::{CopyDirective, Mapping, StaticContext, TracingLog};
/// use serde_json::json;
///
/// let context = StaticContext::new("/home/alice/dotfiles")
///     .with_defaults("copy", json!({"create": true}));
/// let directive = CopyDirective::new(context, TracingLog);
///
/// let mapping = Mapping::from_value(&json!({"~/.vimrc": "vimrc"}))?;
/// if !directive.handle("copy", &mapping)? {
///     std::process::exit(1);
/// }
/// # Ok::<(), dotcopy_core::Error>(())
/// ```
pub struct CopyDirective<C, L, I = SystemIdentity> {
    context: C,
    log: L,
    identity: I,
    expander: PathExpander,
    fallback: Fallback,
}

impl<C: Context, L: Log> CopyDirective<C, L> {
    /// Create a directive backed by the system identity database and the
    /// process environment.
    pub fn new(context: C, log: L) -> Self {
        Self {
            context,
            log,
            identity: SystemIdentity,
            expander: PathExpander::new(),
            fallback: Fallback::default(),
        }
    }
}

impl<C: Context, L: Log, I: IdentityResolver> CopyDirective<C, L, I> {
    /// Swap the identity database used to resolve owners and groups.
    pub fn with_identity<J: IdentityResolver>(self, identity: J) -> CopyDirective<C, L, J> {
        CopyDirective {
            context: self.context,
            log: self.log,
            identity,
            expander: self.expander,
            fallback: self.fallback,
        }
    }

    /// Use a specific expander for `~` and environment variables.
    pub fn with_expander(mut self, expander: PathExpander) -> Self {
        self.expander = expander;
        self
    }

    /// Replace the built-in lowest-precedence policy values.
    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    pub fn can_handle(&self, directive: &str) -> bool {
        directive == DIRECTIVE
    }

    /// Reconcile every entry of `mapping`.
    ///
    /// Returns `Ok(true)` when all entries succeeded and `Ok(false)` when at
    /// least one filesystem step failed; failing entries never stop the
    /// remaining ones. Configuration problems (foreign directive, malformed
    /// defaults, unknown owner or group) are returned as errors before any
    /// entry touches the filesystem.
    pub fn handle(&self, directive: &str, mapping: &Mapping) -> Result<bool> {
        if !self.can_handle(directive) {
            return Err(Error::DirectiveMismatch {
                directive: directive.to_string(),
            });
        }

        let policies = self.resolve_all(mapping)?;
        let reconciler = Reconciler::new(&self.log);

        let mut success = true;
        for policy in &policies {
            success &= reconciler.reconcile(policy);
        }

        if success {
            self.log.info("All copies have been set up");
        } else {
            self.log.error("Some copies were not successfully set up");
        }
        Ok(success)
    }

    /// [`CopyDirective::handle`] for raw directive data from the host.
    pub fn handle_value(&self, directive: &str, data: &Value) -> Result<bool> {
        if !self.can_handle(directive) {
            return Err(Error::DirectiveMismatch {
                directive: directive.to_string(),
            });
        }
        let mapping = Mapping::from_value(data)?;
        self.handle(directive, &mapping)
    }

    /// Resolve every entry up front so a bad owner or group aborts the run
    /// before anything is modified.
    pub fn resolve_all(&self, mapping: &Mapping) -> Result<Vec<ResolvedPolicy>> {
        let defaults =
            PolicyOverrides::from_defaults(DIRECTIVE, &self.context.defaults_for(DIRECTIVE))?;
        let resolver = MetadataResolver::new(
            &self.identity,
            &self.expander,
            self.context.base_directory(),
            defaults,
        )
        .with_fallback(self.fallback);

        mapping
            .iter()
            .map(|(destination, source)| resolver.resolve(destination, source))
            .collect()
    }
}
