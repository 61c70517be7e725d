//! Error types for dotcopy-core
//!
//! Only configuration-time failures are represented here. Filesystem
//! failures during reconciliation are logged and folded into the boolean
//! result of a run instead of being returned.

/// Result type for dotcopy-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a whole directive invocation
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The engine was asked to handle a directive it does not own
    #[error("Copy cannot handle directive {directive}")]
    DirectiveMismatch { directive: String },

    /// Owner name not present in the user database
    #[error("Unknown user: {name}")]
    UnknownUser { name: String },

    /// Group name not present in the group database
    #[error("Unknown group: {name}")]
    UnknownGroup { name: String },

    /// The identity database itself could not be queried
    #[error("Identity lookup failed: {message}")]
    IdentityLookup { message: String },

    /// Directive-level defaults contain a value of the wrong shape
    #[error("Invalid defaults for directive {directive}: {message}")]
    InvalidDefaults { directive: String, message: String },

    /// Directive data is not a destination -> source mapping
    #[error("Invalid mapping: {message}")]
    InvalidMapping { message: String },

    /// A mode is not a valid set of permission bits
    #[error("Invalid file mode {value}: {reason}")]
    InvalidMode { value: String, reason: String },
}

impl Error {
    /// Whether this error came from resolving an owner or group.
    pub fn is_identity(&self) -> bool {
        matches!(
            self,
            Self::UnknownUser { .. } | Self::UnknownGroup { .. } | Self::IdentityLookup { .. }
        )
    }
}
