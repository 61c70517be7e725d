//! Directive data model
//!
//! The host hands the engine an already-parsed document; these types give
//! it a shape. Nothing here reads files.
//!
//! ```
//! use dotcopy_core::config::{Mapping, SourceSpec};
//! use serde_json::json;
//!
//! let mapping: Mapping = serde_json::from_value(json!({
//!     "~/.vimrc": "vimrc",
//!     "~/.config/app": {"path": "app-config", "create": true, "dmode": "0700"},
//! }))
//! .unwrap();
//!
//! let (destination, source) = mapping.iter().next().unwrap();
//! assert_eq!(destination, "~/.vimrc");
//! assert!(matches!(source, SourceSpec::Simple(path) if path == "vimrc"));
//! ```

mod mapping;
mod overrides;

pub use mapping::{ExtendedSource, Mapping, SourceSpec};
pub use overrides::{FileMode, PolicyOverrides};
