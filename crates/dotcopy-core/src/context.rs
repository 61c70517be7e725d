//! Interfaces consumed from the host tool

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Configuration access provided by the host.
pub trait Context {
    /// Defaults for `directive`, already merged from global configuration.
    ///
    /// An empty map means no defaults.
    fn defaults_for(&self, directive: &str) -> Map<String, Value>;

    /// Directory relative source paths are resolved against.
    fn base_directory(&self) -> PathBuf;
}

impl<T: Context + ?Sized> Context for &T {
    fn defaults_for(&self, directive: &str) -> Map<String, Value> {
        (**self).defaults_for(directive)
    }

    fn base_directory(&self) -> PathBuf {
        (**self).base_directory()
    }
}

/// Leveled log sink provided by the host.
pub trait Log {
    fn info(&self, message: &str);

    /// Detail-level output, usually hidden unless the host runs verbosely.
    fn lowinfo(&self, message: &str);

    fn warning(&self, message: &str);

    fn error(&self, message: &str);
}

impl<T: Log + ?Sized> Log for &T {
    fn info(&self, message: &str) {
        (**self).info(message)
    }

    fn lowinfo(&self, message: &str) {
        (**self).lowinfo(message)
    }

    fn warning(&self, message: &str) {
        (**self).warning(message)
    }

    fn error(&self, message: &str) {
        (**self).error(message)
    }
}

/// In-memory [`Context`] with a fixed base directory and per-directive
/// defaults.
#[derive(Debug, Clone, Default)]
pub struct StaticContext {
    base_directory: PathBuf,
    defaults: HashMap<String, Map<String, Value>>,
}

impl StaticContext {
    pub fn new(base_directory: impl AsRef<Path>) -> Self {
        Self {
            base_directory: base_directory.as_ref().to_path_buf(),
            defaults: HashMap::new(),
        }
    }

    /// Set the defaults for `directive`. Non-object values clear them.
    pub fn with_defaults(mut self, directive: impl Into<String>, defaults: Value) -> Self {
        let map = match defaults {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        self.defaults.insert(directive.into(), map);
        self
    }
}

impl Context for StaticContext {
    fn defaults_for(&self, directive: &str) -> Map<String, Value> {
        self.defaults.get(directive).cloned().unwrap_or_default()
    }

    fn base_directory(&self) -> PathBuf {
        self.base_directory.clone()
    }
}
