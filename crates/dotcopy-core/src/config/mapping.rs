//! Destination -> source mapping

use super::PolicyOverrides;
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// Where a destination's content comes from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SourceSpec {
    /// A bare path; every policy field comes from the directive defaults.
    Simple(String),
    /// A path plus per-entry policy overrides.
    Extended(ExtendedSource),
}

/// Structured source entry: `{path: ..., force: ..., fmode: ..., ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExtendedSource {
    pub path: String,
    #[serde(flatten)]
    pub overrides: PolicyOverrides,
}

impl SourceSpec {
    /// The declared (unexpanded) source path.
    pub fn path(&self) -> &str {
        match self {
            Self::Simple(path) => path,
            Self::Extended(extended) => &extended.path,
        }
    }

    /// Per-entry overrides, only present on the extended form.
    pub fn overrides(&self) -> Option<&PolicyOverrides> {
        match self {
            Self::Simple(_) => None,
            Self::Extended(extended) => Some(&extended.overrides),
        }
    }
}

impl From<&str> for SourceSpec {
    fn from(path: &str) -> Self {
        Self::Simple(path.to_string())
    }
}

impl From<ExtendedSource> for SourceSpec {
    fn from(extended: ExtendedSource) -> Self {
        Self::Extended(extended)
    }
}

/// Ordered destination -> source entries of one directive invocation.
///
/// Iteration follows declaration order so logs are reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Mapping {
    entries: IndexMap<String, SourceSpec>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode directive data handed over by the host.
    pub fn from_value(data: &Value) -> Result<Self> {
        Mapping::deserialize(data).map_err(|e| Error::InvalidMapping {
            message: e.to_string(),
        })
    }

    /// Add or replace the entry for `destination`, keeping its position.
    pub fn insert(&mut self, destination: impl Into<String>, source: impl Into<SourceSpec>) {
        self.entries.insert(destination.into(), source.into());
    }

    /// Builder form of [`Mapping::insert`].
    pub fn with(mut self, destination: impl Into<String>, source: impl Into<SourceSpec>) -> Self {
        self.insert(destination, source);
        self
    }

    pub fn get(&self, destination: &str) -> Option<&SourceSpec> {
        self.entries.get(destination)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SourceSpec)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<SourceSpec>> FromIterator<(K, V)> for Mapping {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut mapping = Mapping::new();
        for (destination, source) in iter {
            mapping.insert(destination, source);
        }
        mapping
    }
}
