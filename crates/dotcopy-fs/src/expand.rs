//! User-home and environment-variable expansion for declared paths

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// `$NAME` or `${NAME}`; an unterminated brace is left alone.
static VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(\w+|\{[^}]*\})").unwrap());

/// Expands `~` and environment variables in paths read from a mapping.
///
/// Home expansion runs first, then variable expansion, so a variable whose
/// value starts with `~` is not expanded a second time. Unknown variables
/// are kept verbatim.
///
/// The home directory and variable values default to the process
/// environment; both can be pinned for hosts that sandbox the target tree.
#[derive(Debug, Clone, Default)]
pub struct PathExpander {
    home: Option<PathBuf>,
    vars: HashMap<String, String>,
}

impl PathExpander {
    /// Create an expander that reads the process environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `home` instead of the current user's home directory.
    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    /// Resolve `name` to `value` before consulting the environment.
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone().or_else(dirs::home_dir)
    }

    fn lookup(&self, name: &str) -> Option<String> {
        self.vars
            .get(name)
            .cloned()
            .or_else(|| std::env::var(name).ok())
    }

    /// Replace a leading `~` or `~/` with the home directory.
    ///
    /// `~user` forms are returned unchanged.
    pub fn expand_user(&self, raw: &str) -> String {
        let rest = match raw.strip_prefix('~') {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
            _ => return raw.to_string(),
        };
        match self.home_dir() {
            Some(home) => {
                let home = home.to_string_lossy();
                let home = home.trim_end_matches('/');
                let home = if home.is_empty() { "/" } else { home };
                if rest.is_empty() {
                    home.to_string()
                } else if home == "/" {
                    rest.to_string()
                } else {
                    format!("{home}{rest}")
                }
            }
            None => raw.to_string(),
        }
    }

    /// Substitute `$NAME` and `${NAME}` references.
    pub fn expand_vars(&self, raw: &str) -> String {
        if !raw.contains('$') {
            return raw.to_string();
        }
        VAR_PATTERN
            .replace_all(raw, |caps: &Captures<'_>| {
                let name = caps[1].trim_start_matches('{').trim_end_matches('}');
                self.lookup(name)
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    /// Full expansion used for both destinations and sources.
    pub fn expand(&self, raw: &str) -> PathBuf {
        PathBuf::from(self.expand_vars(&self.expand_user(raw)))
    }

    /// Expand `raw` and anchor it at `base` unless it is already absolute.
    pub fn resolve_source(&self, base: &Path, raw: &str) -> PathBuf {
        base.join(self.expand(raw))
    }
}
