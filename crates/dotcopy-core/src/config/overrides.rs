//! Optional policy fields shared by directive defaults and extended entries

use crate::{Error, Result};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Highest value accepted as permission bits (setuid, setgid, sticky, rwx).
const MODE_MASK: u32 = 0o7777;

/// POSIX permission bits for a file or directory.
///
/// Deserializes from an integer (taken as the raw bits, so `0o700` in YAML or
/// `448` in JSON) or from an octal string such as `"0700"`, `"0o700"` or
/// `"700"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileMode(u32);

impl FileMode {
    pub const fn new(bits: u32) -> Self {
        Self(bits & MODE_MASK)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for FileMode {
    type Error = Error;

    fn try_from(bits: u32) -> Result<Self> {
        if bits > MODE_MASK {
            return Err(Error::InvalidMode {
                value: format!("{bits:o}"),
                reason: "permission bits exceed 7777".into(),
            });
        }
        Ok(Self(bits))
    }
}

impl FromStr for FileMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0o")
            .or_else(|| trimmed.strip_prefix("0O"))
            .unwrap_or(trimmed);
        let bits = u32::from_str_radix(digits, 8).map_err(|e| Error::InvalidMode {
            value: s.to_string(),
            reason: e.to_string(),
        })?;
        Self::try_from(bits)
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04o}", self.0)
    }
}

impl<'de> Deserialize<'de> for FileMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Bits(u32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Bits(bits) => FileMode::try_from(bits),
            Raw::Text(text) => text.parse(),
        }
        .map_err(serde::de::Error::custom)
    }
}

/// One layer of policy settings. Unset fields defer to the layer below.
///
/// Used both for directive-level defaults and for the override block of an
/// extended source entry. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PolicyOverrides {
    #[serde(default)]
    pub force: Option<bool>,
    #[serde(default)]
    pub create: Option<bool>,
    #[serde(default)]
    pub fmode: Option<FileMode>,
    #[serde(default)]
    pub dmode: Option<FileMode>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
}

impl PolicyOverrides {
    /// Decode the defaults object the host context returns for `directive`.
    pub fn from_defaults(directive: &str, defaults: &Map<String, Value>) -> Result<Self> {
        serde_json::from_value(Value::Object(defaults.clone())).map_err(|e| {
            Error::InvalidDefaults {
                directive: directive.to_string(),
                message: e.to_string(),
            }
        })
    }

    /// Stack `self` on top of `lower`: every field set here wins.
    pub fn over(&self, lower: &PolicyOverrides) -> PolicyOverrides {
        PolicyOverrides {
            force: self.force.or(lower.force),
            create: self.create.or(lower.create),
            fmode: self.fmode.or(lower.fmode),
            dmode: self.dmode.or(lower.dmode),
            owner: self.owner.clone().or_else(|| lower.owner.clone()),
            group: self.group.clone().or_else(|| lower.group.clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
