//! Route path grammar
//!
//! A path has the form `/<group>/<rest-of-path>`. The group is the text
//! strictly between the first two `/` characters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::PATH_SEPARATOR;
use crate::error::{Result, RouterError};

/// A validated route path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoutePath {
    raw: String,
    /// Byte offset of the second separator
    group_end: usize,
}

impl RoutePath {
    /// Parse and validate a path string
    pub fn parse(path: &str) -> Result<Self> {
        let Some(rest) = path.strip_prefix(PATH_SEPARATOR) else {
            return Err(RouterError::malformed_path(path));
        };
        match rest.find(PATH_SEPARATOR) {
            Some(0) | None => Err(RouterError::missing_group(path)),
            Some(end) => Ok(Self {
                raw: path.to_string(),
                group_end: end + 1,
            }),
        }
    }

    /// The full path
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The group segment
    pub fn group(&self) -> &str {
        &self.raw[1..self.group_end]
    }

    /// Everything after the group separator
    pub fn name(&self) -> &str {
        &self.raw[self.group_end + 1..]
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for RoutePath {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for RoutePath {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl Serialize for RoutePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for RoutePath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
