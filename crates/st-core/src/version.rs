//! Migration version identifiers.
//!
//! A version is the `{date}_{time}` prefix of a migration filename, canonically
//! `YYYYMMDD_HHMMSS`. Versions are ordered as plain strings; the fixed-width,
//! zero-padded canonical form makes string order and time order agree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// `strftime` pattern of a canonical version.
pub const VERSION_FORMAT: &str = "%Y%m%d_%H%M%S";

/// A non-empty migration version string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MigrationVersion(String);

impl MigrationVersion {
    /// Try to create a version, returning `None` if the string is empty.
    pub fn try_new(version: impl Into<String>) -> Option<Self> {
        let s = version.into();
        if s.is_empty() {
            None
        } else {
            Some(Self(s))
        }
    }

    /// Canonical version for a point in time (second resolution).
    pub fn from_timestamp(ts: DateTime<Utc>) -> Self {
        Self(ts.format(VERSION_FORMAT).to_string())
    }

    /// Whether the version is exactly 8 digits, an underscore, and 6 digits.
    pub fn is_canonical(&self) -> bool {
        let bytes = self.0.as_bytes();
        bytes.len() == 15
            && bytes[8] == b'_'
            && bytes[..8].iter().all(u8::is_ascii_digit)
            && bytes[9..].iter().all(u8::is_ascii_digit)
    }

    /// Return the underlying version as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for MigrationVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        MigrationVersion::try_new(s)
            .ok_or_else(|| serde::de::Error::custom("MigrationVersion must not be empty"))
    }
}

impl fmt::Display for MigrationVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MigrationVersion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::ops::Deref for MigrationVersion {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for MigrationVersion {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for MigrationVersion {
    type Error = crate::error::CoreError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::try_new(s).ok_or_else(|| crate::error::CoreError::InvalidVersion {
            reason: "version must not be empty".to_string(),
        })
    }
}

impl PartialEq<str> for MigrationVersion {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for MigrationVersion {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl PartialEq<String> for MigrationVersion {
    fn eq(&self, other: &String) -> bool {
        self.0 == *other
    }
}
