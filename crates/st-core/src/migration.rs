//! Migration records and the migration file parser.
//!
//! A migration file is named `{date}_{time}_{name}.{ext}` and holds forward
//! SQL, optionally followed by the [`DOWN_MARKER`] and the reverse SQL.

use chrono::{DateTime, Utc};
use std::fmt;

use crate::checksum::compute_checksum;
use crate::error::{CoreError, CoreResult};
use crate::version::MigrationVersion;

/// Literal marker separating forward SQL from reverse SQL.
pub const DOWN_MARKER: &str = "-- DOWN";

/// A single versioned schema change.
#[derive(Debug, Clone)]
pub struct Migration {
    /// Sortable version, e.g. `20240101_120000`
    pub version: MigrationVersion,

    /// Human-readable name derived from the filename
    pub name: String,

    /// Forward SQL script
    pub up_sql: String,

    /// Reverse SQL script; empty means the migration is not reversible
    pub down_sql: String,

    /// When this in-memory record was built
    pub created_at: DateTime<Utc>,
}

impl Migration {
    /// Build a migration record stamped with the current time.
    pub fn new(
        version: MigrationVersion,
        name: impl Into<String>,
        up_sql: impl Into<String>,
        down_sql: impl Into<String>,
    ) -> Self {
        Self {
            version,
            name: name.into(),
            up_sql: up_sql.into(),
            down_sql: down_sql.into(),
            created_at: Utc::now(),
        }
    }

    /// Parse a migration from a filename stem and the file's content.
    ///
    /// Returns [`CoreError::MalformedMigrationName`] when the stem has fewer
    /// than three underscore-separated segments. Content is never rejected.
    pub fn parse(file_stem: &str, content: &str) -> CoreResult<Self> {
        let (version, name) = parse_file_stem(file_stem)?;
        let (up_sql, down_sql) = split_content(content);
        Ok(Self::new(version, name, up_sql, down_sql))
    }

    /// Whether reverse SQL is available.
    pub fn is_reversible(&self) -> bool {
        !self.down_sql.is_empty()
    }

    /// SHA-256 checksum of the forward SQL.
    pub fn checksum(&self) -> String {
        compute_checksum(&self.up_sql)
    }
}

impl fmt::Display for Migration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Migration {}: {}", self.version, self.name)
    }
}

/// Split a filename stem into its version and display name.
///
/// The stem is split on the first two underscores: `{date}_{time}_{rest}`.
pub fn parse_file_stem(file_stem: &str) -> CoreResult<(MigrationVersion, String)> {
    let malformed = || CoreError::MalformedMigrationName {
        file_name: file_stem.to_string(),
    };

    let mut parts = file_stem.splitn(3, '_');
    let (Some(date), Some(time), Some(rest)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(malformed());
    };

    let version = MigrationVersion::try_new(format!("{date}_{time}")).ok_or_else(malformed)?;
    let name = title_case(&rest.replace('_', " "));
    Ok((version, name))
}

/// Split file content into trimmed `(up_sql, down_sql)` on the first
/// [`DOWN_MARKER`].
pub fn split_content(content: &str) -> (String, String) {
    match content.split_once(DOWN_MARKER) {
        Some((up, down)) => (up.trim().to_string(), down.trim().to_string()),
        None => (content.trim().to_string(), String::new()),
    }
}

/// Upper-case the first letter of every word and lower-case the rest.
///
/// A letter starts a word when the character before it is not a letter, so
/// `add_2fa` becomes `Add 2Fa`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

#[cfg(test)]
#[path = "migration_test.rs"]
mod tests;
