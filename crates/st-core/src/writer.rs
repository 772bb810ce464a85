//! Migration file generation.
//!
//! New files are named `{version}_{slug}.{ext}` where the version comes from
//! the current UTC time. When a file in the directory already uses that
//! version, the timestamp is moved forward one second at a time until it is
//! free, so the version keeps its fixed-width `YYYYMMDD_HHMMSS` form.

use chrono::{DateTime, Duration, Utc};
use std::fs;
use std::path::PathBuf;

use crate::directory::MigrationDirectory;
use crate::error::{CoreError, CoreResult};
use crate::migration::DOWN_MARKER;
use crate::version::MigrationVersion;

/// Upper bound on collision bumps before giving up.
const MAX_VERSION_BUMPS: i64 = 3600;

/// Turn a display name into a filename segment: lowercase, spaces to underscores.
pub fn slugify(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Render the content of a migration file.
pub fn render_content(up_sql: &str, down_sql: &str) -> String {
    let mut content = up_sql.to_string();
    if !down_sql.is_empty() {
        content.push_str("\n\n");
        content.push_str(DOWN_MARKER);
        content.push('\n');
        content.push_str(down_sql);
    }
    content
}

impl MigrationDirectory {
    /// Write a new migration file stamped with the current time.
    pub fn create_migration_file(
        &self,
        name: &str,
        up_sql: &str,
        down_sql: &str,
    ) -> CoreResult<PathBuf> {
        self.create_migration_file_at(Utc::now(), name, up_sql, down_sql)
    }

    /// Write a new migration file stamped with `now`.
    pub fn create_migration_file_at(
        &self,
        now: DateTime<Utc>,
        name: &str,
        up_sql: &str,
        down_sql: &str,
    ) -> CoreResult<PathBuf> {
        let slug = slugify(name);
        if slug.is_empty() {
            return Err(CoreError::InvalidMigrationName {
                name: name.to_string(),
                reason: "name must not be empty".to_string(),
            });
        }
        if slug.contains(['/', '\\']) {
            return Err(CoreError::InvalidMigrationName {
                name: name.to_string(),
                reason: "name must not contain path separators".to_string(),
            });
        }

        fs::create_dir_all(self.path()).map_err(|e| CoreError::FileWrite {
            path: self.path().display().to_string(),
            source: e,
        })?;

        let version = self.next_free_version(now)?;
        let file_path = self
            .path()
            .join(format!("{}_{}.{}", version, slug, self.extension()));

        fs::write(&file_path, render_content(up_sql, down_sql)).map_err(|e| {
            CoreError::FileWrite {
                path: file_path.display().to_string(),
                source: e,
            }
        })?;

        log::info!("Created migration file: {}", file_path.display());
        Ok(file_path)
    }

    fn next_free_version(&self, now: DateTime<Utc>) -> CoreResult<MigrationVersion> {
        for bump in 0..MAX_VERSION_BUMPS {
            let candidate = MigrationVersion::from_timestamp(now + Duration::seconds(bump));
            if !self.version_exists(&candidate)? {
                if bump > 0 {
                    log::debug!("Version collision: bumped {} seconds to {}", bump, candidate);
                }
                return Ok(candidate);
            }
        }
        Err(CoreError::InvalidVersion {
            reason: format!(
                "no free version within {} seconds of {}",
                MAX_VERSION_BUMPS,
                MigrationVersion::from_timestamp(now)
            ),
        })
    }
}

#[cfg(test)]
#[path = "writer_test.rs"]
mod tests;
