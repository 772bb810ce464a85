//! Migration directory discovery.
//!
//! [`MigrationDirectory`] enumerates `*.{ext}` files in one directory, parses
//! each with [`Migration::parse`], and returns them in ascending version order.
//! Files that fail to parse are logged and skipped; only a failure to read the
//! directory itself is an error.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use crate::migration::{parse_file_stem, Migration};
use crate::version::MigrationVersion;

/// Default migration file extension.
pub const DEFAULT_EXTENSION: &str = "sql";

/// A directory of migration files sharing one extension.
#[derive(Debug, Clone)]
pub struct MigrationDirectory {
    path: PathBuf,
    extension: String,
}

impl MigrationDirectory {
    /// Create a directory handle. A leading dot on `extension` is ignored.
    pub fn new(path: impl Into<PathBuf>, extension: &str) -> Self {
        Self {
            path: path.into(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    /// Directory handle for a project rooted at `root`.
    pub fn from_config(config: &Config, root: &Path) -> Self {
        Self::new(config.migrations_dir_absolute(root), &config.extension)
    }

    /// Path of the directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Extension of migration files, without the leading dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Load every parsable migration, sorted ascending by version.
    ///
    /// Ties on version are broken by file name so the order is stable for
    /// identical directory contents. A missing directory yields no migrations.
    pub fn load(&self) -> CoreResult<Vec<Migration>> {
        let mut found: Vec<(String, Migration)> = Vec::new();

        for path in self.migration_files()? {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                log::warn!("Skipping migration file with non UTF-8 name: {}", path.display());
                continue;
            };

            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    log::error!("Failed to read migration file {}: {}", path.display(), e);
                    continue;
                }
            };

            match Migration::parse(stem, &content) {
                Ok(migration) => {
                    if !migration.version.is_canonical() {
                        log::warn!(
                            "{} has non-canonical version {} (expected YYYYMMDD_HHMMSS); it is ordered as a plain string",
                            path.display(),
                            migration.version
                        );
                    }
                    let file_name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    found.push((file_name, migration));
                }
                Err(e) => log::warn!("Skipping {}: {}", path.display(), e),
            }
        }

        found.sort_by(|(a_file, a), (b_file, b)| {
            a.version.cmp(&b.version).then_with(|| a_file.cmp(b_file))
        });

        let mut seen = HashSet::new();
        for (file_name, migration) in &found {
            if !seen.insert(migration.version.clone()) {
                log::warn!(
                    "Duplicate migration version {} (also used by {})",
                    migration.version,
                    file_name
                );
            }
        }

        log::debug!(
            "Loaded {} migrations from {}",
            found.len(),
            self.path.display()
        );
        Ok(found.into_iter().map(|(_, m)| m).collect())
    }

    /// Whether any migration file in the directory already uses `version`.
    ///
    /// Only filenames are inspected; file contents are not read.
    pub fn version_exists(&self, version: &MigrationVersion) -> CoreResult<bool> {
        Ok(self.migration_files()?.iter().any(|path| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .and_then(|stem| parse_file_stem(stem).ok())
                .is_some_and(|(v, _)| &v == version)
        }))
    }

    /// Paths of all regular files carrying the migration extension.
    fn migration_files(&self) -> CoreResult<Vec<PathBuf>> {
        if !self.path.exists() {
            log::debug!(
                "Migrations directory {} does not exist",
                self.path.display()
            );
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.path).map_err(|e| CoreError::DirectoryRead {
            path: self.path.display().to_string(),
            source: e,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| CoreError::DirectoryRead {
                path: self.path.display().to_string(),
                source: e,
            })?;
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|e| e == self.extension.as_str()) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
#[path = "directory_test.rs"]
mod tests;
