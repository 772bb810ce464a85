//! Configuration types and parsing for strata.yml

use crate::directory::DEFAULT_EXTENSION;
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file names searched in a project directory, in order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["strata.yml", "strata.yaml"];

/// Main project configuration from strata.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory containing migration files, relative to the project root
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,

    /// Extension of migration files, without the leading dot
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database path (DuckDB file or `:memory:`)
    #[serde(default)]
    pub path: Option<String>,
}

fn default_migrations_dir() -> String {
    "migrations".to_string()
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            migrations_dir: default_migrations_dir(),
            extension: default_extension(),
            database: DatabaseConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let mut config: Config = serde_yaml::from_str(&content)?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for strata.yml or strata.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        for name in CONFIG_FILE_NAMES {
            let path = dir.join(name);
            if path.exists() {
                return Self::load(&path);
            }
        }
        Err(CoreError::ConfigNotFound {
            path: dir.join(CONFIG_FILE_NAMES[0]).display().to_string(),
        })
    }

    /// Absolute path of the migrations directory for a project root
    pub fn migrations_dir_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.migrations_dir)
    }

    /// Resolve the database target.
    ///
    /// An explicit override (CLI flag or environment) wins over the config
    /// file. Having neither is [`CoreError::MisconfiguredDatabase`].
    pub fn resolve_database<'a>(&'a self, override_path: Option<&'a str>) -> CoreResult<&'a str> {
        override_path
            .or(self.database.path.as_deref())
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or(CoreError::MisconfiguredDatabase)
    }

    fn normalize(&mut self) {
        self.extension = self.extension.trim().trim_start_matches('.').to_string();
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.migrations_dir.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "migrations_dir cannot be empty".to_string(),
            });
        }

        if self.extension.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "extension cannot be empty".to_string(),
            });
        }

        if self.extension.contains(['/', '\\', '.']) {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "extension '{}' must be a single file extension such as 'sql'",
                    self.extension
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
