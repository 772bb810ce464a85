//! Runtime context for CLI commands

use anyhow::{Context, Result};
use st_core::{Config, CoreError, MigrationDirectory};
use st_db::{Database, DuckDbBackend};
use st_migrate::Migrator;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::GlobalArgs;

/// Loaded project configuration plus the global overrides
pub(crate) struct ProjectContext {
    /// Project root directory
    pub root: PathBuf,

    /// Project configuration (defaults when no strata.yml exists)
    pub config: Config,

    /// Database override from --database / STRATA_DATABASE
    database_override: Option<String>,

    /// Verbose output enabled
    pub verbose: bool,
}

impl ProjectContext {
    /// Load configuration from the custom path or the project directory
    pub fn load(args: &GlobalArgs) -> Result<Self> {
        let root = PathBuf::from(&args.project_dir);

        let config = match &args.config {
            Some(config_path) => {
                Config::load(Path::new(config_path)).context("Failed to load configuration file")?
            }
            None => match Config::load_from_dir(&root) {
                Ok(config) => config,
                Err(CoreError::ConfigNotFound { path }) => {
                    log::debug!("No config file at {path}, using defaults");
                    Config::default()
                }
                Err(e) => {
                    return Err(anyhow::Error::new(e).context("Failed to load project configuration"))
                }
            },
        };

        Ok(Self {
            root,
            config,
            database_override: args.database.clone(),
            verbose: args.verbose,
        })
    }

    /// The project's migration directory
    pub fn directory(&self) -> MigrationDirectory {
        MigrationDirectory::from_config(&self.config, &self.root)
    }

    /// Resolve the database target.
    ///
    /// A relative `database.path` from the config file is taken relative to
    /// the project root; an override is used as given.
    pub fn database_target(&self) -> Result<String> {
        let target = self
            .config
            .resolve_database(self.database_override.as_deref())?;

        if self.database_override.is_some() || target == ":memory:" {
            return Ok(target.to_string());
        }
        let path = Path::new(target);
        if path.is_absolute() {
            Ok(target.to_string())
        } else {
            Ok(self.root.join(path).display().to_string())
        }
    }

    /// Open the database and build a migrator over the project's migrations.
    ///
    /// The database target is resolved before anything is opened or read.
    pub fn migrator(&self) -> Result<Migrator> {
        let target = self.database_target()?;
        self.verbose(&format!("Using database: {target}"));

        let db: Arc<dyn Database> =
            Arc::new(DuckDbBackend::new(&target).context("Failed to connect to database")?);
        log::debug!("Connected to {} database", db.db_type());

        Ok(Migrator::new(db, self.directory()))
    }

    /// Print verbose output if enabled
    pub fn verbose(&self, msg: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", msg);
        }
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;
