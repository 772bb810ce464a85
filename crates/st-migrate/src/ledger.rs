//! Access to the `schema_migrations` ledger table.
//!
//! One row per applied migration. Rows are inserted inside the same
//! transaction as the migration's `up_sql` and deleted inside the same
//! transaction as its `down_sql`; they are never updated in place.

use chrono::{DateTime, Utc};
use serde::Serialize;
use st_core::MigrationVersion;
use st_db::{Database, Row, SqlParam};

use crate::error::{MigrateError, MigrateResult};

const CREATE_LEDGER_SQL: &str = "
CREATE TABLE IF NOT EXISTS schema_migrations (
    version VARCHAR(255) PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    checksum VARCHAR(64)
);
CREATE INDEX IF NOT EXISTS idx_schema_migrations_applied_at
ON schema_migrations(applied_at);
";

const SELECT_VERSIONS_SQL: &str = "SELECT version FROM schema_migrations ORDER BY version";

const SELECT_RECORDS_SQL: &str = "SELECT version, name, CAST(applied_at AS VARCHAR) AS applied_at, checksum \
     FROM schema_migrations ORDER BY version";

const INSERT_SQL: &str = "INSERT INTO schema_migrations (version, name, applied_at, checksum) \
     VALUES (?, ?, CAST(? AS TIMESTAMP), ?)";

const DELETE_SQL: &str = "DELETE FROM schema_migrations WHERE version = ?";

/// Timestamp layout bound into `applied_at`.
const APPLIED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// A persisted ledger row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppliedMigration {
    /// Migration version (primary key)
    pub version: MigrationVersion,
    /// Migration name at apply time
    pub name: String,
    /// When the migration was applied, as rendered by the database
    pub applied_at: Option<String>,
    /// SHA-256 of the `up_sql` that was applied
    pub checksum: Option<String>,
}

/// Result of the fail-open applied-version read.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppliedVersions {
    /// Applied versions in ascending order; empty when the read failed
    pub versions: Vec<MigrationVersion>,
    /// False when the ledger could not be read
    pub available: bool,
}

/// Ledger accessor over any executor, including one scoped to a transaction.
pub struct Ledger<'a> {
    db: &'a dyn Database,
}

impl<'a> Ledger<'a> {
    /// Wrap an executor.
    pub fn new(db: &'a dyn Database) -> Self {
        Self { db }
    }

    /// Create the ledger table and its `applied_at` index if absent.
    pub async fn ensure_table(&self) -> MigrateResult<()> {
        self.db
            .execute_batch(CREATE_LEDGER_SQL)
            .await
            .map_err(|e| {
                log::error!("Failed to initialize migration ledger: {e}");
                MigrateError::LedgerUnavailable(e)
            })?;
        log::debug!("Migration ledger initialized");
        Ok(())
    }

    /// Applied versions in ascending order; failures propagate.
    pub async fn applied_versions(&self) -> MigrateResult<Vec<MigrationVersion>> {
        let rows = self
            .db
            .fetch(SELECT_VERSIONS_SQL, &[])
            .await
            .map_err(MigrateError::LedgerUnavailable)?;
        Ok(rows
            .iter()
            .filter_map(|row| row.get(0).and_then(MigrationVersion::try_new))
            .collect())
    }

    /// Applied versions in ascending order, or an empty list when the ledger
    /// cannot be read.
    ///
    /// Keeps status reporting available through transient failures; the
    /// returned `available` flag tells an empty ledger apart from an
    /// unreadable one.
    pub async fn list_applied_versions(&self) -> AppliedVersions {
        match self.applied_versions().await {
            Ok(versions) => AppliedVersions {
                versions,
                available: true,
            },
            Err(e) => {
                log::warn!("Failed to get applied migrations: {e}");
                AppliedVersions::default()
            }
        }
    }

    /// Full ledger rows in ascending version order.
    pub async fn applied_records(&self) -> MigrateResult<Vec<AppliedMigration>> {
        let rows = self
            .db
            .fetch(SELECT_RECORDS_SQL, &[])
            .await
            .map_err(MigrateError::LedgerUnavailable)?;
        Ok(rows.iter().filter_map(record_from_row).collect())
    }

    /// Insert the ledger row for a freshly applied migration.
    pub async fn record_applied(
        &self,
        version: &MigrationVersion,
        name: &str,
        applied_at: DateTime<Utc>,
        checksum: Option<&str>,
    ) -> MigrateResult<()> {
        let params = [
            SqlParam::from(version.as_str()),
            SqlParam::from(name),
            SqlParam::from(applied_at.format(APPLIED_AT_FORMAT).to_string()),
            SqlParam::from(checksum),
        ];
        self.db
            .execute(INSERT_SQL, &params)
            .await
            .map_err(|e| MigrateError::LedgerWriteFailed {
                version: version.to_string(),
                source: e,
            })?;
        Ok(())
    }

    /// Delete the ledger row of a rolled-back migration.
    pub async fn remove_applied(&self, version: &MigrationVersion) -> MigrateResult<()> {
        self.db
            .execute(DELETE_SQL, &[SqlParam::from(version.as_str())])
            .await
            .map_err(|e| MigrateError::LedgerWriteFailed {
                version: version.to_string(),
                source: e,
            })?;
        Ok(())
    }
}

fn record_from_row(row: &Row) -> Option<AppliedMigration> {
    Some(AppliedMigration {
        version: MigrationVersion::try_new(row.get_by_name("version")?)?,
        name: row.get_by_name("name").unwrap_or_default().to_string(),
        applied_at: row.get_by_name("applied_at").map(str::to_string),
        checksum: row.get_by_name("checksum").map(str::to_string),
    })
}

#[cfg(test)]
#[path = "ledger_test.rs"]
mod tests;
