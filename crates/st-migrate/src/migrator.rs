//! Migration orchestration: apply, rollback and status.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use st_core::{Migration, MigrationDirectory};
use st_db::{with_transaction, Database};

use crate::error::{MigrateError, MigrateResult, Phase, RunFailure};
use crate::ledger::{AppliedMigration, Ledger};
use crate::plan::{plan_apply, plan_rollback};
use crate::report::{CompletedMigration, Direction, MigrationStatus, RunReport};

/// Characters of failing SQL echoed into the error log.
const SQL_SNIPPET_LEN: usize = 200;

/// Applies and rolls back the migrations of one directory against one
/// database.
///
/// Each migration runs in its own transaction together with its ledger
/// update. Runs stop at the first failure; migrations committed before it
/// stay committed.
pub struct Migrator {
    db: Arc<dyn Database>,
    directory: MigrationDirectory,
}

impl Migrator {
    /// Create a migrator over a caller-owned executor.
    pub fn new(db: Arc<dyn Database>, directory: MigrationDirectory) -> Self {
        Self { db, directory }
    }

    /// The migration directory this migrator reads.
    pub fn directory(&self) -> &MigrationDirectory {
        &self.directory
    }

    fn ledger(&self) -> Ledger<'_> {
        Ledger::new(self.db.as_ref())
    }

    /// Apply pending migrations in ascending version order, up to and
    /// including `target` when given.
    pub async fn apply_all(&self, target: Option<&str>) -> Result<RunReport, RunFailure> {
        let ledger = self.ledger();
        ledger.ensure_table().await?;
        let applied = ledger.applied_versions().await?;
        let migrations = self.directory.load()?;

        let pending = plan_apply(&migrations, &applied, target);
        let mut report = RunReport::new(Direction::Up);
        if pending.is_empty() {
            log::info!("No pending migrations");
            return Ok(report);
        }

        log::info!("Applying {} migration(s)", pending.len());
        for migration in pending {
            match self.apply_one(migration).await {
                Ok(done) => report.completed.push(done),
                Err(source) => {
                    return Err(RunFailure {
                        completed: report.completed,
                        source,
                    })
                }
            }
        }
        log::info!("Applied {} migration(s)", report.completed.len());
        Ok(report)
    }

    /// Roll back applied migrations above `target` in descending version
    /// order.
    pub async fn rollback_to(&self, target: &str) -> Result<RunReport, RunFailure> {
        let ledger = self.ledger();
        ledger.ensure_table().await?;
        let applied = ledger.applied_versions().await?;
        let migrations = self.directory.load()?;

        let to_rollback = plan_rollback(&migrations, &applied, target);
        let mut report = RunReport::new(Direction::Down);
        if to_rollback.is_empty() {
            log::info!("No migrations to roll back");
            return Ok(report);
        }

        log::info!("Rolling back {} migration(s)", to_rollback.len());
        for migration in to_rollback {
            match self.rollback_one(migration).await {
                Ok(done) => report.completed.push(done),
                Err(source) => {
                    return Err(RunFailure {
                        completed: report.completed,
                        source,
                    })
                }
            }
        }
        log::info!("Rolled back {} migration(s)", report.completed.len());
        Ok(report)
    }

    /// Applied versus pending migrations.
    ///
    /// An unreadable ledger yields an empty applied list with
    /// `ledger_available` unset rather than an error.
    pub async fn status(&self) -> MigrateResult<MigrationStatus> {
        let ledger = self.ledger();
        ledger.ensure_table().await?;
        let applied = ledger.list_applied_versions().await;
        let migrations = self.directory.load()?;

        let pending = plan_apply(&migrations, &applied.versions, None)
            .into_iter()
            .map(|m| m.version.to_string())
            .collect();
        let applied_list = applied.versions.iter().map(|v| v.to_string()).collect();

        Ok(MigrationStatus::new(applied_list, pending, applied.available))
    }

    /// Full ledger rows, oldest version first.
    pub async fn applied_records(&self) -> MigrateResult<Vec<AppliedMigration>> {
        let ledger = self.ledger();
        ledger.ensure_table().await?;
        ledger.applied_records().await
    }

    /// Migrations `apply_all(target)` would run, in order, without running
    /// them.
    ///
    /// Never writes to the database: the ledger is read fail-open, so a
    /// database without a ledger plans every migration as pending.
    pub async fn plan_apply(&self, target: Option<&str>) -> MigrateResult<Vec<Migration>> {
        let applied = self.ledger().list_applied_versions().await;
        let migrations = self.directory.load()?;
        Ok(plan_apply(&migrations, &applied.versions, target)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Migrations `rollback_to(target)` would roll back, in order, without
    /// running them.
    pub async fn plan_rollback(&self, target: &str) -> MigrateResult<Vec<Migration>> {
        let applied = self.ledger().list_applied_versions().await;
        let migrations = self.directory.load()?;
        Ok(plan_rollback(&migrations, &applied.versions, target)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Write a new migration file into the directory. Does not touch the
    /// database.
    ///
    /// Library entry point for callers that already hold a `Migrator`. The
    /// `strata create` command writes through `MigrationDirectory` directly
    /// since it never opens a database; both paths produce the same file.
    pub fn create_migration_file(
        &self,
        name: &str,
        up_sql: &str,
        down_sql: Option<&str>,
    ) -> MigrateResult<PathBuf> {
        let path = self
            .directory
            .create_migration_file(name, up_sql, down_sql.unwrap_or_default())?;
        Ok(path)
    }

    async fn apply_one(&self, migration: &Migration) -> MigrateResult<CompletedMigration> {
        if migration.up_sql.is_empty() {
            return Err(MigrateError::EmptyMigration {
                version: migration.version.to_string(),
            });
        }

        log::info!("Applying {migration}");
        let started = Instant::now();

        with_transaction(self.db.as_ref(), |tx| async move {
            tx.execute_batch(&migration.up_sql).await.map_err(|e| {
                log::error!(
                    "{migration} failed: {e}\nSQL: {}",
                    sql_snippet(&migration.up_sql)
                );
                MigrateError::ExecutionFailed {
                    version: migration.version.to_string(),
                    phase: Phase::Up,
                    source: e,
                }
            })?;
            let checksum = migration.checksum();
            Ledger::new(tx)
                .record_applied(
                    &migration.version,
                    &migration.name,
                    migration.created_at,
                    Some(&checksum),
                )
                .await
        })
        .await?;

        Ok(finish(migration, started, "Applied"))
    }

    async fn rollback_one(&self, migration: &Migration) -> MigrateResult<CompletedMigration> {
        if !migration.is_reversible() {
            log::error!("No rollback SQL for {migration}");
            return Err(MigrateError::NoRollbackSql {
                version: migration.version.to_string(),
            });
        }

        log::info!("Rolling back {migration}");
        let started = Instant::now();

        with_transaction(self.db.as_ref(), |tx| async move {
            tx.execute_batch(&migration.down_sql).await.map_err(|e| {
                log::error!(
                    "Rollback of {migration} failed: {e}\nSQL: {}",
                    sql_snippet(&migration.down_sql)
                );
                MigrateError::ExecutionFailed {
                    version: migration.version.to_string(),
                    phase: Phase::Down,
                    source: e,
                }
            })?;
            Ledger::new(tx).remove_applied(&migration.version).await
        })
        .await?;

        Ok(finish(migration, started, "Rolled back"))
    }
}

fn finish(migration: &Migration, started: Instant, verb: &str) -> CompletedMigration {
    let duration_ms = started.elapsed().as_millis() as u64;
    log::info!("{verb} {migration} ({duration_ms}ms)");
    CompletedMigration {
        version: migration.version.to_string(),
        name: migration.name.clone(),
        duration_ms,
    }
}

fn sql_snippet(sql: &str) -> String {
    let mut chars = sql.chars();
    let snippet: String = chars.by_ref().take(SQL_SNIPPET_LEN).collect();
    if chars.next().is_some() {
        format!("{snippet}...")
    } else {
        snippet
    }
}

#[cfg(test)]
#[path = "migrator_test.rs"]
mod tests;
