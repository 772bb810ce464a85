//! Error types for the migration runner.

use st_core::CoreError;
use st_db::DbError;
use thiserror::Error;

use crate::report::CompletedMigration;

/// Which script of a migration was running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// `up_sql`
    Up,
    /// `down_sql`
    Down,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Up => write!(f, "up"),
            Phase::Down => write!(f, "down"),
        }
    }
}

/// Migration runner errors.
#[derive(Error, Debug)]
pub enum MigrateError {
    /// The ledger table could not be created or read (M001).
    #[error("[M001] Migration ledger unavailable: {0}")]
    LedgerUnavailable(#[source] DbError),

    /// A migration script failed; its transaction was rolled back (M002).
    #[error("[M002] Migration {version} failed ({phase}): {source}")]
    ExecutionFailed {
        version: String,
        phase: Phase,
        #[source]
        source: DbError,
    },

    /// The ledger insert/delete for a migration failed; rolled back (M003).
    #[error("[M003] Failed to update ledger for migration {version}: {source}")]
    LedgerWriteFailed {
        version: String,
        #[source]
        source: DbError,
    },

    /// Rollback requested for a migration with no `down_sql` (M004).
    #[error("[M004] Migration {version} has no rollback SQL")]
    NoRollbackSql { version: String },

    /// A migration's `up_sql` is empty (M005).
    #[error("[M005] Migration {version} has no SQL to apply")]
    EmptyMigration { version: String },

    /// BEGIN or COMMIT failed (M006).
    #[error("[M006] Transaction failed: {0}")]
    TransactionFailed(#[source] DbError),

    /// Loading migrations or writing files failed (M007).
    #[error("[M007] {0}")]
    Core(#[from] CoreError),
}

impl MigrateError {
    /// Version of the migration the error concerns, if any.
    pub fn version(&self) -> Option<&str> {
        match self {
            MigrateError::ExecutionFailed { version, .. }
            | MigrateError::LedgerWriteFailed { version, .. }
            | MigrateError::NoRollbackSql { version }
            | MigrateError::EmptyMigration { version } => Some(version),
            _ => None,
        }
    }
}

/// Errors raised by the executor outside a more specific context are
/// transaction-control failures (BEGIN/COMMIT in `with_transaction`).
impl From<DbError> for MigrateError {
    fn from(err: DbError) -> Self {
        MigrateError::TransactionFailed(err)
    }
}

/// Result type alias for [`MigrateError`].
pub type MigrateResult<T> = Result<T, MigrateError>;

/// An apply or rollback run that stopped at a failure.
///
/// `completed` lists the migrations that were committed before the failure;
/// they stay applied (or rolled back).
#[derive(Error, Debug)]
#[error("{source}")]
pub struct RunFailure {
    /// Migrations committed before the failure, in execution order
    pub completed: Vec<CompletedMigration>,
    /// The failure that stopped the run
    pub source: MigrateError,
}

impl From<MigrateError> for RunFailure {
    fn from(source: MigrateError) -> Self {
        Self {
            completed: Vec::new(),
            source,
        }
    }
}

impl From<CoreError> for RunFailure {
    fn from(err: CoreError) -> Self {
        MigrateError::from(err).into()
    }
}
