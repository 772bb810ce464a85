//! st-migrate - Migration runner for Strata
//!
//! Tracks applied migrations in the `schema_migrations` ledger table and
//! applies or rolls back file-based migrations one transaction at a time,
//! in strict version order.
//!
//! The runner assumes it is the only writer: nothing here guards against a
//! second process migrating the same database concurrently.

pub mod error;
pub mod ledger;
pub mod migrator;
pub mod plan;
pub mod report;

pub use error::{MigrateError, MigrateResult, Phase, RunFailure};
pub use ledger::{AppliedMigration, AppliedVersions, Ledger};
pub use migrator::Migrator;
pub use plan::{plan_apply, plan_rollback};
pub use report::{CompletedMigration, Direction, MigrationStatus, RunReport};
