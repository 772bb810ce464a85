//! Run and status reports.

use serde::Serialize;

/// Direction of a migration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Applying pending migrations
    Up,
    /// Rolling back applied migrations
    Down,
}

/// A migration committed during a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletedMigration {
    pub version: String,
    pub name: String,
    /// Wall-clock time of the migration's transaction
    pub duration_ms: u64,
}

/// Outcome of a run that finished without error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub direction: Direction,
    /// Migrations committed, in execution order
    pub completed: Vec<CompletedMigration>,
}

impl RunReport {
    pub(crate) fn new(direction: Direction) -> Self {
        Self {
            direction,
            completed: Vec::new(),
        }
    }

    /// Whether the run had nothing to do.
    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }
}

/// Summary of applied versus pending migrations.
///
/// `applied` and `pending` are each in ascending version order. Versions in
/// the ledger with no file on disk are counted as applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MigrationStatus {
    pub applied_count: usize,
    pub pending_count: usize,
    pub applied: Vec<String>,
    pub pending: Vec<String>,
    pub latest_applied: Option<String>,
    /// False when the ledger could not be read and `applied` is empty as a
    /// result
    pub ledger_available: bool,
}

impl MigrationStatus {
    /// Build a status report from sorted applied and pending version lists.
    pub fn new(applied: Vec<String>, pending: Vec<String>, ledger_available: bool) -> Self {
        Self {
            applied_count: applied.len(),
            pending_count: pending.len(),
            latest_applied: applied.last().cloned(),
            applied,
            pending,
            ledger_available,
        }
    }
}
