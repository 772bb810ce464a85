//! Pending and rollback set computation.
//!
//! Pure functions over the loaded migrations and the applied versions; the
//! migrator runs whatever these return, in the order returned.

use st_core::{Migration, MigrationVersion};
use std::collections::HashSet;

/// Migrations to apply: not yet applied and, when a target is given, at or
/// below it. Ascending version order.
///
/// A blank target means no target.
pub fn plan_apply<'m>(
    migrations: &'m [Migration],
    applied: &[MigrationVersion],
    target: Option<&str>,
) -> Vec<&'m Migration> {
    let target = target.map(str::trim).filter(|t| !t.is_empty());
    let applied: HashSet<&str> = applied.iter().map(MigrationVersion::as_str).collect();

    let mut pending: Vec<&Migration> = migrations
        .iter()
        .filter(|m| !applied.contains(m.version.as_str()))
        .filter(|m| target.map_or(true, |t| m.version.as_str() <= t))
        .collect();
    pending.sort_by(|a, b| a.version.cmp(&b.version));
    pending
}

/// Migrations to roll back: applied and strictly above the target.
/// Descending version order.
///
/// Applied versions with no migration file are not included; there is no
/// `down_sql` to run for them.
pub fn plan_rollback<'m>(
    migrations: &'m [Migration],
    applied: &[MigrationVersion],
    target: &str,
) -> Vec<&'m Migration> {
    let applied: HashSet<&str> = applied.iter().map(MigrationVersion::as_str).collect();

    let mut to_rollback: Vec<&Migration> = migrations
        .iter()
        .filter(|m| applied.contains(m.version.as_str()))
        .filter(|m| m.version.as_str() > target)
        .collect();
    to_rollback.sort_by(|a, b| b.version.cmp(&a.version));
    to_rollback
}

#[cfg(test)]
#[path = "plan_test.rs"]
mod tests;
