//! Shared utilities for CLI commands

use st_migrate::{CompletedMigration, RunFailure};
use std::fmt;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and the database is closed cleanly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Intentionally empty: ExitCode is a control-flow mechanism, not a
        // user-facing error.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Print one line per completed migration.
pub(crate) fn print_completed(completed: &[CompletedMigration]) {
    for done in completed {
        println!(
            "  \u{2713} {} - {} ({}ms)",
            done.version, done.name, done.duration_ms
        );
    }
}

/// Print what a failed run managed before stopping, then the failure.
pub(crate) fn print_failure(failure: &RunFailure, verb: &str) {
    print_completed(&failure.completed);
    if let Some(version) = failure.source.version() {
        println!("  \u{2717} {version}");
    }
    println!();
    println!(
        "{} {} migration(s) before the failure",
        verb,
        failure.completed.len()
    );
    eprintln!("Error: {}", failure.source);
}
