//! Down command implementation

use anyhow::{Context, Result};

use crate::cli::{DownArgs, GlobalArgs};
use crate::commands::common::{print_completed, print_failure, ExitCode};
use crate::context::ProjectContext;

/// Execute the down command
pub async fn execute(args: &DownArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = ProjectContext::load(global)?;
    let migrator = ctx.migrator()?;

    if args.dry_run {
        let plan = migrator
            .plan_rollback(&args.target)
            .await
            .context("Failed to plan rollback")?;
        if plan.is_empty() {
            println!("No migrations to roll back.");
            return Ok(());
        }
        println!("Would roll back {} migration(s):", plan.len());
        for migration in &plan {
            let note = if migration.is_reversible() {
                ""
            } else {
                " (no rollback SQL)"
            };
            println!("  - {migration}{note}");
        }
        return Ok(());
    }

    match migrator.rollback_to(&args.target).await {
        Ok(report) => {
            if report.is_empty() {
                println!("No migrations to roll back.");
            } else {
                print_completed(&report.completed);
                println!();
                println!("Rolled back {} migration(s)", report.completed.len());
            }
            println!("Rollback completed successfully");
            Ok(())
        }
        Err(failure) => {
            print_failure(&failure, "Rolled back");
            eprintln!("Rollback failed");
            Err(ExitCode(1).into())
        }
    }
}
