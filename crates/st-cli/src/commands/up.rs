//! Up command implementation

use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, UpArgs};
use crate::commands::common::{print_completed, print_failure, ExitCode};
use crate::context::ProjectContext;

/// Execute the up command
pub async fn execute(args: &UpArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = ProjectContext::load(global)?;
    let migrator = ctx.migrator()?;
    let target = args.target.as_deref();

    if let Some(target) = target {
        ctx.verbose(&format!("Target version: {target}"));
    }

    if args.dry_run {
        let plan = migrator
            .plan_apply(target)
            .await
            .context("Failed to plan migrations")?;
        if plan.is_empty() {
            println!("No pending migrations.");
            return Ok(());
        }
        println!("Would apply {} migration(s):", plan.len());
        for migration in &plan {
            println!("  - {migration}");
        }
        return Ok(());
    }

    match migrator.apply_all(target).await {
        Ok(report) => {
            if report.is_empty() {
                println!("No pending migrations.");
            } else {
                print_completed(&report.completed);
                println!();
                println!("Applied {} migration(s)", report.completed.len());
            }
            println!("Migration completed successfully");
            Ok(())
        }
        Err(failure) => {
            print_failure(&failure, "Applied");
            eprintln!("Migration failed");
            Err(ExitCode(1).into())
        }
    }
}
