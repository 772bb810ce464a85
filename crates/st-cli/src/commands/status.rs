//! Status command implementation

use anyhow::{Context, Result};
use serde::Serialize;
use st_migrate::{AppliedMigration, MigrationStatus};

use crate::cli::{GlobalArgs, StatusArgs, StatusOutput};
use crate::context::ProjectContext;

/// JSON status document
#[derive(Serialize)]
struct StatusReport<'a> {
    #[serde(flatten)]
    status: &'a MigrationStatus,

    /// Full ledger rows, only with --verbose
    #[serde(skip_serializing_if = "Option::is_none")]
    records: Option<&'a [AppliedMigration]>,
}

/// Execute the status command
pub async fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = ProjectContext::load(global)?;
    let migrator = ctx.migrator()?;

    let status = migrator
        .status()
        .await
        .context("Failed to get migration status")?;

    if !status.ledger_available {
        eprintln!(
            "Warning: the migration ledger could not be read; applied migrations are shown as empty"
        );
    }

    let records = if global.verbose && status.ledger_available {
        match migrator.applied_records().await {
            Ok(records) => Some(records),
            Err(e) => {
                log::warn!("Failed to read ledger rows: {e}");
                None
            }
        }
    } else {
        None
    };

    match args.output {
        StatusOutput::Json => {
            let report = StatusReport {
                status: &status,
                records: records.as_deref(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        StatusOutput::Table => print_table(&status, records.as_deref()),
    }

    Ok(())
}

fn print_table(status: &MigrationStatus, records: Option<&[AppliedMigration]>) {
    println!("Applied migrations: {}", status.applied_count);
    println!("Pending migrations: {}", status.pending_count);
    println!(
        "Latest applied: {}",
        status.latest_applied.as_deref().unwrap_or("none")
    );

    if !status.pending.is_empty() {
        println!("\nPending migrations:");
        for version in &status.pending {
            println!("  - {version}");
        }
    }

    match records {
        Some(records) if !records.is_empty() => {
            println!("\nApplied migrations:");
            let name_width = records.iter().map(|r| r.name.len()).max().unwrap_or(0);
            for record in records {
                println!(
                    "  - {}  {:<width$}  {}",
                    record.version,
                    record.name,
                    record.applied_at.as_deref().unwrap_or("-"),
                    width = name_width
                );
            }
        }
        _ if !status.applied.is_empty() => {
            println!("\nApplied migrations:");
            for version in &status.applied {
                println!("  - {version}");
            }
        }
        _ => {}
    }
}
