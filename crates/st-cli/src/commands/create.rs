//! Create command implementation

use anyhow::{Context, Result};

use crate::cli::{CreateArgs, GlobalArgs};
use crate::context::ProjectContext;

/// Execute the create command
///
/// Only writes a file; no database is needed.
pub async fn execute(args: &CreateArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = ProjectContext::load(global)?;
    let directory = ctx.directory();
    ctx.verbose(&format!("Migrations directory: {}", directory.path().display()));

    let path = directory
        .create_migration_file(
            &args.name,
            &args.up_sql,
            args.down_sql.as_deref().unwrap_or_default(),
        )
        .context("Failed to create migration")?;

    println!("Created migration file: {}", path.display());
    Ok(())
}
