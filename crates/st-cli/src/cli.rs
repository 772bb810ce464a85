//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Strata - versioned, file-based SQL schema migrations
#[derive(Parser, Debug)]
#[command(name = "strata")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Database path (overrides database.path in strata.yml)
    #[arg(short, long, global = true, env = "STRATA_DATABASE")]
    pub database: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply pending migrations
    Up(UpArgs),

    /// Roll back applied migrations newer than a target version
    Down(DownArgs),

    /// Show applied and pending migrations
    Status(StatusArgs),

    /// Create a new migration file
    Create(CreateArgs),
}

/// Arguments for the up command
#[derive(Args, Debug)]
pub struct UpArgs {
    /// Apply migrations up to and including this version
    #[arg(short, long)]
    pub target: Option<String>,

    /// Show which migrations would be applied without applying them
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the down command
#[derive(Args, Debug)]
pub struct DownArgs {
    /// Roll back every applied migration newer than this version
    #[arg(value_parser = clap::builder::NonEmptyStringValueParser::new())]
    pub target: String,

    /// Show which migrations would be rolled back without rolling them back
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: StatusOutput,
}

/// Status output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutput {
    /// Human-readable summary
    Table,
    /// JSON document
    Json,
}

/// Arguments for the create command
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Migration name (lower-cased, spaces become underscores)
    pub name: String,

    /// Forward SQL
    #[arg(long)]
    pub up_sql: String,

    /// Reverse SQL; omit for an irreversible migration
    #[arg(long)]
    pub down_sql: Option<String>,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
