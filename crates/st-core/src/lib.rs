//! st-core - Core library for Strata
//!
//! This crate provides the migration data model, the migration file parser,
//! directory discovery, migration file generation and project configuration
//! shared by the migration runner and the CLI.

pub mod checksum;
pub mod config;
pub mod directory;
pub mod error;
pub mod migration;
pub mod version;
pub mod writer;

pub use checksum::compute_checksum;
pub use config::{Config, DatabaseConfig};
pub use directory::MigrationDirectory;
pub use error::{CoreError, CoreResult};
pub use migration::{Migration, DOWN_MARKER};
pub use version::MigrationVersion;
