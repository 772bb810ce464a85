//! st-db - Database abstraction layer for Strata
//!
//! This crate provides the `Database` trait, the transactional SQL executor
//! the migration runner is written against, and its DuckDB implementation.

pub mod duckdb;
pub mod error;
pub mod traits;
pub mod transaction;

pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use traits::{Database, Row, SqlParam};
pub use transaction::with_transaction;
