//! Database trait definition

use crate::error::DbResult;
use async_trait::async_trait;

/// A bound statement parameter.
///
/// Values are always bound, never interpolated into SQL text.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    /// SQL NULL
    Null,
    /// Integer value
    Integer(i64),
    /// Text value
    Text(String),
}

impl From<&str> for SqlParam {
    fn from(s: &str) -> Self {
        SqlParam::Text(s.to_string())
    }
}

impl From<String> for SqlParam {
    fn from(s: String) -> Self {
        SqlParam::Text(s)
    }
}

impl From<i64> for SqlParam {
    fn from(n: i64) -> Self {
        SqlParam::Integer(n)
    }
}

impl<T: Into<SqlParam>> From<Option<T>> for SqlParam {
    fn from(value: Option<T>) -> Self {
        value.map_or(SqlParam::Null, Into::into)
    }
}

/// One result row with string-coerced values.
///
/// Columns are addressable by position or by name; NULL is `None`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<Option<String>>,
}

impl Row {
    /// Build a row from parallel column-name and value lists.
    pub fn new(columns: Vec<String>, values: Vec<Option<String>>) -> Self {
        Self { columns, values }
    }

    /// Value at a column position.
    pub fn get(&self, idx: usize) -> Option<&str> {
        self.values.get(idx).and_then(|v| v.as_deref())
    }

    /// Value of a named column (case-insensitive).
    pub fn get_by_name(&self, name: &str) -> Option<&str> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
            .and_then(|idx| self.get(idx))
    }

    /// Column names of the row.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

/// Transactional SQL executor for Strata
///
/// Implementations must be Send + Sync for async operation. Statements issued
/// between [`begin`](Database::begin) and [`commit`](Database::commit) or
/// [`rollback`](Database::rollback) must commit or roll back together; use
/// [`crate::with_transaction`] rather than calling these directly.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute one parameterized statement, returns affected rows
    async fn execute(&self, sql: &str, params: &[SqlParam]) -> DbResult<usize>;

    /// Execute a script of one or more statements
    async fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Run a parameterized query and return all rows
    async fn fetch(&self, sql: &str, params: &[SqlParam]) -> DbResult<Vec<Row>>;

    /// Start a transaction
    async fn begin(&self) -> DbResult<()>;

    /// Commit the open transaction
    async fn commit(&self) -> DbResult<()>;

    /// Roll back the open transaction
    async fn rollback(&self) -> DbResult<()>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
