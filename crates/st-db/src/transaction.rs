//! Scoped transactions over a [`Database`].

use crate::error::DbError;
use crate::traits::Database;
use std::future::Future;

/// Run `body` inside a `BEGIN` / `COMMIT` transaction, rolling back on error.
///
/// The body receives the executor to issue its statements through. Its error
/// type only needs to absorb [`DbError`], so callers can keep their own
/// error taxonomy for failures raised inside the scope. A failed `COMMIT` is
/// followed by a best-effort `ROLLBACK` and reported as the error.
pub async fn with_transaction<'a, T, E, F, Fut>(db: &'a dyn Database, body: F) -> Result<T, E>
where
    F: FnOnce(&'a dyn Database) -> Fut,
    Fut: Future<Output = Result<T, E>> + 'a,
    E: From<DbError>,
{
    db.begin().await?;

    match body(db).await {
        Ok(value) => {
            if let Err(commit_err) = db.commit().await {
                if let Err(rollback_err) = db.rollback().await {
                    log::warn!("ROLLBACK after failed COMMIT also failed: {rollback_err}");
                }
                return Err(commit_err.into());
            }
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = db.rollback().await {
                log::warn!("ROLLBACK failed: {rollback_err}");
            }
            Err(err)
        }
    }
}

#[cfg(test)]
#[path = "transaction_test.rs"]
mod tests;
