//! The injected document-store seam.

use async_trait::async_trait;

use crate::models::events::{EventRecord, UpsertEvents};
use crate::models::progress::{ProgressRecord, UpsertProgress};
use crate::models::status_check::{CreateStatusCheck, StatusCheck};
use crate::repositories::{EventRepo, ProgressRepo, StatusCheckRepo};
use crate::DbPool;

/// Errors surfaced by a [`ProgressStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Whether the failure is at the connection level rather than a
    /// problem with an individual query.
    pub fn is_unavailable(&self) -> bool {
        match self {
            StoreError::Unavailable(_) => true,
            StoreError::Database(err) => matches!(
                err,
                sqlx::Error::Io(_)
                    | sqlx::Error::Tls(_)
                    | sqlx::Error::PoolTimedOut
                    | sqlx::Error::PoolClosed
                    | sqlx::Error::WorkerCrashed
            ),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence operations behind every HTTP route.
///
/// Each write touches exactly one document and is atomic at that
/// granularity. Reads of a key that was never written create and return a
/// zero-valued default document.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Return the `(user_id, date)` document, creating it from
    /// `default_progress` if absent.
    async fn find_or_create_progress(
        &self,
        user_id: &str,
        date: &str,
        default_progress: &serde_json::Value,
    ) -> StoreResult<ProgressRecord>;

    /// The user's most recently written progress document, if any.
    ///
    /// Documents that exist only because a read created them are skipped.
    async fn latest_progress(&self, user_id: &str) -> StoreResult<Option<ProgressRecord>>;

    /// Every stored day for the user, newest date first, at most `limit`.
    async fn list_progress(&self, user_id: &str, limit: usize)
        -> StoreResult<Vec<ProgressRecord>>;

    /// Merge `dto` into the `(user_id, dto.date)` document, creating it if absent.
    async fn upsert_progress(
        &self,
        user_id: &str,
        dto: &UpsertProgress,
    ) -> StoreResult<ProgressRecord>;

    /// Return the user's event document, creating an empty one if absent.
    async fn find_or_create_events(&self, user_id: &str) -> StoreResult<EventRecord>;

    /// Merge `dto` into the user's event document, creating it if absent.
    async fn upsert_events(&self, user_id: &str, dto: &UpsertEvents) -> StoreResult<EventRecord>;

    async fn create_status_check(&self, dto: &CreateStatusCheck) -> StoreResult<StatusCheck>;

    /// Newest first, at most `limit` entries.
    async fn list_status_checks(&self, limit: usize) -> StoreResult<Vec<StatusCheck>>;

    /// Collection names, for the connectivity probe.
    async fn list_collections(&self) -> StoreResult<Vec<String>>;
}

/// [`ProgressStore`] backed by PostgreSQL.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProgressStore for PgStore {
    async fn find_or_create_progress(
        &self,
        user_id: &str,
        date: &str,
        default_progress: &serde_json::Value,
    ) -> StoreResult<ProgressRecord> {
        Ok(ProgressRepo::find_or_create(&self.pool, user_id, date, default_progress).await?)
    }

    async fn latest_progress(&self, user_id: &str) -> StoreResult<Option<ProgressRecord>> {
        Ok(ProgressRepo::find_latest(&self.pool, user_id).await?)
    }

    async fn list_progress(
        &self,
        user_id: &str,
        limit: usize,
    ) -> StoreResult<Vec<ProgressRecord>> {
        Ok(ProgressRepo::list_for_user(&self.pool, user_id, sql_limit(limit)).await?)
    }

    async fn upsert_progress(
        &self,
        user_id: &str,
        dto: &UpsertProgress,
    ) -> StoreResult<ProgressRecord> {
        Ok(ProgressRepo::upsert(&self.pool, user_id, dto).await?)
    }

    async fn find_or_create_events(&self, user_id: &str) -> StoreResult<EventRecord> {
        Ok(EventRepo::find_or_create(&self.pool, user_id).await?)
    }

    async fn upsert_events(&self, user_id: &str, dto: &UpsertEvents) -> StoreResult<EventRecord> {
        Ok(EventRepo::upsert(&self.pool, user_id, dto).await?)
    }

    async fn create_status_check(&self, dto: &CreateStatusCheck) -> StoreResult<StatusCheck> {
        Ok(StatusCheckRepo::create(&self.pool, dto).await?)
    }

    async fn list_status_checks(&self, limit: usize) -> StoreResult<Vec<StatusCheck>> {
        Ok(StatusCheckRepo::list(&self.pool, sql_limit(limit)).await?)
    }

    async fn list_collections(&self) -> StoreResult<Vec<String>> {
        Ok(crate::list_collections(&self.pool).await?)
    }
}

fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_failures_are_unavailable() {
        assert!(StoreError::Database(sqlx::Error::PoolTimedOut).is_unavailable());
        assert!(StoreError::Database(sqlx::Error::PoolClosed).is_unavailable());
        assert!(StoreError::Unavailable("down".into()).is_unavailable());
    }

    #[test]
    fn query_failures_are_not_unavailable() {
        assert!(!StoreError::Database(sqlx::Error::RowNotFound).is_unavailable());
    }
}
