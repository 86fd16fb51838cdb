//! Repository for the `status_checks` collection.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::status_check::{CreateStatusCheck, StatusCheck};

/// Column list for `status_checks` queries.
const COLUMNS: &str = "id, client_name, created_at";

/// Provides data access for legacy status checks.
pub struct StatusCheckRepo;

impl StatusCheckRepo {
    /// Record a status check with a freshly generated id.
    pub async fn create(
        pool: &PgPool,
        dto: &CreateStatusCheck,
    ) -> Result<StatusCheck, sqlx::Error> {
        let query = format!(
            "INSERT INTO status_checks (id, client_name) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StatusCheck>(&query)
            .bind(Uuid::new_v4())
            .bind(&dto.client_name)
            .fetch_one(pool)
            .await
    }

    /// List status checks, newest first, capped at `limit`.
    pub async fn list(pool: &PgPool, limit: i64) -> Result<Vec<StatusCheck>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM status_checks ORDER BY created_at DESC, id LIMIT $1");
        sqlx::query_as::<_, StatusCheck>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
