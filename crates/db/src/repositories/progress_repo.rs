//! Repository for the `daily_progress` collection.
//!
//! Documents are keyed by `(user_id, date)`. Writes are single-statement
//! upserts so concurrent requests for the same key never observe a torn
//! merge.

use serde_json::Value;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::progress::{ProgressRecord, UpsertProgress};

/// Column list for `daily_progress` queries.
const COLUMNS: &str = "\
    user_id, date, daily_progress, completed_events, completed_event_types, \
    created_at, updated_at";

/// Provides data access for daily progress documents.
pub struct ProgressRepo;

impl ProgressRepo {
    /// Find the document for `(user_id, date)`.
    pub async fn find(
        pool: &PgPool,
        user_id: &str,
        date: &str,
    ) -> Result<Option<ProgressRecord>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM daily_progress WHERE user_id = $1 AND date = $2");
        sqlx::query_as::<_, ProgressRecord>(&query)
            .bind(user_id)
            .bind(date)
            .fetch_optional(pool)
            .await
    }

    /// Most recently written document for a user.
    ///
    /// Only explicit writes count; documents created by a read are ignored.
    pub async fn find_latest(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Option<ProgressRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM daily_progress \
             WHERE user_id = $1 AND written_at IS NOT NULL \
             ORDER BY written_at DESC, date DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, ProgressRecord>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// All documents for a user, newest date first, capped at `limit`.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: &str,
        limit: i64,
    ) -> Result<Vec<ProgressRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM daily_progress \
             WHERE user_id = $1 \
             ORDER BY date DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, ProgressRecord>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Insert `default_progress` for `(user_id, date)` unless a document
    /// already exists, then return the stored document.
    pub async fn find_or_create(
        pool: &PgPool,
        user_id: &str,
        date: &str,
        default_progress: &Value,
    ) -> Result<ProgressRecord, sqlx::Error> {
        let inserted = sqlx::query(
            "INSERT INTO daily_progress (user_id, date, daily_progress) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (user_id, date) DO NOTHING",
        )
        .bind(user_id)
        .bind(date)
        .bind(default_progress)
        .execute(pool)
        .await?
        .rows_affected();

        if inserted > 0 {
            tracing::debug!(user_id, date, "Created default progress document");
        }

        Self::find(pool, user_id, date)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Insert or merge a document.
    ///
    /// `daily_progress` is always set. The event maps use `COALESCE` so an
    /// omitted map keeps its stored value (or `{}` on insert).
    pub async fn upsert(
        pool: &PgPool,
        user_id: &str,
        dto: &UpsertProgress,
    ) -> Result<ProgressRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO daily_progress AS dp \
                 (user_id, date, daily_progress, completed_events, completed_event_types, written_at) \
             VALUES ($1, $2, $3, COALESCE($4, '{{}}'::jsonb), COALESCE($5, '{{}}'::jsonb), clock_timestamp()) \
             ON CONFLICT (user_id, date) DO UPDATE SET \
                 daily_progress = EXCLUDED.daily_progress, \
                 completed_events = COALESCE($4, dp.completed_events), \
                 completed_event_types = COALESCE($5, dp.completed_event_types), \
                 updated_at = now(), \
                 written_at = clock_timestamp() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProgressRecord>(&query)
            .bind(user_id)
            .bind(&dto.date)
            .bind(&dto.daily_progress)
            .bind(dto.completed_events.as_ref().map(Json))
            .bind(dto.completed_event_types.as_ref().map(Json))
            .fetch_one(pool)
            .await
    }
}
