//! Repository for the `event_progress` collection (one document per user).

use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::events::{EventRecord, UpsertEvents};

/// Column list for `event_progress` queries.
const COLUMNS: &str = "\
    user_id, completed_events, completed_event_types, created_at, updated_at";

/// Provides data access for event completion documents.
pub struct EventRepo;

impl EventRepo {
    pub async fn find(pool: &PgPool, user_id: &str) -> Result<Option<EventRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM event_progress WHERE user_id = $1");
        sqlx::query_as::<_, EventRecord>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert an empty document for `user_id` if none exists, then return
    /// the stored document.
    pub async fn find_or_create(pool: &PgPool, user_id: &str) -> Result<EventRecord, sqlx::Error> {
        let inserted = sqlx::query(
            "INSERT INTO event_progress (user_id) VALUES ($1) \
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(user_id)
        .execute(pool)
        .await?
        .rows_affected();

        if inserted > 0 {
            tracing::debug!(user_id, "Created empty event document");
        }

        Self::find(pool, user_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Insert or merge the supplied maps. Omitted maps keep their stored value.
    pub async fn upsert(
        pool: &PgPool,
        user_id: &str,
        dto: &UpsertEvents,
    ) -> Result<EventRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO event_progress AS ep \
                 (user_id, completed_events, completed_event_types) \
             VALUES ($1, COALESCE($2, '{{}}'::jsonb), COALESCE($3, '{{}}'::jsonb)) \
             ON CONFLICT (user_id) DO UPDATE SET \
                 completed_events = COALESCE($2, ep.completed_events), \
                 completed_event_types = COALESCE($3, ep.completed_event_types), \
                 updated_at = now() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EventRecord>(&query)
            .bind(user_id)
            .bind(dto.completed_events.as_ref().map(Json))
            .bind(dto.completed_event_types.as_ref().map(Json))
            .fetch_one(pool)
            .await
    }
}
