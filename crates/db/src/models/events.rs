//! Per-user event completion documents.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use tyria_core::types::{EventMap, Timestamp};

/// A row from the `event_progress` collection, one per user.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub user_id: String,
    pub completed_events: Json<EventMap>,
    pub completed_event_types: Json<EventMap>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Partial write for an event document. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpsertEvents {
    pub completed_events: Option<EventMap>,
    pub completed_event_types: Option<EventMap>,
}
