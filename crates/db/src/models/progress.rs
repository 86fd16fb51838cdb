//! Daily progress documents and their write DTO.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use tyria_core::types::{EventMap, Timestamp};

/// A row from the `daily_progress` collection, one per `(user_id, date)`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub user_id: String,
    pub date: String,
    pub daily_progress: serde_json::Value,
    pub completed_events: Json<EventMap>,
    pub completed_event_types: Json<EventMap>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated write for one `(user_id, date)` document.
///
/// `daily_progress` always replaces the stored value. The event maps are
/// only written when present; `None` keeps whatever is stored.
#[derive(Debug, Clone)]
pub struct UpsertProgress {
    pub date: String,
    pub daily_progress: serde_json::Value,
    pub completed_events: Option<EventMap>,
    pub completed_event_types: Option<EventMap>,
}
