//! Handlers for per-user event completion documents.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use tyria_core::types::EventMap;
use tyria_core::validation::{require_any, validate_key};
use tyria_db::models::events::{EventRecord, UpsertEvents};

use crate::error::AppResult;
use crate::state::AppState;

/// Body of `PUT /api/events/{user_id}`. At least one map must be present.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsPayload {
    pub completed_events: Option<EventMap>,
    pub completed_event_types: Option<EventMap>,
}

/// GET /api/events/{user_id}
pub async fn get_events(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<EventRecord>> {
    validate_key(&user_id, "userId")?;

    let record = state.store.find_or_create_events(&user_id).await?;
    Ok(Json(record))
}

/// PUT /api/events/{user_id}
///
/// Each supplied map replaces the stored one; an omitted map is untouched.
pub async fn upsert_events(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(payload): Json<EventsPayload>,
) -> AppResult<Json<EventRecord>> {
    validate_key(&user_id, "userId")?;
    require_any(
        &payload.completed_events,
        &payload.completed_event_types,
        ("completedEvents", "completedEventTypes"),
    )?;

    let dto = UpsertEvents {
        completed_events: payload.completed_events,
        completed_event_types: payload.completed_event_types,
    };
    let record = state.store.upsert_events(&user_id, &dto).await?;

    tracing::info!(
        user_id = %user_id,
        completed_events = record.completed_events.len(),
        completed_event_types = record.completed_event_types.len(),
        "Events saved",
    );

    Ok(Json(record))
}
