//! Handlers for per-user, per-date progress documents.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use tyria_core::checklist::{default_daily_progress, today_key};
use tyria_core::types::EventMap;
use tyria_core::validation::{require, require_non_blank, validate_key};
use tyria_db::models::progress::{ProgressRecord, UpsertProgress};

use crate::error::AppResult;
use crate::state::AppState;

/// Query string for `GET /api/progress/{user_id}`.
#[derive(Debug, Deserialize)]
pub struct ProgressQuery {
    pub date: Option<String>,
}

/// Body of `PUT /api/progress/{user_id}`.
///
/// Every field is optional at the serde level so a missing `date` or
/// `dailyProgress` is reported as a validation error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressPayload {
    pub date: Option<String>,
    pub daily_progress: Option<serde_json::Value>,
    pub completed_events: Option<EventMap>,
    pub completed_event_types: Option<EventMap>,
}

impl ProgressPayload {
    fn into_upsert(self) -> AppResult<UpsertProgress> {
        let date = require_non_blank(self.date, "date")?;
        let daily_progress = require(
            self.daily_progress.filter(|v| !v.is_null()),
            "dailyProgress",
        )?;

        Ok(UpsertProgress {
            date,
            daily_progress,
            completed_events: self.completed_events,
            completed_event_types: self.completed_event_types,
        })
    }
}

/// GET /api/progress/{user_id}?date=YYYY-MM-DD
///
/// With `date`, returns that day's document. Without it, returns the most
/// recently written document, falling back to today's. A document that
/// does not exist yet is created with every checklist task incomplete.
pub async fn get_progress(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<ProgressQuery>,
) -> AppResult<Json<ProgressRecord>> {
    validate_key(&user_id, "userId")?;

    let date = match query.date {
        Some(date) => Some(require_non_blank(Some(date), "date")?),
        None => None,
    };

    if date.is_none() {
        if let Some(latest) = state.store.latest_progress(&user_id).await? {
            return Ok(Json(latest));
        }
    }

    let date = date.unwrap_or_else(today_key);
    let record = state
        .store
        .find_or_create_progress(&user_id, &date, &default_daily_progress())
        .await?;

    tracing::debug!(user_id = %user_id, date = %record.date, "Progress fetched");

    Ok(Json(record))
}

/// GET /api/progress/{user_id}/history
///
/// Every stored day for the user as an object keyed by date. When the user
/// has more than `history_limit` days, only the newest are returned. Reads
/// here never create documents.
pub async fn get_progress_history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<BTreeMap<String, ProgressRecord>>> {
    validate_key(&user_id, "userId")?;

    let days = state
        .store
        .list_progress(&user_id, state.config.history_limit)
        .await?;

    tracing::debug!(user_id = %user_id, days = days.len(), "Progress history fetched");

    Ok(Json(
        days.into_iter()
            .map(|record| (record.date.clone(), record))
            .collect(),
    ))
}

/// PUT /api/progress/{user_id}
///
/// Merge the body into the `(user_id, date)` document, creating it if
/// absent. Returns the stored document after the merge.
pub async fn upsert_progress(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(payload): Json<ProgressPayload>,
) -> AppResult<Json<ProgressRecord>> {
    validate_key(&user_id, "userId")?;
    let dto = payload.into_upsert()?;

    let record = state.store.upsert_progress(&user_id, &dto).await?;

    tracing::info!(
        user_id = %user_id,
        date = %record.date,
        events_written = dto.completed_events.is_some(),
        event_types_written = dto.completed_event_types.is_some(),
        "Progress saved",
    );

    Ok(Json(record))
}
