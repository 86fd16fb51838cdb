//! Legacy status-check endpoints kept for older clients.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tyria_core::validation::require_non_blank;
use tyria_db::models::status_check::{CreateStatusCheck, StatusCheck};

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatusCheckPayload {
    pub client_name: Option<String>,
}

/// POST /api/status
pub async fn create_status_check(
    State(state): State<AppState>,
    Json(payload): Json<StatusCheckPayload>,
) -> AppResult<Json<StatusCheck>> {
    let dto = CreateStatusCheck {
        client_name: require_non_blank(payload.client_name, "client_name")?,
    };

    let check = state.store.create_status_check(&dto).await?;

    tracing::info!(id = %check.id, client_name = %check.client_name, "Status check recorded");

    Ok(Json(check))
}

/// GET /api/status
///
/// Capped at `status_list_limit` entries.
pub async fn list_status_checks(State(state): State<AppState>) -> AppResult<Json<Vec<StatusCheck>>> {
    let checks = state
        .store
        .list_status_checks(state.config.status_list_limit)
        .await?;
    Ok(Json(checks))
}
