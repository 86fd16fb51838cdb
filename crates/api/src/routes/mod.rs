pub mod events;
pub mod health;
pub mod progress;
pub mod status;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                        service info (GET)
/// /health                  liveness (GET)
/// /mongo_health            document store probe (GET)
///
/// /progress/{user_id}      get, upsert (GET, PUT)
/// /progress/{user_id}/history  all stored days (GET)
/// /events/{user_id}        get, upsert (GET, PUT)
///
/// /status                  list, create (GET, POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/progress", progress::router())
        .nest("/events", events::router())
        .nest("/status", status::router())
}
