use axum::routing::get;
use axum::Router;

use crate::handlers::events;
use crate::state::AppState;

/// Event routes mounted at `/events`.
///
/// ```text
/// GET /{user_id}  -> get_events
/// PUT /{user_id}  -> upsert_events
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{user_id}",
        get(events::get_events).put(events::upsert_events),
    )
}
