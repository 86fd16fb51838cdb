use axum::routing::get;
use axum::Router;

use crate::handlers::progress;
use crate::state::AppState;

/// Progress routes mounted at `/progress`.
///
/// ```text
/// GET /{user_id}          -> get_progress
/// PUT /{user_id}          -> upsert_progress
/// GET /{user_id}/history  -> get_progress_history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{user_id}",
            get(progress::get_progress).put(progress::upsert_progress),
        )
        .route("/{user_id}/history", get(progress::get_progress_history))
}
