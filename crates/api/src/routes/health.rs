use axum::routing::get;
use axum::Router;

use crate::handlers::health;
use crate::state::AppState;

/// Info and probe routes, merged at the `/api` root.
///
/// ```text
/// GET /              -> service_info
/// GET /health        -> health_check
/// GET /mongo_health  -> store_health
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(health::service_info))
        .route("/health", get(health::health_check))
        .route("/mongo_health", get(health::store_health))
}
