//! Service info, liveness and document-store probe.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tyria_core::types::Timestamp;

use crate::state::AppState;

/// Name reported by the liveness probe.
pub const SERVICE_NAME: &str = "tyria-tracker-api";

const FEATURES: &[&str] = &[
    "Daily progress tracking",
    "Event completion tracking",
    "Per-date progress history",
    "Status checks",
];

#[derive(Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub version: &'static str,
    pub features: &'static [&'static str],
}

#[derive(Serialize)]
pub struct HealthResponse {
    /// Always `healthy` while the process is serving requests.
    pub status: &'static str,
    pub timestamp: Timestamp,
    pub service: &'static str,
}

/// Result of probing the document store. Never an HTTP error.
#[derive(Serialize)]
pub struct StoreHealthResponse {
    pub mongo_status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collections: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /api/
pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Tyria Tracker API",
        version: env!("CARGO_PKG_VERSION"),
        features: FEATURES,
    })
}

/// GET /api/health
///
/// Does not touch the store.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: chrono::Utc::now(),
        service: SERVICE_NAME,
    })
}

/// GET /api/mongo_health
///
/// Enumerates the store's collections; a failure is reported in the body.
pub async fn store_health(State(state): State<AppState>) -> Json<StoreHealthResponse> {
    match state.store.list_collections().await {
        Ok(collections) => Json(StoreHealthResponse {
            mongo_status: "connected",
            collections: Some(collections),
            error: None,
        }),
        Err(err) => {
            tracing::error!(error = %err, "Document store probe failed");
            Json(StoreHealthResponse {
                mongo_status: "error",
                collections: None,
                error: Some(err.to_string()),
            })
        }
    }
}
