use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tyria_core::error::CoreError;
use tyria_db::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for validation failures and [`StoreError`] for
/// document-store failures. Implements [`IntoResponse`] to produce a
/// consistent `{ "success": false, "error", "code" }` body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `tyria_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure reported by the document store.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::MissingField(_) | CoreError::Validation(_) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", core.to_string())
                }
            },

            AppError::Store(err) => classify_store_error(err),
        };

        let body = json!({
            "success": false,
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a store error into an HTTP status, error code, and message.
///
/// - Connection-level failures map to 503.
/// - `RowNotFound` maps to 404.
/// - Everything else maps to 500 with a sanitized message.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    if err.is_unavailable() {
        tracing::error!(error = %err, "Document store unavailable");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            "STORE_UNAVAILABLE",
            "The document store is unavailable".to_string(),
        );
    }

    match err {
        StoreError::Database(sqlx_err) if matches!(sqlx_err, sqlx::Error::RowNotFound) => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Document store error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
