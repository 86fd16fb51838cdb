use serde::Serialize;
use sqlx::FromRow;
use tyria_core::types::Timestamp;
use uuid::Uuid;

/// A row from the `status_checks` collection.
///
/// Serialized with snake_case keys for older clients.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StatusCheck {
    pub id: Uuid,
    pub client_name: String,
    #[sqlx(rename = "created_at")]
    pub timestamp: Timestamp,
}

/// DTO for recording a status check.
#[derive(Debug, Clone)]
pub struct CreateStatusCheck {
    pub client_name: String,
}
