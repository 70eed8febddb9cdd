use crate::database::DbError;
use crate::storage::StorageError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum MemoriesError {
    #[error("Memory not found: {0}")]
    NotFound(String),

    #[error("Storage credentials not configured")]
    MissingCredentials,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl IntoResponse for MemoriesError {
    fn into_response(self) -> Response {
        warn!("Memories error: {:?}", self);

        let status = match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MissingCredentials | Self::Storage(_) | Self::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
