use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common_types::SaveResponse;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum LegacyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl IntoResponse for LegacyError {
    fn into_response(self) -> Response {
        error!("Failed to save memories: {:?}", self);

        let body = Json(SaveResponse {
            success: false,
            error: Some(self.to_string()),
        });
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
