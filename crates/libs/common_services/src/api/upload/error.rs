use crate::database::DbError;
use crate::storage::StorageError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No file provided")]
    MissingFile,

    #[error("Invalid upload type: {0}")]
    InvalidKind(String),

    #[error("Invalid file name: {0}")]
    InvalidFileName(String),

    #[error("Invalid upload form: {0}")]
    Multipart(String),

    #[error("Storage credentials not configured")]
    MissingCredentials,

    #[error("Storage bucket not found: {bucket}")]
    BucketNotFound { bucket: String, details: String },

    #[error("Storage error: {0}")]
    Storage(StorageError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

fn log_error(error: &UploadError) {
    match error {
        UploadError::MissingFile
        | UploadError::InvalidKind(_)
        | UploadError::InvalidFileName(_)
        | UploadError::Multipart(_) => warn!("Upload rejected: {}", error),
        UploadError::MissingCredentials => error!("Upload refused, no storage credentials"),
        UploadError::BucketNotFound { bucket, details } => {
            error!("Upload failed, bucket {} is missing: {}", bucket, details);
        }
        UploadError::Storage(e) => error!("Upload error: {:?}", e),
        UploadError::Database(e) => error!("Database error: {:?}", e),
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        log_error(&self);

        let (status, body) = match self {
            Self::MissingFile
            | Self::InvalidKind(_)
            | Self::InvalidFileName(_)
            | Self::Multipart(_) => (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() })),
            Self::MissingCredentials => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": self.to_string() }),
            ),
            Self::BucketNotFound { bucket, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": format!(
                        "Storage bucket \"{bucket}\" not found. Please create it manually in the storage dashboard (Storage → Create bucket)"
                    ),
                    "details": details,
                }),
            ),
            Self::Storage(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": e.to_string() }),
            ),
            Self::Database(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": e.to_string() }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<StorageError> for UploadError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::BucketNotFound { bucket, details } => {
                Self::BucketNotFound { bucket, details }
            }
            StorageError::InvalidName(name) => Self::InvalidFileName(name),
            other => Self::Storage(other),
        }
    }
}

impl From<axum::extract::multipart::MultipartError> for UploadError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        Self::Multipart(err.body_text())
    }
}
