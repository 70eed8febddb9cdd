use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Corresponds to the 'photos' table.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRow {
    pub id: String,
    /// Generated name inside the bucket, `<millis>_<original name>`.
    pub filename: String,
    pub original_name: String,
    pub file_size: i64,
    pub file_type: String,
    /// `<bucket>/<filename>`.
    pub storage_path: String,
    pub created_at: DateTime<Utc>,
}

/// Corresponds to the 'music' table.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MusicRow {
    pub id: String,
    pub filename: String,
    pub original_name: String,
    pub file_size: i64,
    pub file_type: String,
    pub storage_path: String,
    /// Track length in seconds, when known.
    pub duration: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// Values needed to insert a row into either media table.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMediaRow {
    pub filename: String,
    pub original_name: String,
    pub file_size: i64,
    pub file_type: String,
    pub storage_path: String,
}
