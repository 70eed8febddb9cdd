use chrono::{DateTime, Utc};
use common_types::MusicRow;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// A music row together with the url it can be streamed from.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MusicTrack {
    pub id: String,
    pub file_name: String,
    pub original_name: String,
    pub file_size: i64,
    pub file_type: String,
    pub duration: Option<f64>,
    pub url: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl MusicTrack {
    #[must_use]
    pub fn from_row(row: MusicRow, url: String, is_active: bool) -> Self {
        Self {
            id: row.id,
            file_name: row.filename,
            original_name: row.original_name,
            file_size: row.file_size,
            file_type: row.file_type,
            duration: row.duration,
            url,
            is_active,
            created_at: row.created_at,
        }
    }
}

#[derive(Deserialize, IntoParams, Debug)]
#[into_params(parameter_in = Path)]
pub struct MusicIdParam {
    /// Id of the music row.
    pub id: String,
}
