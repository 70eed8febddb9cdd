use crate::api_state::ApiContext;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common_services::api::music::error::MusicError;
use common_services::api::music::interfaces::{MusicIdParam, MusicTrack};
use common_services::api::music::service::{
    acknowledge_music_url, active_music_url, delete_music, list_music,
};
use common_types::{AckResponse, MusicUrlPayload};
use tracing::{instrument, warn};

/// Url of the active music track, empty when there is none.
#[utoipa::path(
    get,
    path = "/api/music-url-db",
    tag = "Music",
    responses(
        (status = 200, description = "The active music url", body = MusicUrlPayload),
    )
)]
#[instrument(skip(context))]
pub async fn get_music_url_db(State(context): State<ApiContext>) -> Json<MusicUrlPayload> {
    let music_url = active_music_url(&context.backend)
        .await
        .unwrap_or_else(|e| {
            warn!("Error fetching music URL: {}", e);
            String::new()
        });
    Json(MusicUrlPayload { music_url })
}

#[utoipa::path(
    post,
    path = "/api/music-url-db",
    tag = "Music",
    request_body = MusicUrlPayload,
    responses(
        (status = 200, description = "Acknowledged, nothing is stored", body = AckResponse),
    )
)]
#[instrument(skip(payload))]
pub async fn post_music_url_db(Json(payload): Json<MusicUrlPayload>) -> Json<AckResponse> {
    Json(acknowledge_music_url(&payload.music_url))
}

/// List uploaded music tracks, newest first.
///
/// # Errors
///
/// Returns `MusicError::Database` if the metadata store can not be read.
#[utoipa::path(
    get,
    path = "/api/music",
    tag = "Music",
    responses(
        (status = 200, description = "All tracks", body = [MusicTrack]),
        (status = 500, description = "A database error occurred."),
    )
)]
#[instrument(skip(context), err(Debug))]
pub async fn get_music(State(context): State<ApiContext>) -> Result<Json<Vec<MusicTrack>>, MusicError> {
    Ok(Json(list_music(&context.backend).await?))
}

/// Delete a music track.
#[utoipa::path(
    delete,
    path = "/api/music/{id}",
    tag = "Music",
    params(MusicIdParam),
    responses(
        (status = 204, description = "Track deleted"),
        (status = 404, description = "No track with this id"),
        (status = 401, description = "Missing or invalid session"),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context), err(Debug))]
pub async fn delete_music_handler(
    State(context): State<ApiContext>,
    Path(MusicIdParam { id }): Path<MusicIdParam>,
) -> Result<StatusCode, MusicError> {
    delete_music(&context.backend, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
