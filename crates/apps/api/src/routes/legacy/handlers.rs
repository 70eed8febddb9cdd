use crate::api_state::ApiContext;
use axum::Json;
use axum::extract::State;
use common_services::api::legacy::error::LegacyError;
use common_services::api::legacy::interfaces::LegacyMemoriesDocument;
use common_services::api::legacy::service::{read_memories, write_memories};
use common_types::SaveResponse;
use tracing::instrument;

/// Memories kept in the local JSON file.
#[utoipa::path(
    get,
    path = "/api/memories",
    tag = "Legacy",
    responses(
        (status = 200, description = "Memories from the file, empty when it is missing", body = LegacyMemoriesDocument),
    )
)]
#[instrument(skip(context))]
pub async fn get_legacy_memories(State(context): State<ApiContext>) -> Json<LegacyMemoriesDocument> {
    let memories = read_memories(&context.settings.legacy.memories_file).await;
    Json(LegacyMemoriesDocument { memories })
}

/// Replace the memories in the local JSON file.
///
/// # Errors
///
/// Returns `LegacyError` if the file can not be written.
#[utoipa::path(
    post,
    path = "/api/memories",
    tag = "Legacy",
    request_body = LegacyMemoriesDocument,
    responses(
        (status = 200, description = "Saved", body = SaveResponse),
        (status = 401, description = "Missing or invalid session"),
        (status = 500, description = "The file could not be written", body = SaveResponse),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, payload), err(Debug))]
pub async fn post_legacy_memories(
    State(context): State<ApiContext>,
    Json(payload): Json<LegacyMemoriesDocument>,
) -> Result<Json<SaveResponse>, LegacyError> {
    write_memories(&context.settings.legacy.memories_file, &payload.memories).await?;
    Ok(Json(SaveResponse {
        success: true,
        error: None,
    }))
}
