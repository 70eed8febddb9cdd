use crate::api_state::ApiContext;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common_services::api::memories::error::MemoriesError;
use common_services::api::memories::interfaces::MemoryIdParam;
use common_services::api::memories::service::{
    acknowledge_memories, delete_memory, list_memories,
};
use common_types::{AckResponse, MemoriesPayload};
use tracing::{instrument, warn};

/// List every uploaded photo as a memory, newest first.
///
/// Failures are logged and answered with an empty list.
#[utoipa::path(
    get,
    path = "/api/memories-db",
    tag = "Memories",
    responses(
        (status = 200, description = "All memories", body = MemoriesPayload),
    )
)]
#[instrument(skip(context))]
pub async fn get_memories_db(State(context): State<ApiContext>) -> Json<MemoriesPayload> {
    let memories = list_memories(&context.backend).await.unwrap_or_else(|e| {
        warn!("Error fetching memories: {}", e);
        Vec::new()
    });
    Json(MemoriesPayload { memories })
}

/// Accepts a memories list without storing it; photos are added through the upload endpoint.
#[utoipa::path(
    post,
    path = "/api/memories-db",
    tag = "Memories",
    request_body = MemoriesPayload,
    responses(
        (status = 200, description = "Acknowledged, nothing is stored", body = AckResponse),
    )
)]
#[instrument(skip(payload))]
pub async fn post_memories_db(Json(payload): Json<MemoriesPayload>) -> Json<AckResponse> {
    Json(acknowledge_memories(payload.memories.len()))
}

/// Delete a photo from storage and the metadata table.
///
/// # Errors
///
/// Returns `MemoriesError::NotFound` for an unknown id, or a storage or database error.
#[utoipa::path(
    delete,
    path = "/api/memories-db/{id}",
    tag = "Memories",
    params(MemoryIdParam),
    responses(
        (status = 204, description = "Photo deleted"),
        (status = 404, description = "No photo with this id"),
        (status = 401, description = "Missing or invalid session"),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context), err(Debug))]
pub async fn delete_memory_db(
    State(context): State<ApiContext>,
    Path(MemoryIdParam { id }): Path<MemoryIdParam>,
) -> Result<StatusCode, MemoriesError> {
    delete_memory(&context.backend, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
