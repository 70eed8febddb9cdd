use crate::api_state::ApiContext;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

#[utoipa::path(
    get,
    path = "/",
    tag = "System",
    responses(
        (status = 200, description = "Root message")
    )
)]
pub async fn root() -> &'static str {
    "Memories API"
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    responses(
        (status = 200, description = "API is healthy and ready to accept traffic", body = String),
        (status = 503, description = "API is not healthy, likely due to a database issue.")
    )
)]
pub async fn health_check(State(context): State<ApiContext>) -> Result<&'static str, StatusCode> {
    match context.backend.metadata.ping().await {
        Ok(()) => Ok("OK"),
        Err(e) => {
            error!("Health check failed: database connection error: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Serves objects of the in-memory bucket.
pub async fn get_stored_object(
    State(context): State<ApiContext>,
    Path((bucket, name)): Path<(String, String)>,
) -> Response {
    let objects = &context.backend.objects;
    if bucket != objects.bucket() {
        return StatusCode::NOT_FOUND.into_response();
    }
    match objects.get(&name).await {
        Ok(Some(object)) => (
            [
                (header::CONTENT_TYPE, object.content_type),
                (
                    header::CACHE_CONTROL,
                    format!(
                        "public, max-age={}",
                        context.settings.constants.storage.cache_control
                    ),
                ),
            ],
            object.bytes,
        )
            .into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            warn!("Could not read {}/{}: {}", bucket, name, e);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}
