use crate::api_state::ApiContext;
use crate::root::handlers::{get_stored_object, health_check, root};
use axum::{Router, routing::get};

pub fn root_public_router() -> Router<ApiContext> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
}

pub fn storage_router() -> Router<ApiContext> {
    Router::new().route("/storage/{bucket}/{name}", get(get_stored_object))
}
