use crate::api_state::ApiContext;
use crate::upload::handlers::upload_handler;
use axum::{Router, routing::post};

pub fn upload_protected_router() -> Router<ApiContext> {
    Router::new().route("/api/upload", post(upload_handler))
}
