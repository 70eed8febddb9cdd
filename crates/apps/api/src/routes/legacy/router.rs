use crate::api_state::ApiContext;
use crate::legacy::handlers::{get_legacy_memories, post_legacy_memories};
use axum::{
    Router,
    routing::{get, post},
};

pub fn legacy_public_router() -> Router<ApiContext> {
    Router::new().route("/api/memories", get(get_legacy_memories))
}

pub fn legacy_protected_router() -> Router<ApiContext> {
    Router::new().route("/api/memories", post(post_legacy_memories))
}
