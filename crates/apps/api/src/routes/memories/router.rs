use crate::api_state::ApiContext;
use crate::memories::handlers::{delete_memory_db, get_memories_db, post_memories_db};
use axum::{
    Router,
    routing::{delete, get},
};

pub fn memories_public_router() -> Router<ApiContext> {
    Router::new().route(
        "/api/memories-db",
        get(get_memories_db).post(post_memories_db),
    )
}

pub fn memories_protected_router() -> Router<ApiContext> {
    Router::new().route("/api/memories-db/{id}", delete(delete_memory_db))
}
