use crate::api_state::ApiContext;
use crate::music::handlers::{delete_music_handler, get_music, get_music_url_db, post_music_url_db};
use axum::{
    Router,
    routing::{delete, get},
};

pub fn music_public_router() -> Router<ApiContext> {
    Router::new()
        .route(
            "/api/music-url-db",
            get(get_music_url_db).post(post_music_url_db),
        )
        .route("/api/music", get(get_music))
}

pub fn music_protected_router() -> Router<ApiContext> {
    Router::new().route("/api/music/{id}", delete(delete_music_handler))
}
