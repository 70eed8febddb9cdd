use crate::api_state::ApiContext;
use crate::auth::handlers::{get_session, login_handler};
use axum::{
    Router,
    routing::{get, post},
};

pub fn auth_public_router() -> Router<ApiContext> {
    Router::new().route("/api/auth/login", post(login_handler))
}

pub fn auth_protected_router() -> Router<ApiContext> {
    Router::new().route("/api/auth/session", get(get_session))
}
