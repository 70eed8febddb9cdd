//! This module defines the HTTP handlers for authentication-related routes.

use crate::api_state::ApiContext;
use axum::{Extension, Json, extract::State};
use common_services::api::auth::error::AuthError;
use common_services::api::auth::service::login;
use common_types::{LoginRequest, SessionClaims, SessionToken};
use tracing::instrument;

/// Exchange the admin password for a session token.
///
/// # Errors
///
/// Returns `AuthError::IncorrectPassword` when the password does not match.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = SessionToken),
        (status = 401, description = "Incorrect password"),
    )
)]
#[instrument(skip(context, payload), err(Debug))]
pub async fn login_handler(
    State(context): State<ApiContext>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<SessionToken>, AuthError> {
    let token = login(&context.settings, &payload.password)?;
    Ok(Json(token))
}

/// Claims of the current session token.
#[utoipa::path(
    get,
    path = "/api/auth/session",
    tag = "Auth",
    responses(
        (status = 200, description = "The token is valid", body = SessionClaims),
        (status = 401, description = "Missing, invalid or expired token"),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(claims))]
pub async fn get_session(Extension(claims): Extension<SessionClaims>) -> Json<SessionClaims> {
    Json(claims)
}
