use crate::api_state::ApiContext;
use crate::auth::middlewares::common::{extract_context, extract_token};
use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
};
use common_services::api::auth::error::AuthError;
use common_services::api::auth::token::decode_session_token;
use common_types::SessionClaims;

/// A request carrying a valid admin session token.
#[derive(Clone, Debug)]
pub struct AdminSession(pub SessionClaims);

impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
    State<ApiContext>: FromRequestParts<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts)?.to_owned();
        let context = extract_context(parts, state).await?;
        let claims = decode_session_token(&token, &context.settings.secrets.jwt)?;
        parts.extensions.insert(claims.clone());
        Ok(Self(claims))
    }
}
