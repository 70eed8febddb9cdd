use crate::api::auth::error::AuthError;
use chrono::{Duration, Utc};
use common_types::{SessionClaims, SessionToken};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

/// Subject of every session token, there is a single admin.
pub const ADMIN_SUBJECT: &str = "admin";

/// Sign a new admin session token.
///
/// # Errors
///
/// * `AuthError::Internal` if token encoding fails.
pub fn create_session_token(
    jwt_secret: &str,
    expiry_minutes: i64,
) -> Result<SessionToken, AuthError> {
    let now = Utc::now();
    let exp = (now + Duration::minutes(expiry_minutes)).timestamp();
    let claims = SessionClaims {
        sub: ADMIN_SUBJECT.to_owned(),
        iat: now.timestamp(),
        exp,
    };
    let access_token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_ref()),
    )?;
    Ok(SessionToken {
        access_token,
        expiry: exp,
    })
}

/// Verify signature and expiry of a session token.
///
/// # Errors
///
/// * `AuthError::InvalidToken` if the token is malformed, expired, or signed with another secret.
pub fn decode_session_token(token: &str, jwt_secret: &str) -> Result<SessionClaims, AuthError> {
    let claims = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AuthError::InvalidToken)?;

    if claims.sub != ADMIN_SUBJECT {
        return Err(AuthError::InvalidToken);
    }
    Ok(claims)
}
