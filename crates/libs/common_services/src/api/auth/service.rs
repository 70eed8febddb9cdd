use crate::api::auth::error::AuthError;
use crate::api::auth::token::create_session_token;
use app_state::AppSettings;
use common_types::SessionToken;
use tracing::info;

/// Exchange the admin password for a session token.
///
/// # Errors
///
/// * `AuthError::IncorrectPassword` unless `password` equals the configured one exactly.
pub fn login(settings: &AppSettings, password: &str) -> Result<SessionToken, AuthError> {
    if !passwords_match(password, &settings.admin.password) {
        return Err(AuthError::IncorrectPassword);
    }
    let token = create_session_token(
        &settings.secrets.jwt,
        settings.constants.auth.access_token_expiry_minutes,
    )?;
    info!("Admin session started");
    Ok(token)
}

/// Byte-wise comparison that does not stop at the first mismatch.
fn passwords_match(given: &str, expected: &str) -> bool {
    let (given, expected) = (given.as_bytes(), expected.as_bytes());
    given.len() == expected.len()
        && given
            .iter()
            .zip(expected)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}
