use crate::{ClientError, MemoriesApi, Route};
use chrono::{DateTime, TimeZone, Utc};
use common_types::SessionToken;
use thiserror::Error;
use tracing::{info, warn};

/// Proof of a successful admin login, required to open the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: SessionToken,
}

impl Session {
    #[must_use]
    pub const fn new(token: SessionToken) -> Self {
        Self { token }
    }

    #[must_use]
    pub const fn token(&self) -> &SessionToken {
        &self.token
    }

    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.token.access_token
    }

    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.token.expiry, 0).single()
    }

    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_none_or(|expiry| expiry <= now)
    }
}

#[derive(Debug, Error)]
pub enum LoginError {
    #[error("Incorrect password")]
    IncorrectPassword,

    #[error("Login failed: {0}")]
    Client(#[from] ClientError),
}

/// Where a successful login lands, together with the session.
#[derive(Debug, Clone)]
pub struct LoggedIn {
    pub session: Session,
    pub route: Route,
}

/// The password form in front of the dashboard.
#[derive(Debug, Default)]
pub struct LoginGate {
    password: String,
    error: Option<String>,
    is_loading: bool,
}

impl LoginGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    /// Inline error of the last attempt.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Check the entered password with the server.
    pub async fn submit(&mut self, api: &dyn MemoriesApi) -> Result<LoggedIn, LoginError> {
        self.error = None;
        self.is_loading = true;
        let result = api.login(&self.password).await;
        self.is_loading = false;

        match result {
            Ok(token) => {
                info!("Logged in");
                Ok(LoggedIn {
                    session: Session::new(token),
                    route: Route::Dashboard,
                })
            }
            Err(ClientError::Unauthorized(_)) => {
                self.error = Some(LoginError::IncorrectPassword.to_string());
                Err(LoginError::IncorrectPassword)
            }
            Err(e) => {
                warn!("Login request failed: {}", e);
                self.error = Some(e.to_string());
                Err(e.into())
            }
        }
    }
}
