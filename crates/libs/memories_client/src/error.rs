use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("Not authorized: {0}")]
    Unauthorized(String),

    #[error("Server responded with {status}: {message}")]
    Server { status: u16, message: String },
}

impl ClientError {
    /// HTTP status of a server side failure.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::Unauthorized(_) => Some(401),
            Self::Request(_) | Self::Url(_) => None,
        }
    }
}
