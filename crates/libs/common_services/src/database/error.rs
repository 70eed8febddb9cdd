use thiserror::Error;

/// Failure of a [`MetadataStore`](crate::database::MetadataStore) call.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Could not apply migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Refused without a driver error, such as an injected failure of the in-memory store.
    #[error("Metadata store unavailable: {0}")]
    Unavailable(String),
}
