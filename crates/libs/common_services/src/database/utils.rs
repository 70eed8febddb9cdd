use crate::database::DbError;
use app_state::DatabaseConstants;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tracing::info;

/// Connect to Postgres and bring the schema up to date.
///
/// # Errors
///
/// * `PgPool::connect` can return an error if the database connection fails.
/// * `sqlx::migrate` can return an error if migrations fail.
pub async fn get_db_pool(
    database_url: &str,
    constants: &DatabaseConstants,
) -> Result<PgPool, DbError> {
    info!("Connecting to database.");
    let pool = PgPoolOptions::new()
        .max_connections(constants.max_connections)
        .min_connections(constants.min_connections)
        .acquire_timeout(Duration::from_secs(constants.acquire_timeout))
        .idle_timeout(Duration::from_secs(constants.idle_timeout))
        .test_before_acquire(true)
        .connect(database_url)
        .await?;

    sqlx::migrate!("../../../migrations").run(&pool).await?;
    info!("Database migrations are up to date.");

    Ok(pool)
}
