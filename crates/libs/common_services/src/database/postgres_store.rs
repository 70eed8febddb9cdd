use crate::database::{DbError, MetadataStore};
use async_trait::async_trait;
use common_types::{MusicRow, NewMediaRow, PhotoRow};
use sqlx::PgPool;

const PHOTO_COLUMNS: &str =
    "id::text AS id, filename, original_name, file_size, file_type, storage_path, created_at";

fn music_columns(alias: &str) -> String {
    format!(
        "{alias}.id::text AS id, {alias}.filename, {alias}.original_name, {alias}.file_size, \
         {alias}.file_type, {alias}.storage_path, {alias}.duration, {alias}.created_at"
    )
}

/// Metadata rows in the `photos`, `music` and `active_music` tables.
#[derive(Clone)]
pub struct PgMetadataStore {
    pool: PgPool,
}

impl PgMetadataStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MetadataStore for PgMetadataStore {
    async fn insert_photo(&self, row: NewMediaRow) -> Result<PhotoRow, DbError> {
        let sql = format!(
            "INSERT INTO photos (filename, original_name, file_size, file_type, storage_path)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {PHOTO_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, PhotoRow>(&sql)
            .bind(row.filename)
            .bind(row.original_name)
            .bind(row.file_size)
            .bind(row.file_type)
            .bind(row.storage_path)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn list_photos(&self) -> Result<Vec<PhotoRow>, DbError> {
        let sql = format!("SELECT {PHOTO_COLUMNS} FROM photos ORDER BY created_at DESC");
        Ok(sqlx::query_as::<_, PhotoRow>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn find_photo(&self, id: &str) -> Result<Option<PhotoRow>, DbError> {
        let sql = format!("SELECT {PHOTO_COLUMNS} FROM photos WHERE id::text = $1");
        Ok(sqlx::query_as::<_, PhotoRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete_photo(&self, id: &str) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM photos WHERE id::text = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_music(&self, row: NewMediaRow) -> Result<MusicRow, DbError> {
        let sql = format!(
            "INSERT INTO music AS m (filename, original_name, file_size, file_type, storage_path)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            music_columns("m")
        );
        Ok(sqlx::query_as::<_, MusicRow>(&sql)
            .bind(row.filename)
            .bind(row.original_name)
            .bind(row.file_size)
            .bind(row.file_type)
            .bind(row.storage_path)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn list_music(&self) -> Result<Vec<MusicRow>, DbError> {
        let sql = format!(
            "SELECT {} FROM music m ORDER BY m.created_at DESC",
            music_columns("m")
        );
        Ok(sqlx::query_as::<_, MusicRow>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn find_music(&self, id: &str) -> Result<Option<MusicRow>, DbError> {
        let sql = format!(
            "SELECT {} FROM music m WHERE m.id::text = $1",
            music_columns("m")
        );
        Ok(sqlx::query_as::<_, MusicRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete_music(&self, id: &str) -> Result<bool, DbError> {
        // The active pointer goes with it through `ON DELETE CASCADE`.
        let result = sqlx::query("DELETE FROM music WHERE id::text = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_active_music(&self, id: &str) -> Result<(), DbError> {
        sqlx::query(
            "INSERT INTO active_music (singleton, music_id, updated_at)
             VALUES (TRUE, $1::uuid, now())
             ON CONFLICT (singleton)
             DO UPDATE SET music_id = EXCLUDED.music_id, updated_at = EXCLUDED.updated_at",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn active_music(&self) -> Result<Option<MusicRow>, DbError> {
        let sql = format!(
            "SELECT {} FROM active_music a JOIN music m ON m.id = a.music_id",
            music_columns("m")
        );
        let active = sqlx::query_as::<_, MusicRow>(&sql)
            .fetch_optional(&self.pool)
            .await?;
        if active.is_some() {
            return Ok(active);
        }

        let sql = format!(
            "SELECT {} FROM music m ORDER BY m.created_at DESC LIMIT 1",
            music_columns("m")
        );
        Ok(sqlx::query_as::<_, MusicRow>(&sql)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
