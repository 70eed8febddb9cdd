use crate::database::DbError;
use async_trait::async_trait;
use common_types::{MusicRow, NewMediaRow, PhotoRow};

/// Metadata rows for everything that was uploaded.
///
/// Listing operations return the newest row first.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    async fn insert_photo(&self, row: NewMediaRow) -> Result<PhotoRow, DbError>;

    async fn list_photos(&self) -> Result<Vec<PhotoRow>, DbError>;

    async fn find_photo(&self, id: &str) -> Result<Option<PhotoRow>, DbError>;

    /// Returns `false` when no row had this id.
    async fn delete_photo(&self, id: &str) -> Result<bool, DbError>;

    async fn insert_music(&self, row: NewMediaRow) -> Result<MusicRow, DbError>;

    async fn list_music(&self) -> Result<Vec<MusicRow>, DbError>;

    async fn find_music(&self, id: &str) -> Result<Option<MusicRow>, DbError>;

    async fn delete_music(&self, id: &str) -> Result<bool, DbError>;

    /// Point the active track at `id`.
    async fn set_active_music(&self, id: &str) -> Result<(), DbError>;

    /// The track the active pointer names, or the most recent one when no pointer is set.
    async fn active_music(&self) -> Result<Option<MusicRow>, DbError>;

    async fn ping(&self) -> Result<(), DbError>;
}
