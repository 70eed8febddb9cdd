use crate::database::{DbError, MetadataStore};
use async_trait::async_trait;
use chrono::Utc;
use common_types::{MusicRow, NewMediaRow, PhotoRow};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    // Insertion order, oldest first.
    photos: Vec<PhotoRow>,
    music: Vec<MusicRow>,
    active_music: Option<String>,
}

/// Metadata kept in process memory.
///
/// Used for local development and as a test double. Inserts and reads can be made to fail on demand.
#[derive(Default)]
pub struct InMemoryMetadataStore {
    tables: RwLock<Tables>,
    fail_inserts: AtomicBool,
    fail_reads: AtomicBool,
}

impl InMemoryMetadataStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent insert fail until switched off again.
    pub fn set_fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent read fail until switched off again.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub async fn photo_count(&self) -> usize {
        self.tables.read().await.photos.len()
    }

    pub async fn music_count(&self) -> usize {
        self.tables.read().await.music.len()
    }

    fn check_insert(&self) -> Result<(), DbError> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(DbError::Unavailable("insert rejected".to_owned()));
        }
        Ok(())
    }

    fn check_read(&self) -> Result<(), DbError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DbError::Unavailable("read rejected".to_owned()));
        }
        Ok(())
    }
}

#[async_trait]
impl MetadataStore for InMemoryMetadataStore {
    async fn insert_photo(&self, row: NewMediaRow) -> Result<PhotoRow, DbError> {
        self.check_insert()?;
        let photo = PhotoRow {
            id: Uuid::new_v4().to_string(),
            filename: row.filename,
            original_name: row.original_name,
            file_size: row.file_size,
            file_type: row.file_type,
            storage_path: row.storage_path,
            created_at: Utc::now(),
        };
        self.tables.write().await.photos.push(photo.clone());
        Ok(photo)
    }

    async fn list_photos(&self) -> Result<Vec<PhotoRow>, DbError> {
        self.check_read()?;
        Ok(self.tables.read().await.photos.iter().rev().cloned().collect())
    }

    async fn find_photo(&self, id: &str) -> Result<Option<PhotoRow>, DbError> {
        self.check_read()?;
        let tables = self.tables.read().await;
        Ok(tables.photos.iter().find(|p| p.id == id).cloned())
    }

    async fn delete_photo(&self, id: &str) -> Result<bool, DbError> {
        let mut tables = self.tables.write().await;
        let before = tables.photos.len();
        tables.photos.retain(|p| p.id != id);
        Ok(tables.photos.len() != before)
    }

    async fn insert_music(&self, row: NewMediaRow) -> Result<MusicRow, DbError> {
        self.check_insert()?;
        let music = MusicRow {
            id: Uuid::new_v4().to_string(),
            filename: row.filename,
            original_name: row.original_name,
            file_size: row.file_size,
            file_type: row.file_type,
            storage_path: row.storage_path,
            duration: None,
            created_at: Utc::now(),
        };
        self.tables.write().await.music.push(music.clone());
        Ok(music)
    }

    async fn list_music(&self) -> Result<Vec<MusicRow>, DbError> {
        self.check_read()?;
        Ok(self.tables.read().await.music.iter().rev().cloned().collect())
    }

    async fn find_music(&self, id: &str) -> Result<Option<MusicRow>, DbError> {
        self.check_read()?;
        let tables = self.tables.read().await;
        Ok(tables.music.iter().find(|m| m.id == id).cloned())
    }

    async fn delete_music(&self, id: &str) -> Result<bool, DbError> {
        let mut tables = self.tables.write().await;
        let before = tables.music.len();
        tables.music.retain(|m| m.id != id);
        if tables.active_music.as_deref() == Some(id) {
            tables.active_music = None;
        }
        Ok(tables.music.len() != before)
    }

    async fn set_active_music(&self, id: &str) -> Result<(), DbError> {
        self.check_insert()?;
        let mut tables = self.tables.write().await;
        if !tables.music.iter().any(|m| m.id == id) {
            return Err(DbError::Unavailable(format!("no music row with id {id}")));
        }
        tables.active_music = Some(id.to_owned());
        Ok(())
    }

    async fn active_music(&self) -> Result<Option<MusicRow>, DbError> {
        self.check_read()?;
        let tables = self.tables.read().await;
        let active = tables
            .active_music
            .as_deref()
            .and_then(|id| tables.music.iter().find(|m| m.id == id));
        Ok(active.or_else(|| tables.music.last()).cloned())
    }

    async fn ping(&self) -> Result<(), DbError> {
        self.check_read()
    }
}
