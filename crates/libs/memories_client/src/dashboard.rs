//! Admin dashboard: queueing photos, uploading them, music and memory management.

mod preview;
mod selection;

pub use preview::*;
pub use selection::*;

use crate::{ClientError, MemoriesApi, MemoriesStore, Route, Session, SyncReport};
use chrono::Utc;
use common_types::{MediaKind, UploadResponse};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::task;
use tracing::{info, instrument, warn};

#[derive(Debug, Error)]
pub enum DashboardError {
    /// The batch stopped at `index`; the previews before it were uploaded, added to the store
    /// and synced, see `sync`.
    #[error("Upload of {file_name} failed after {uploaded} uploads: {source}")]
    Upload {
        index: usize,
        uploaded: usize,
        file_name: String,
        source: ClientError,
        sync: SyncReport,
    },

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Could not read files: {0}")]
    Io(#[from] io::Error),

    #[error("Image processing failed: {0}")]
    Join(#[from] task::JoinError),
}

/// A finished photo batch.
#[derive(Debug)]
pub struct Submitted {
    pub uploaded: usize,
    pub sync: SyncReport,
}

/// A finished music upload.
#[derive(Debug)]
pub struct MusicUploaded {
    pub upload: UploadResponse,
    pub sync: SyncReport,
}

/// Images processed out of the last selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadingProgress {
    pub processed: usize,
    pub total: usize,
}

impl LoadingProgress {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.total > 0 && self.processed < self.total
    }
}

pub struct Dashboard {
    session: Session,
    previews: Vec<ImagePreview>,
    edit_index: usize,
    loading: LoadingProgress,
    upload_progress: usize,
    is_uploading: bool,
}

impl Dashboard {
    /// Open the dashboard. Without a session that the server accepts this redirects to the login gate.
    #[instrument(skip_all)]
    pub async fn open(session: Option<Session>, api: &dyn MemoriesApi) -> Result<Self, Route> {
        let Some(session) = session else {
            return Err(Route::Login);
        };
        if session.is_expired_at(Utc::now()) {
            info!("Session expired");
            return Err(Route::Login);
        }
        if let Err(e) = api.verify_session(&session).await {
            warn!("Session rejected: {}", e);
            return Err(Route::Login);
        }

        Ok(Self {
            session,
            previews: Vec::new(),
            edit_index: 0,
            loading: LoadingProgress::default(),
            upload_progress: 0,
            is_uploading: false,
        })
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn previews(&self) -> &[ImagePreview] {
        &self.previews
    }

    #[must_use]
    pub const fn edit_index(&self) -> usize {
        self.edit_index
    }

    #[must_use]
    pub fn current_preview(&self) -> Option<&ImagePreview> {
        self.previews.get(self.edit_index)
    }

    #[must_use]
    pub const fn loading(&self) -> LoadingProgress {
        self.loading
    }

    #[must_use]
    pub const fn upload_progress(&self) -> usize {
        self.upload_progress
    }

    #[must_use]
    pub const fn is_uploading(&self) -> bool {
        self.is_uploading
    }

    /// Queue the images among `files`, re-encoded as JPEG. Returns how many were queued.
    pub async fn add_files(&mut self, files: Vec<SelectedFile>) -> Result<usize, DashboardError> {
        let images: Vec<_> = files.into_iter().filter(SelectedFile::is_image).collect();
        self.loading = LoadingProgress {
            processed: 0,
            total: images.len(),
        };

        for file in images {
            let preview = task::spawn_blocking(move || ImagePreview::from_selected(file)).await?;
            self.previews.push(preview);
            self.loading.processed += 1;
        }
        Ok(self.loading.total)
    }

    /// Queue the images among the files at `paths`. Files without an image extension are not read.
    pub async fn add_paths(&mut self, paths: &[PathBuf]) -> Result<usize, DashboardError> {
        let mut files = Vec::with_capacity(paths.len());
        for path in paths.iter().filter(|path| has_image_extension(path)) {
            files.push(SelectedFile::read(path).await?);
        }
        self.add_files(files).await
    }

    /// Queue every image below `dir`.
    pub async fn add_folder(&mut self, dir: &Path) -> Result<usize, DashboardError> {
        let files = read_folder(dir).await?;
        self.add_files(files).await
    }

    pub fn select_preview(&mut self, index: usize) -> bool {
        if index < self.previews.len() {
            self.edit_index = index;
            return true;
        }
        false
    }

    pub fn set_title(&mut self, index: usize, title: impl Into<String>) -> bool {
        self.previews
            .get_mut(index)
            .map(|preview| preview.title = title.into())
            .is_some()
    }

    pub fn set_date(&mut self, index: usize, date: impl Into<String>) -> bool {
        self.previews
            .get_mut(index)
            .map(|preview| preview.date = date.into())
            .is_some()
    }

    pub fn remove_preview(&mut self, index: usize) -> Option<ImagePreview> {
        if index >= self.previews.len() {
            return None;
        }
        let removed = self.previews.remove(index);
        if self.edit_index >= self.previews.len() && self.edit_index > 0 {
            self.edit_index -= 1;
        }
        Some(removed)
    }

    pub fn clear_previews(&mut self) {
        self.previews.clear();
        self.edit_index = 0;
        self.loading = LoadingProgress::default();
    }

    /// Upload the queued previews one by one, add each to the store, then sync the store.
    ///
    /// The first failure stops the batch: earlier previews are already added and leave the queue,
    /// the failed one and the rest stay queued.
    #[instrument(skip_all, fields(queued = self.previews.len()))]
    pub async fn submit(
        &mut self,
        api: &dyn MemoriesApi,
        store: &mut MemoriesStore,
    ) -> Result<Submitted, DashboardError> {
        self.is_uploading = true;
        self.upload_progress = 0;
        let mut failure = None;

        for (index, preview) in self.previews.iter().enumerate() {
            match api
                .upload(&self.session, preview.upload_file(), MediaKind::Photo)
                .await
            {
                Ok(uploaded) => {
                    store.add(preview.to_memory(&uploaded));
                    self.upload_progress += 1;
                }
                Err(source) => {
                    failure = Some((index, preview.file_name.clone(), source));
                    break;
                }
            }
        }

        let uploaded = self.upload_progress;
        self.previews.drain(..uploaded);
        self.edit_index = 0;
        self.is_uploading = false;
        let sync = store.sync(api).await;

        if let Some((index, file_name, source)) = failure {
            warn!("Upload of {} failed: {}", file_name, source);
            return Err(DashboardError::Upload {
                index,
                uploaded,
                file_name,
                source,
                sync,
            });
        }

        self.loading = LoadingProgress::default();
        self.upload_progress = 0;
        info!("Uploaded {} photos", uploaded);
        Ok(Submitted { uploaded, sync })
    }

    /// Upload a music track; it replaces the store's music url right away and is synced.
    #[instrument(skip_all, fields(file_name = %file.file_name))]
    pub async fn upload_music(
        &mut self,
        api: &dyn MemoriesApi,
        store: &mut MemoriesStore,
        file: SelectedFile,
    ) -> Result<MusicUploaded, DashboardError> {
        self.is_uploading = true;
        let content_type = file.mime_type();
        let result = api
            .upload(
                &self.session,
                crate::UploadFile {
                    file_name: file.file_name,
                    content_type,
                    bytes: file.bytes,
                },
                MediaKind::Music,
            )
            .await;
        self.is_uploading = false;

        let upload = result?;
        store.set_music_url(upload.url.clone());
        let sync = store.sync(api).await;
        Ok(MusicUploaded { upload, sync })
    }

    /// Remove a memory from the slideshow and sync; storage is left untouched.
    ///
    /// `None` when no memory has this id.
    pub async fn delete_memory(
        &self,
        api: &dyn MemoriesApi,
        store: &mut MemoriesStore,
        id: &str,
    ) -> Option<SyncReport> {
        if !store.remove(id) {
            return None;
        }
        Some(store.sync(api).await)
    }

    /// Delete the photo from storage and the database, then from the slideshow, and sync.
    pub async fn purge_memory(
        &self,
        api: &dyn MemoriesApi,
        store: &mut MemoriesStore,
        id: &str,
    ) -> Result<SyncReport, DashboardError> {
        api.delete_memory(&self.session, id).await?;
        store.remove(id);
        Ok(store.sync(api).await)
    }

    /// Drop the session.
    #[must_use]
    pub fn logout(self) -> Route {
        info!("Logged out");
        Route::Login
    }
}
