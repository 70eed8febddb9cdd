use crate::Backend;
use crate::api::memories::error::MemoriesError;
use common_types::{AckResponse, Memory};
use tracing::{info, instrument};

/// All photos as slides, newest first.
#[instrument(skip(backend))]
pub async fn list_memories(backend: &Backend) -> Result<Vec<Memory>, MemoriesError> {
    let photos = backend.metadata.list_photos().await?;
    Ok(photos
        .iter()
        .map(|photo| Memory::from_photo(photo, backend.objects.public_url(&photo.storage_path)))
        .collect())
}

/// Memories are created by uploading photos, a posted list is acknowledged and dropped.
#[must_use]
pub fn acknowledge_memories(count: usize) -> AckResponse {
    info!("Ignoring posted list of {} memories", count);
    AckResponse {
        success: true,
        message: "Memories should be managed via upload endpoint".to_owned(),
    }
}

/// Remove a photo from the bucket, then its metadata row.
///
/// When removing the object fails the row is kept, so the photo stays listed and the purge can be retried.
#[instrument(skip(backend))]
pub async fn delete_memory(backend: &Backend, id: &str) -> Result<(), MemoriesError> {
    let photo = backend
        .metadata
        .find_photo(id)
        .await?
        .ok_or_else(|| MemoriesError::NotFound(id.to_owned()))?;
    let objects = backend
        .privileged_objects
        .as_ref()
        .ok_or(MemoriesError::MissingCredentials)?;

    objects.remove(&photo.filename).await?;
    if !backend.metadata.delete_photo(id).await? {
        return Err(MemoriesError::NotFound(id.to_owned()));
    }
    info!("Deleted photo {} ({})", id, photo.filename);
    Ok(())
}
