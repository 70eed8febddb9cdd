use crate::Backend;
use crate::api::music::error::MusicError;
use crate::api::music::interfaces::MusicTrack;
use common_types::AckResponse;
use tracing::{info, instrument, warn};

/// Public url of the active track, or an empty string when there is none.
#[instrument(skip(backend))]
pub async fn active_music_url(backend: &Backend) -> Result<String, MusicError> {
    let active = backend.metadata.active_music().await?;
    Ok(active
        .map(|music| backend.objects.public_url(&music.storage_path))
        .unwrap_or_default())
}

/// The music url follows the latest upload, a posted url is acknowledged and dropped.
#[must_use]
pub fn acknowledge_music_url(music_url: &str) -> AckResponse {
    info!("Ignoring posted music url {:?}", music_url);
    AckResponse {
        success: true,
        message: "Music should be managed via upload endpoint".to_owned(),
    }
}

/// Every uploaded track, newest first.
#[instrument(skip(backend))]
pub async fn list_music(backend: &Backend) -> Result<Vec<MusicTrack>, MusicError> {
    let active_id = backend.metadata.active_music().await?.map(|m| m.id);
    let rows = backend.metadata.list_music().await?;
    Ok(rows
        .into_iter()
        .map(|row| {
            let url = backend.objects.public_url(&row.storage_path);
            let is_active = active_id.as_deref() == Some(row.id.as_str());
            MusicTrack::from_row(row, url, is_active)
        })
        .collect())
}

/// Remove a track from the bucket and its metadata row.
///
/// A failure to remove the object is logged and the row is deleted anyway.
#[instrument(skip(backend))]
pub async fn delete_music(backend: &Backend, id: &str) -> Result<(), MusicError> {
    let music = backend
        .metadata
        .find_music(id)
        .await?
        .ok_or_else(|| MusicError::NotFound(id.to_owned()))?;
    let objects = backend
        .privileged_objects
        .as_ref()
        .ok_or(MusicError::MissingCredentials)?;

    if let Err(e) = objects.remove(&music.filename).await {
        warn!("Could not remove {} from storage: {}", music.filename, e);
    }
    if !backend.metadata.delete_music(id).await? {
        return Err(MusicError::NotFound(id.to_owned()));
    }
    info!("Deleted music {} ({})", id, music.filename);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{InMemoryMetadataStore, MetadataStore};
    use common_types::NewMediaRow;
    use std::sync::Arc;

    fn track(name: &str) -> NewMediaRow {
        NewMediaRow {
            filename: format!("1_{name}"),
            original_name: name.to_owned(),
            file_size: 1,
            file_type: "audio/mpeg".to_owned(),
            storage_path: format!("memories/1_{name}"),
        }
    }

    #[tokio::test]
    async fn empty_url_without_music() {
        let backend = Backend::in_memory("memories", "http://cdn");
        assert_eq!(active_music_url(&backend).await.unwrap(), "");
    }

    #[tokio::test]
    async fn active_pointer_wins_over_latest() {
        let metadata = Arc::new(InMemoryMetadataStore::new());
        let mut backend = Backend::in_memory("memories", "http://cdn");
        backend.metadata = metadata.clone();

        let first = metadata.insert_music(track("a.mp3")).await.unwrap();
        metadata.insert_music(track("b.mp3")).await.unwrap();
        assert_eq!(
            active_music_url(&backend).await.unwrap(),
            "http://cdn/memories/1_b.mp3"
        );

        metadata.set_active_music(&first.id).await.unwrap();
        assert_eq!(
            active_music_url(&backend).await.unwrap(),
            "http://cdn/memories/1_a.mp3"
        );
        let tracks = list_music(&backend).await.unwrap();
        assert_eq!(tracks.iter().filter(|t| t.is_active).count(), 1);
        assert_eq!(tracks[1].id, first.id);
        assert!(tracks[1].is_active);

        delete_music(&backend, &first.id).await.unwrap();
        assert_eq!(
            active_music_url(&backend).await.unwrap(),
            "http://cdn/memories/1_b.mp3"
        );
    }
}
