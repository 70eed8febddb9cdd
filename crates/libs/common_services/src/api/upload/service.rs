use crate::Backend;
use crate::api::upload::error::UploadError;
use crate::api::upload::interfaces::FileUpload;
use crate::storage::{PutOptions, StoredObject};
use chrono::Utc;
use common_types::{MediaKind, NewMediaRow, UploadResponse};
use tracing::{info, instrument, warn};

/// Parse the `type` field of an upload form.
pub fn parse_kind(kind: Option<&str>) -> Result<MediaKind, UploadError> {
    let kind = kind.unwrap_or_default();
    kind.parse()
        .map_err(|_| UploadError::InvalidKind(kind.trim().to_owned()))
}

/// Name the object is stored under: `<unix millis>_<original name>`.
#[must_use]
pub fn stored_file_name(original_name: &str) -> String {
    format!("{}_{original_name}", Utc::now().timestamp_millis())
}

/// Store an uploaded file in the bucket and record it in the metadata tables.
///
/// The object write and the metadata insert are not atomic: when the insert fails the object stays in the bucket.
#[instrument(skip(backend, file), fields(file_name = tracing::field::Empty))]
pub async fn upload_media(
    backend: &Backend,
    cache_control: u32,
    file: Option<FileUpload>,
    kind: Option<&str>,
) -> Result<UploadResponse, UploadError> {
    let file = file.ok_or(UploadError::MissingFile)?;
    let kind = parse_kind(kind)?;
    let objects = backend
        .privileged_objects
        .as_ref()
        .ok_or(UploadError::MissingCredentials)?;

    let file_name = stored_file_name(&file.file_name);
    tracing::Span::current().record("file_name", file_name.as_str());
    let file_size = file.bytes.len() as i64;

    objects
        .put(
            &file_name,
            StoredObject {
                bytes: file.bytes,
                content_type: file.content_type.clone(),
            },
            PutOptions {
                cache_control,
                upsert: false,
            },
        )
        .await?;

    let storage_path = objects.storage_path(&file_name);
    let url = backend.objects.public_url(&storage_path);
    let row = NewMediaRow {
        filename: file_name.clone(),
        original_name: file.file_name,
        file_size,
        file_type: file.content_type,
        storage_path,
    };

    match kind {
        MediaKind::Photo => {
            backend.metadata.insert_photo(row).await?;
        }
        MediaKind::Music => {
            let music = backend.metadata.insert_music(row).await?;
            if let Err(e) = backend.metadata.set_active_music(&music.id).await {
                warn!("Could not mark {} as the active track: {}", music.id, e);
            }
        }
    }

    info!("Uploaded {} as {}", kind, file_name);
    Ok(UploadResponse {
        success: true,
        url,
        file_name,
        kind,
    })
}
