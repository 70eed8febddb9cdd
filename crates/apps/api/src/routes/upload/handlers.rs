use crate::api_state::ApiContext;
use axum::Json;
use axum::extract::{Multipart, State};
use common_services::api::upload::error::UploadError;
use common_services::api::upload::interfaces::{FileUpload, UploadForm};
use common_services::api::upload::service::upload_media;
use common_types::UploadResponse;
use tracing::instrument;

/// Store a photo or music file and record its metadata.
///
/// # Errors
///
/// Returns `UploadError` when the form is incomplete, the bucket is missing, or storage or the database fail.
#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "Upload",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File stored", body = UploadResponse),
        (status = 400, description = "No file provided, or an unknown type"),
        (status = 401, description = "Missing or invalid session"),
        (status = 500, description = "Storage or database failure"),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, multipart), err(Debug))]
pub async fn upload_handler(
    State(context): State<ApiContext>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, UploadError> {
    let mut file = None;
    let mut kind = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_owned();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_owned();
                let content_type = field.content_type().map_or_else(
                    || {
                        mime_guess::from_path(&file_name)
                            .first_or_octet_stream()
                            .to_string()
                    },
                    ToOwned::to_owned,
                );
                let bytes = field.bytes().await?;
                // Browsers send an empty unnamed part when no file was picked.
                if !(file_name.is_empty() && bytes.is_empty()) {
                    file = Some(FileUpload {
                        file_name,
                        content_type,
                        bytes,
                    });
                }
            }
            "type" => kind = Some(field.text().await?),
            _ => {}
        }
    }

    let response = upload_media(
        &context.backend,
        context.settings.constants.storage.cache_control,
        file,
        kind.as_deref(),
    )
    .await?;
    Ok(Json(response))
}
