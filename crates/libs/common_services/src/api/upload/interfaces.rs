use bytes::Bytes;
use serde::Deserialize;
use utoipa::ToSchema;

/// The `file` part of an upload form.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Multipart body of `POST /api/upload`, for the OpenAPI document only.
#[derive(Deserialize, ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    /// `photo` or `music`.
    #[schema(example = "photo")]
    #[serde(rename = "type")]
    pub kind: String,
}
