use crate::UploadFile;
use crate::dashboard::SelectedFile;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use chrono::Utc;
use common_types::{Memory, UploadResponse};
use image::ImageError;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageReader};
use std::io::Cursor;
use tracing::debug;

/// JPEG quality every selected image is re-encoded with.
pub const JPEG_QUALITY: u8 = 70;

/// Re-encode an image as JPEG at [`JPEG_QUALITY`].
pub fn compress_image(bytes: &[u8]) -> Result<Vec<u8>, ImageError> {
    let image = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .decode()?;
    let rgb = DynamicImage::ImageRgb8(image.to_rgb8());

    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY).encode_image(&rgb)?;
    Ok(out)
}

#[must_use]
pub fn data_url(content_type: &str, bytes: &[u8]) -> String {
    format!("data:{content_type};base64,{}", STANDARD.encode(bytes))
}

#[must_use]
pub fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

/// File name up to its first `.`.
#[must_use]
pub fn file_stem(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or_default()
}

/// A selected image waiting to be uploaded, with its editable title and date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePreview {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
    pub data_url: String,
    pub title: String,
    /// `YYYY-MM-DD`, today unless edited.
    pub date: String,
    pub original_size: usize,
    pub compressed_size: usize,
}

impl ImagePreview {
    /// Compress `file`. When it can not be decoded the original bytes are kept.
    ///
    /// CPU heavy, run it off the async executor.
    #[must_use]
    pub fn from_selected(file: SelectedFile) -> Self {
        let original_size = file.bytes.len();
        let (bytes, content_type) = match compress_image(&file.bytes) {
            Ok(jpeg) => (Bytes::from(jpeg), "image/jpeg".to_owned()),
            Err(e) => {
                debug!("Keeping {} uncompressed: {}", file.file_name, e);
                let content_type = file.mime_type();
                (file.bytes, content_type)
            }
        };

        Self {
            data_url: data_url(&content_type, &bytes),
            compressed_size: bytes.len(),
            original_size,
            file_name: file.file_name,
            content_type,
            bytes,
            title: String::new(),
            date: today(),
        }
    }

    #[must_use]
    pub fn upload_file(&self) -> UploadFile {
        UploadFile {
            file_name: self.file_name.clone(),
            content_type: self.content_type.clone(),
            bytes: self.bytes.clone(),
        }
    }

    /// The slide for this preview once the upload returned.
    #[must_use]
    pub fn to_memory(&self, uploaded: &UploadResponse) -> Memory {
        let title = [self.title.trim(), file_stem(&self.file_name)]
            .into_iter()
            .find(|t| !t.is_empty())
            .unwrap_or("Untitled");
        let date = if self.date.trim().is_empty() {
            today()
        } else {
            self.date.clone()
        };

        Memory {
            id: uploaded.file_name.clone(),
            image_url: uploaded.url.clone(),
            title: Some(title.to_owned()),
            date: Some(date),
        }
    }
}
