use crate::PhotoRow;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One slide of the slideshow.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Memory {
    pub id: String,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Partial update for a [`Memory`]. `None` fields are left untouched.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemoryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Memory {
    /// Project a photo row into a slide, given the public url of its stored object.
    #[must_use]
    pub fn from_photo(photo: &PhotoRow, image_url: String) -> Self {
        let title = photo
            .original_name
            .split('.')
            .next()
            .unwrap_or_default()
            .to_owned();
        Self {
            id: photo.id.clone(),
            image_url,
            title: Some(title),
            date: Some(photo.created_at.date_naive().format("%Y-%m-%d").to_string()),
        }
    }

    pub fn apply(&mut self, patch: MemoryPatch) {
        if let Some(image_url) = patch.image_url {
            self.image_url = image_url;
        }
        if let Some(title) = patch.title {
            self.title = Some(title);
        }
        if let Some(date) = patch.date {
            self.date = Some(date);
        }
    }
}
