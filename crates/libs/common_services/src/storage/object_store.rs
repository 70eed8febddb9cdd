use crate::storage::StorageError;
use app_state::join_url;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Url;

/// A stored file and the content type it was stored with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bytes: Bytes,
    pub content_type: String,
}

#[derive(Debug, Clone, Copy)]
pub struct PutOptions {
    /// Seconds, forwarded as `cache-control: max-age=..`.
    pub cache_control: u32,
    /// Overwrite an existing object with the same name.
    pub upsert: bool,
}

impl Default for PutOptions {
    fn default() -> Self {
        Self {
            cache_control: 3600,
            upsert: false,
        }
    }
}

/// A single bucket of an object storage backend.
///
/// Objects are addressed by their name inside the bucket; rows store `<bucket>/<name>` as storage path.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    fn bucket(&self) -> &str;

    /// Publicly reachable url for a `<bucket>/<name>` storage path.
    fn public_url(&self, storage_path: &str) -> String;

    async fn put(
        &self,
        name: &str,
        object: StoredObject,
        options: PutOptions,
    ) -> Result<(), StorageError>;

    async fn get(&self, name: &str) -> Result<Option<StoredObject>, StorageError>;

    async fn remove(&self, name: &str) -> Result<(), StorageError>;

    fn storage_path(&self, name: &str) -> String {
        format!("{}/{name}", self.bucket())
    }
}

/// Rejects names that could escape the bucket.
pub fn validate_object_name(name: &str) -> Result<(), StorageError> {
    let invalid = name.is_empty()
        || name.contains('/')
        || name.contains('\\')
        || name == "."
        || name == "..";
    if invalid {
        return Err(StorageError::InvalidName(name.to_owned()));
    }
    Ok(())
}

/// `base` followed by the segments of a `<bucket>/<name>` storage path, each percent-encoded.
#[must_use]
pub fn public_object_url(base: &str, storage_path: &str) -> String {
    let Ok(mut url) = base.parse::<Url>() else {
        return join_url(base, storage_path);
    };
    match url.path_segments_mut() {
        Ok(mut segments) => {
            segments.pop_if_empty().extend(storage_path.split('/'));
        }
        Err(()) => return join_url(base, storage_path),
    }
    url.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_path_like_names() {
        assert!(validate_object_name("1_a.jpg").is_ok());
        assert!(validate_object_name("../a.jpg").is_err());
        assert!(validate_object_name("a\\b.jpg").is_err());
        assert!(validate_object_name("").is_err());
    }

    #[test]
    fn public_object_url_encodes_names() {
        assert_eq!(
            public_object_url("http://localhost:3000/storage/", "memories/1_beach day.jpg"),
            "http://localhost:3000/storage/memories/1_beach%20day.jpg"
        );
        assert_eq!(
            public_object_url("http://localhost:3000/storage", "memories/1_#1.jpg"),
            "http://localhost:3000/storage/memories/1_%231.jpg"
        );
    }
}
