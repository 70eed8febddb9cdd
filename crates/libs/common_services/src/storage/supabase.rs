use crate::storage::{ObjectStore, PutOptions, StorageError, StoredObject, validate_object_name};
use app_state::join_url;
use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, instrument};

/// Error body returned by the storage REST API.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StorageErrorBody {
    #[serde(default)]
    status_code: Option<Value>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl StorageErrorBody {
    fn status_code(&self) -> Option<String> {
        self.status_code.as_ref().map(|code| match code {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    fn message(&self, fallback: &str) -> String {
        self.message
            .clone()
            .or_else(|| self.error.clone())
            .unwrap_or_else(|| fallback.to_owned())
    }

    fn is_bucket_missing(&self, status: StatusCode) -> bool {
        let says_not_found = self.status_code().as_deref() == Some("404")
            || status == StatusCode::NOT_FOUND;
        let mentions_bucket = self
            .error
            .iter()
            .chain(self.message.iter())
            .any(|text| text.to_lowercase().contains("bucket not found"));
        says_not_found && (mentions_bucket || self.error.is_none())
    }
}

/// One bucket of a Supabase-compatible storage REST API.
///
/// The key decides what the client may do: the anonymous key for reads, the service-role key for writes.
#[derive(Clone)]
pub struct SupabaseStorage {
    http_client: Client,
    base_url: String,
    bucket: String,
    key: String,
}

impl SupabaseStorage {
    #[must_use]
    pub fn new(http_client: Client, base_url: &str, bucket: &str, key: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            bucket: bucket.to_owned(),
            key: key.to_owned(),
        }
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, StorageError> {
        let mut url: Url = self
            .base_url
            .parse()
            .map_err(|e| StorageError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|()| StorageError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["storage", "v1", "object"])
            .extend(segments);
        Ok(url)
    }

    async fn error_from_response(&self, response: reqwest::Response) -> StorageError {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let body: StorageErrorBody = serde_json::from_str(&text).unwrap_or_default();
        let message = body.message(&text);

        if body.is_bucket_missing(status) {
            return StorageError::BucketNotFound {
                bucket: self.bucket.clone(),
                details: message,
            };
        }
        if status == StatusCode::CONFLICT || body.status_code().as_deref() == Some("409") {
            return StorageError::AlreadyExists(message);
        }
        StorageError::Backend {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl ObjectStore for SupabaseStorage {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn public_url(&self, storage_path: &str) -> String {
        let segments: Vec<&str> = std::iter::once("public")
            .chain(storage_path.split('/'))
            .collect();
        self.endpoint(&segments).map_or_else(
            |_| {
                join_url(
                    &self.base_url,
                    &format!("storage/v1/object/public/{storage_path}"),
                )
            },
            String::from,
        )
    }

    #[instrument(skip(self, object), fields(bucket = %self.bucket, size = object.bytes.len()))]
    async fn put(
        &self,
        name: &str,
        object: StoredObject,
        options: PutOptions,
    ) -> Result<(), StorageError> {
        validate_object_name(name)?;
        let url = self.endpoint(&[self.bucket.as_str(), name])?;
        let response = self
            .http_client
            .post(url)
            .bearer_auth(&self.key)
            .header("apikey", &self.key)
            .header(CONTENT_TYPE, object.content_type)
            .header(CACHE_CONTROL, format!("max-age={}", options.cache_control))
            .header("x-upsert", options.upsert.to_string())
            .body(object.bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.error_from_response(response).await);
        }
        debug!("Stored {name} in bucket {}", self.bucket);
        Ok(())
    }

    async fn get(&self, name: &str) -> Result<Option<StoredObject>, StorageError> {
        validate_object_name(name)?;
        let url = self.endpoint(&[self.bucket.as_str(), name])?;
        let response = self
            .http_client
            .get(url)
            .bearer_auth(&self.key)
            .header("apikey", &self.key)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::BAD_REQUEST {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(self.error_from_response(response).await);
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_owned();
        let bytes = response.bytes().await?;
        Ok(Some(StoredObject {
            bytes,
            content_type,
        }))
    }

    async fn remove(&self, name: &str) -> Result<(), StorageError> {
        validate_object_name(name)?;
        let url = self.endpoint(&[self.bucket.as_str()])?;
        let response = self
            .http_client
            .delete(url)
            .bearer_auth(&self.key)
            .header("apikey", &self.key)
            .json(&json!({ "prefixes": [name] }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.error_from_response(response).await);
        }
        Ok(())
    }
}
