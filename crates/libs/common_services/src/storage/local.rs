use crate::storage::{
    ObjectStore, PutOptions, StorageError, StoredObject, public_object_url, validate_object_name,
};
use async_trait::async_trait;
use bytes::Bytes;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// A bucket that is a folder on disk: `<root>/<bucket>/<name>`.
///
/// The api serves `<root>` under `/storage`, so public urls point back at the api itself.
#[derive(Clone, Debug)]
pub struct LocalObjectStore {
    root: PathBuf,
    bucket: String,
    public_base_url: String,
}

impl LocalObjectStore {
    /// `public_base_url` is the url `<root>` is reachable at, e.g. `http://localhost:3000/storage`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, bucket: &str, public_base_url: &str) -> Self {
        Self {
            root: root.into(),
            bucket: bucket.to_owned(),
            public_base_url: public_base_url.to_owned(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn bucket_dir(&self) -> PathBuf {
        self.root.join(&self.bucket)
    }

    /// Create the bucket folder if it does not exist yet.
    pub async fn create_bucket(&self) -> Result<(), StorageError> {
        fs::create_dir_all(self.bucket_dir()).await?;
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn public_url(&self, storage_path: &str) -> String {
        public_object_url(&self.public_base_url, storage_path)
    }

    async fn put(
        &self,
        name: &str,
        object: StoredObject,
        options: PutOptions,
    ) -> Result<(), StorageError> {
        validate_object_name(name)?;
        let bucket_dir = self.bucket_dir();
        if !fs::try_exists(&bucket_dir).await? {
            return Err(StorageError::BucketNotFound {
                bucket: self.bucket.clone(),
                details: format!("{} does not exist", bucket_dir.display()),
            });
        }

        let path = bucket_dir.join(name);
        if !options.upsert && fs::try_exists(&path).await? {
            return Err(StorageError::AlreadyExists(name.to_owned()));
        }
        fs::write(&path, &object.bytes).await?;
        debug!("Wrote {} bytes to {}", object.bytes.len(), path.display());
        Ok(())
    }

    async fn get(&self, name: &str) -> Result<Option<StoredObject>, StorageError> {
        validate_object_name(name)?;
        let path = self.bucket_dir().join(name);
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(StoredObject {
                bytes: Bytes::from(bytes),
                content_type: mime_guess::from_path(&path)
                    .first_or_octet_stream()
                    .to_string(),
            })),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn remove(&self, name: &str) -> Result<(), StorageError> {
        validate_object_name(name)?;
        match fs::remove_file(self.bucket_dir().join(name)).await {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}
