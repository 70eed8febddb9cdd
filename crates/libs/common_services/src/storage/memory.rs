use crate::storage::{
    ObjectStore, PutOptions, StorageError, StoredObject, public_object_url, validate_object_name,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// A bucket held in process memory.
///
/// Mainly a test double: the bucket can be dropped to reproduce the missing-bucket path.
pub struct InMemoryObjectStore {
    bucket: String,
    public_base_url: String,
    objects: RwLock<HashMap<String, StoredObject>>,
    bucket_exists: AtomicBool,
}

impl InMemoryObjectStore {
    #[must_use]
    pub fn new(bucket: &str, public_base_url: &str) -> Self {
        Self {
            bucket: bucket.to_owned(),
            public_base_url: public_base_url.to_owned(),
            objects: RwLock::new(HashMap::new()),
            bucket_exists: AtomicBool::new(true),
        }
    }

    pub fn set_bucket_exists(&self, exists: bool) {
        self.bucket_exists.store(exists, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }

    pub async fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.objects.read().await.keys().cloned().collect();
        names.sort();
        names
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
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
        if !self.bucket_exists.load(Ordering::SeqCst) {
            return Err(StorageError::BucketNotFound {
                bucket: self.bucket.clone(),
                details: "Bucket not found".to_owned(),
            });
        }
        let mut objects = self.objects.write().await;
        if !options.upsert && objects.contains_key(name) {
            return Err(StorageError::AlreadyExists(name.to_owned()));
        }
        objects.insert(name.to_owned(), object);
        Ok(())
    }

    async fn get(&self, name: &str) -> Result<Option<StoredObject>, StorageError> {
        Ok(self.objects.read().await.get(name).cloned())
    }

    async fn remove(&self, name: &str) -> Result<(), StorageError> {
        self.objects.write().await.remove(name);
        Ok(())
    }
}
