use crate::database::{InMemoryMetadataStore, MetadataStore, PgMetadataStore, get_db_pool};
use crate::storage::{InMemoryObjectStore, LocalObjectStore, ObjectStore, SupabaseStorage};
use app_state::{AppSettings, MetadataKind, StorageKind, join_url};
use color_eyre::Result;
use color_eyre::eyre::eyre;
use reqwest::Client;
use std::sync::Arc;
use tracing::{info, warn};

/// Everything a request needs to reach the metadata tables and the bucket.
#[derive(Clone)]
pub struct Backend {
    pub metadata: Arc<dyn MetadataStore>,
    /// Read access, used to build public urls.
    pub objects: Arc<dyn ObjectStore>,
    /// Write access. `None` when no credentials for writing are configured.
    pub privileged_objects: Option<Arc<dyn ObjectStore>>,
}

impl Backend {
    #[must_use]
    pub fn new(
        metadata: Arc<dyn MetadataStore>,
        objects: Arc<dyn ObjectStore>,
        privileged_objects: Option<Arc<dyn ObjectStore>>,
    ) -> Self {
        Self {
            metadata,
            objects,
            privileged_objects,
        }
    }

    /// A backend that keeps everything in memory, with write access.
    #[must_use]
    pub fn in_memory(bucket: &str, public_base_url: &str) -> Self {
        let objects: Arc<dyn ObjectStore> =
            Arc::new(InMemoryObjectStore::new(bucket, public_base_url));
        Self::new(
            Arc::new(InMemoryMetadataStore::new()),
            objects.clone(),
            Some(objects),
        )
    }
}

/// Public url the local object store is served at.
#[must_use]
pub fn local_storage_url(settings: &AppSettings) -> String {
    join_url(&settings.api.public_url, "storage")
}

/// Connect the configured metadata store and object store.
pub async fn build_backend(settings: &AppSettings) -> Result<Backend> {
    let backend_settings = &settings.backend;

    let metadata: Arc<dyn MetadataStore> = match backend_settings.metadata {
        MetadataKind::Postgres => {
            let pool =
                get_db_pool(&backend_settings.database_url, &settings.constants.database).await?;
            Arc::new(PgMetadataStore::new(pool))
        }
        MetadataKind::Memory => {
            warn!("Using in-memory metadata store, nothing will be persisted.");
            Arc::new(InMemoryMetadataStore::new())
        }
    };

    let (objects, privileged_objects): (Arc<dyn ObjectStore>, Option<Arc<dyn ObjectStore>>) =
        match backend_settings.storage {
            StorageKind::Supabase => {
                if backend_settings.url.is_empty() {
                    return Err(eyre!("backend.url must be set when storage is supabase"));
                }
                let http_client = Client::new();
                let public = Arc::new(SupabaseStorage::new(
                    http_client.clone(),
                    &backend_settings.url,
                    &backend_settings.bucket,
                    &backend_settings.anon_key,
                ));
                let privileged = backend_settings.service_role_key.as_ref().map(|key| {
                    Arc::new(SupabaseStorage::new(
                        http_client,
                        &backend_settings.url,
                        &backend_settings.bucket,
                        key,
                    )) as Arc<dyn ObjectStore>
                });
                if privileged.is_none() {
                    warn!("No service role key configured, uploads will be refused.");
                }
                (public, privileged)
            }
            StorageKind::Local => {
                let store = LocalObjectStore::new(
                    &backend_settings.local_storage_folder,
                    &backend_settings.bucket,
                    &local_storage_url(settings),
                );
                store.create_bucket().await?;
                info!(
                    "Storing uploads in {}",
                    backend_settings.local_storage_folder.display()
                );
                let store: Arc<dyn ObjectStore> = Arc::new(store);
                (store.clone(), Some(store))
            }
            StorageKind::Memory => {
                warn!("Using in-memory object store, nothing will be persisted.");
                let store: Arc<dyn ObjectStore> = Arc::new(InMemoryObjectStore::new(
                    &backend_settings.bucket,
                    &local_storage_url(settings),
                ));
                (store.clone(), Some(store))
            }
        };

    Ok(Backend::new(metadata, objects, privileged_objects))
}
