use api::api_state::ApiContext;
use api::serve_with_listener;
use app_state::{AppSettings, load_settings_from_path};
use color_eyre::eyre::{Result, eyre};
use common_services::Backend;
use common_services::database::InMemoryMetadataStore;
use common_services::storage::{InMemoryObjectStore, ObjectStore};
use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// The api served on a random local port, backed by in-memory stores the tests can inspect.
#[allow(dead_code)]
pub struct TestContext {
    pub settings: AppSettings,
    pub http_client: Client,
    pub metadata: Arc<InMemoryMetadataStore>,
    pub objects: Arc<InMemoryObjectStore>,
    // Private fields for cleanup on Drop
    legacy_dir: TempDir,
    api_handle: JoinHandle<()>,
}

impl TestContext {
    pub async fn new() -> Result<Self> {
        info!("Setting up test environment...");

        let settings_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("assets/settings.yaml")
            .canonicalize()?;
        let mut settings = load_settings_from_path(&settings_path, false)?;

        let listener = TcpListener::bind((settings.api.host.as_str(), 0)).await?;
        let addr = listener.local_addr()?;
        settings.api.port = u32::from(addr.port());
        settings.api.public_url = format!("http://{addr}");

        let legacy_dir = tempfile::tempdir()?;
        settings.legacy.memories_file = legacy_dir.path().join("data/memories.json");

        let metadata = Arc::new(InMemoryMetadataStore::new());
        let objects = Arc::new(InMemoryObjectStore::new(
            &settings.backend.bucket,
            &common_services::local_storage_url(&settings),
        ));
        let writer: Arc<dyn ObjectStore> = objects.clone();
        let backend = Backend::new(metadata.clone(), writer.clone(), Some(writer));

        let api_state = ApiContext::new(backend, settings.clone());
        let api_handle = tokio::spawn(async move {
            if let Err(e) = serve_with_listener(listener, api_state).await {
                error!("API server failed: {}", e);
            }
        });

        let http_client = Client::new();
        Self::wait_for_healthy_api(&settings, &http_client).await?;

        info!("Test environment is ready.");
        Ok(Self {
            settings,
            http_client,
            metadata,
            objects,
            legacy_dir,
            api_handle,
        })
    }

    /// Absolute url of an api path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        app_state::join_url(&self.settings.api.public_url, path)
    }

    async fn wait_for_healthy_api(settings: &AppSettings, http_client: &Client) -> Result<()> {
        let health_url = format!("{}/health", settings.api.public_url);
        for attempt in 1..=20 {
            match http_client.get(&health_url).send().await {
                Ok(response) if response.status().is_success() => return Ok(()),
                Ok(response) => warn!("Health check attempt {} got {}", attempt, response.status()),
                Err(e) => warn!("Health check attempt {} failed: {}", attempt, e),
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        Err(eyre!("API did not become healthy at {}", health_url))
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        self.api_handle.abort();
    }
}
