use crate::AppConstants;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct RawSettings {
    pub api: ApiSettings,
    pub backend: RawBackendSettings,
    pub admin: AdminSettings,
    pub secrets: SecretSettings,
    pub legacy: RawLegacySettings,
    pub constants: AppConstants,
}

/// Configuration for the API server.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub host: String,
    pub port: u32,
    pub allowed_origins: Vec<String>,
    pub public_url: String,
    /// Upper bound for a single multipart upload body.
    pub max_upload_bytes: usize,
}

/// Where uploaded objects end up.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// Supabase-compatible storage REST API.
    Supabase,
    /// A folder on disk, served back under `/storage`.
    Local,
    /// Process memory. Contents vanish on restart.
    Memory,
}

/// Where photo and music metadata rows live.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MetadataKind {
    Postgres,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawBackendSettings {
    pub storage: StorageKind,
    pub metadata: MetadataKind,
    /// Public base url of the storage backend, e.g. `https://xyz.supabase.co`.
    #[serde(default)]
    pub url: String,
    /// Public anonymous key, used for reads.
    #[serde(default)]
    pub anon_key: String,
    /// Server-only privileged key, used solely by the upload route.
    #[serde(default)]
    pub service_role_key: String,
    pub bucket: String,
    #[serde(default)]
    pub database_url: String,
    pub local_storage_folder: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AdminSettings {
    pub password: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SecretSettings {
    pub jwt: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawLegacySettings {
    pub memories_file: PathBuf,
}
