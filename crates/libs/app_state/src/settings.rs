use crate::{
    AdminSettings, ApiSettings, AppConstants, MetadataKind, RawSettings, SecretSettings,
    StorageKind,
};
use serde::Deserialize;
use std::path::{PathBuf, absolute};

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub api: ApiSettings,
    pub backend: BackendSettings,
    pub admin: AdminSettings,
    pub secrets: SecretSettings,
    pub legacy: LegacySettings,
    pub constants: AppConstants,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    pub storage: StorageKind,
    pub metadata: MetadataKind,
    pub url: String,
    pub anon_key: String,
    pub service_role_key: Option<String>,
    pub bucket: String,
    pub database_url: String,
    pub local_storage_folder: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LegacySettings {
    pub memories_file: PathBuf,
}

impl From<RawSettings> for AppSettings {
    fn from(raw: RawSettings) -> Self {
        let local_storage_folder = absolute(&raw.backend.local_storage_folder)
            .unwrap_or(raw.backend.local_storage_folder);
        let memories_file =
            absolute(&raw.legacy.memories_file).unwrap_or(raw.legacy.memories_file);
        let service_role_key = Some(raw.backend.service_role_key.trim().to_owned())
            .filter(|key| !key.is_empty());

        Self {
            api: raw.api,
            backend: BackendSettings {
                storage: raw.backend.storage,
                metadata: raw.backend.metadata,
                url: raw.backend.url,
                anon_key: raw.backend.anon_key,
                service_role_key,
                bucket: raw.backend.bucket,
                database_url: raw.backend.database_url,
                local_storage_folder,
            },
            admin: raw.admin,
            secrets: raw.secrets,
            legacy: LegacySettings { memories_file },
            constants: raw.constants,
        }
    }
}

impl BackendSettings {
    /// Whether uploads can be performed at all.
    #[must_use]
    pub fn has_write_credentials(&self) -> bool {
        match self.storage {
            StorageKind::Supabase => self.service_role_key.is_some() && !self.url.is_empty(),
            StorageKind::Local | StorageKind::Memory => true,
        }
    }
}
