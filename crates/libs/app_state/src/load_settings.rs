use crate::{AppSettings, RawSettings};
use color_eyre::eyre::Result;
use std::path::Path;
use tracing::debug;

/// Load settings from `config/settings.yaml`, `.env` and `APP__` environment variables.
pub fn load_app_settings() -> Result<AppSettings> {
    // Need to load from dotenv to get it to overwrite values from env.
    dotenv::from_path(".env").ok();
    let config_path = Path::new("config/settings.yaml").canonicalize()?;
    load_settings_from_path(&config_path, true)
}

/// Load settings from a specific yaml file, optionally layering `APP__` environment variables on top.
pub fn load_settings_from_path(config_path: &Path, use_env: bool) -> Result<AppSettings> {
    debug!("Loading settings from {}", config_path.display());
    let mut builder =
        config::Config::builder().add_source(config::File::from(config_path.to_path_buf()));

    if use_env {
        builder = builder.add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        );
    }

    let raw_settings = builder.build()?.try_deserialize::<RawSettings>()?;
    Ok(raw_settings.into())
}
