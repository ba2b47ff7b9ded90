//! Configuration loader with layered sources.

use crate::AppConfig;
use config::{Config, ConfigError, Environment, File};
use confab_core::ConfabError;
use std::path::Path;
use tracing::{debug, info};

/// Loads configuration from the default location (`./config`).
pub fn from_default_location() -> Result<AppConfig, ConfabError> {
    load("./config")
}

/// Loads configuration from the specified directory.
///
/// Sources are applied in order, later sources overriding earlier ones:
/// 1. `{dir}/default.toml`
/// 2. `{dir}/{environment}.toml`
/// 3. `{dir}/local.toml` (not committed to version control)
/// 4. Environment variables with the `CONFAB_` prefix (`__` separator)
pub fn load(config_dir: &str) -> Result<AppConfig, ConfabError> {
    // Load .env file if present
    if let Err(e) = dotenvy::dotenv() {
        debug!("No .env file found or error loading it: {}", e);
    }

    let environment =
        std::env::var("CONFAB_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

    info!("Loading configuration for environment: {}", environment);

    let mut builder = Config::builder();

    let default_path = format!("{}/default.toml", config_dir);
    if Path::new(&default_path).exists() {
        debug!("Loading default config from: {}", default_path);
        builder = builder.add_source(File::with_name(&default_path).required(false));
    }

    let env_path = format!("{}/{}.toml", config_dir, environment);
    if Path::new(&env_path).exists() {
        debug!("Loading environment config from: {}", env_path);
        builder = builder.add_source(File::with_name(&env_path).required(false));
    }

    let local_path = format!("{}/local.toml", config_dir);
    if Path::new(&local_path).exists() {
        debug!("Loading local config from: {}", local_path);
        builder = builder.add_source(File::with_name(&local_path).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("CONFAB")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build().map_err(config_error)?;

    let app_config: AppConfig = config.try_deserialize().map_err(config_error)?;

    validate(&app_config)?;

    Ok(app_config)
}

/// Validates the configuration.
fn validate(config: &AppConfig) -> Result<(), ConfabError> {
    if config.backend.base_url.is_empty() {
        return Err(ConfabError::Configuration(
            "Backend base URL is required".to_string(),
        ));
    }

    if config.redis.enabled && config.redis.url.is_empty() {
        return Err(ConfabError::Configuration(
            "Redis URL is required when the cache store is enabled".to_string(),
        ));
    }

    Ok(())
}

fn config_error(err: ConfigError) -> ConfabError {
    ConfabError::Configuration(err.to_string())
}
