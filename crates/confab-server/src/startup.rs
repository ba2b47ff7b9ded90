//! Application state wiring.

use confab_backend::HttpBackendClient;
use confab_cache::{CacheStore, RedisCacheStore};
use confab_config::AppConfig;
use confab_core::{ConfabError, ConfabResult};
use confab_rest::AppState;
use deadpool_redis::{Config as RedisPoolConfig, Runtime};
use std::sync::Arc;
use tracing::{info, warn};

/// Builds the shared application state from configuration.
///
/// The cache client is constructed exactly once here and injected through
/// `AppState`; nothing else in the process holds a cache connection.
pub fn build_state(config: &AppConfig) -> ConfabResult<AppState> {
    let store: Arc<dyn CacheStore> = if config.redis.enabled {
        let mut pool_config = RedisPoolConfig::from_url(&config.redis.url);
        pool_config.pool = Some(deadpool_redis::PoolConfig::new(config.redis.pool_max_size));

        let pool = pool_config
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| ConfabError::Configuration(format!("Invalid Redis config: {}", e)))?;

        info!("Redis cache store enabled at {}", config.redis.url);
        Arc::new(RedisCacheStore::new(Arc::new(pool)))
    } else {
        warn!("Redis disabled; every read will go to the backend");
        Arc::new(RedisCacheStore::disabled())
    };

    let backend = HttpBackendClient::new(
        &config.backend.base_url,
        config.backend.request_timeout(),
    )?;

    info!("Backend client targeting {}", config.backend.base_url);

    Ok(AppState::new(store, Arc::new(backend)))
}
