//! Application state for Axum handlers.

use confab_backend::BackendClient;
use confab_cache::{CacheStore, InvalidationDispatcher};
use std::sync::Arc;

/// Shared application state.
///
/// Constructed once at startup and cloned into every handler; the cache
/// client and backend client are injected here rather than living in
/// module-level singletons.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CacheStore>,
    pub backend: Arc<dyn BackendClient>,
    pub dispatcher: Arc<InvalidationDispatcher>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(store: Arc<dyn CacheStore>, backend: Arc<dyn BackendClient>) -> Self {
        let dispatcher = Arc::new(InvalidationDispatcher::new(store.clone()));
        Self {
            store,
            backend,
            dispatcher,
        }
    }
}
