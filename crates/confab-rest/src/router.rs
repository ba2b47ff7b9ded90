//! Main application router.

use crate::{
    controllers::{
        conversation_controller, health_controller, invalidation_controller, room_controller,
        search_controller, social_controller, user_controller,
    },
    middleware::logging_middleware,
    state::AppState,
};
use axum::{middleware, routing::get, Router};
use confab_config::ServerConfig;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Creates the main application router.
pub fn create_router(state: AppState, server_config: &ServerConfig) -> Router {
    let cors = create_cors_layer(server_config);

    // Authenticated read endpoints
    let api_router = conversation_controller::router()
        .merge(room_controller::router())
        .merge(social_controller::router())
        .merge(search_controller::router())
        .merge(user_controller::router());

    let router = Router::new()
        // Health endpoint (no auth required)
        .merge(health_controller::router())
        // Invalidation webhook
        .merge(invalidation_controller::router())
        // API v1
        .nest("/api/v1", api_router)
        // Root endpoint
        .route("/", get(root))
        .with_state(state)
        // Add middleware layers
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware));

    info!("Router created with cached read endpoints and invalidation webhook");
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if server_config.cors_enabled {
        if server_config.cors_origins.contains(&"*".to_string()) {
            CorsLayer::permissive()
        } else {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    } else {
        CorsLayer::new()
    }
}

/// Root endpoint handler.
async fn root() -> &'static str {
    "Confab Cache API v1"
}
