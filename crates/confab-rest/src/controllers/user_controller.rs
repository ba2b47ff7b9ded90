//! Current-user and support endpoints.

use crate::{
    extractors::CurrentUser,
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{extract::State, routing::get, Router};
use confab_cache::{keys, CacheStoreExt, Namespace};
use serde_json::Value;
use tracing::debug;

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/user/current", get(current_user))
        .route("/support", get(support_tickets))
}

/// The caller's resolved profile.
///
/// The profile was already fetched (through the identity cache) during
/// extraction, so this endpoint never issues a second backend query.
async fn current_user(user: CurrentUser) -> ApiResult<Value> {
    debug!("Current user {}", user.user_id);
    ok(user.profile)
}

/// The caller's support tickets.
async fn support_tickets(State(state): State<AppState>, user: CurrentUser) -> ApiResult<Value> {
    debug!("Support tickets for {}", user.user_id);

    let key = keys::support_tickets(&user.user_id);
    let backend = state.backend.clone();
    let user_id = user.user_id.clone();

    let value = state
        .store
        .get_or_set(&key, Namespace::Support.ttl(), || async move {
            backend.support_tickets(&user_id).await
        })
        .await?;
    ok(value)
}
