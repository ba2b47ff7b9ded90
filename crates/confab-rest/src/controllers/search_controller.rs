//! Message search endpoint.

use crate::{
    extractors::CurrentUser,
    responses::{ok, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Query, State},
    routing::get,
    Router,
};
use confab_cache::{keys, CacheStoreExt, Namespace};
use confab_core::{ConfabError, ConversationId};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Creates the search router.
pub fn router() -> Router<AppState> {
    Router::new().route("/search", get(search))
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
    conversation: Option<String>,
}

/// Message search, optionally scoped to one conversation.
///
/// The cache key is built from the normalized query text plus the scope,
/// so identical searches hit and distinct searches never collide. The
/// backend query carries no caller identity, matching the key: cached
/// results are shared across users.
async fn search(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Value> {
    if query.q.trim().is_empty() {
        return Err(AppError(ConfabError::validation(
            "Query parameter 'q' is required",
        )));
    }

    debug!("Search '{}' for {}", query.q, user.user_id);

    let scope = query.conversation.map(ConversationId::new);
    let key = keys::search(&query.q, scope.as_ref());
    let backend = state.backend.clone();
    let q = query.q.clone();

    let value = state
        .store
        .get_or_set(&key, Namespace::Search.ttl(), || async move {
            backend.search(&q, scope.as_ref()).await
        })
        .await?;
    ok(value)
}
