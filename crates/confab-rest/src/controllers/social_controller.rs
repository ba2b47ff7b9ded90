//! Presence, story, and friend read endpoints.

use crate::{
    extractors::CurrentUser,
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use confab_cache::{keys, CacheStoreExt, Namespace};
use confab_core::UserId;
use serde_json::Value;
use tracing::debug;

/// Creates the social router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/presence/:user_id", get(presence))
        .route("/stories", get(story_feed))
        .route("/friends", get(friend_list))
        .route("/friends/requests", get(friend_requests))
}

/// Presence snapshot of any user.
async fn presence(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(user_id): Path<String>,
) -> ApiResult<Value> {
    debug!("Presence for {}", user_id);

    let target = UserId::new(user_id);
    let key = keys::presence(&target);
    let backend = state.backend.clone();

    let value = state
        .store
        .get_or_set(&key, Namespace::Presence.ttl(), || async move {
            backend.presence(&target).await
        })
        .await?;
    ok(value)
}

/// The caller's story feed.
async fn story_feed(State(state): State<AppState>, user: CurrentUser) -> ApiResult<Value> {
    debug!("Story feed for {}", user.user_id);

    let key = keys::story_feed(&user.user_id);
    let backend = state.backend.clone();
    let user_id = user.user_id.clone();

    let value = state
        .store
        .get_or_set(&key, Namespace::Stories.ttl(), || async move {
            backend.story_feed(&user_id).await
        })
        .await?;
    ok(value)
}

/// The caller's friend list.
async fn friend_list(State(state): State<AppState>, user: CurrentUser) -> ApiResult<Value> {
    debug!("Friend list for {}", user.user_id);

    let key = keys::friend_list(&user.user_id);
    let backend = state.backend.clone();
    let user_id = user.user_id.clone();

    let value = state
        .store
        .get_or_set(&key, Namespace::Friends.ttl(), || async move {
            backend.friend_list(&user_id).await
        })
        .await?;
    ok(value)
}

/// The caller's pending friend requests.
async fn friend_requests(State(state): State<AppState>, user: CurrentUser) -> ApiResult<Value> {
    debug!("Friend requests for {}", user.user_id);

    let key = keys::friend_requests(&user.user_id);
    let backend = state.backend.clone();
    let user_id = user.user_id.clone();

    let value = state
        .store
        .get_or_set(&key, Namespace::FriendRequests.ttl(), || async move {
            backend.friend_requests(&user_id).await
        })
        .await?;
    ok(value)
}
