//! Conversation and message read endpoints.

use crate::{
    extractors::CurrentUser,
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Router,
};
use confab_cache::{keys, CacheStoreExt, Namespace};
use confab_core::{ConversationId, MessageId};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Creates the conversation router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/conversations", get(list_conversations))
        .route("/conversations/:id/messages", get(message_page))
        .route("/messages/:id/reactions", get(message_reactions))
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    #[serde(default)]
    page: u32,
}

/// The caller's conversation list with last-message previews.
async fn list_conversations(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Value> {
    debug!("List conversations for {}", user.user_id);

    let key = keys::conversation_list(&user.user_id);
    let backend = state.backend.clone();
    let user_id = user.user_id.clone();

    let value = state
        .store
        .get_or_set(&key, Namespace::Conversations.ttl(), || async move {
            backend.conversations(&user_id).await
        })
        .await?;
    ok(value)
}

/// One page of a conversation's messages. Page 0 is the newest.
async fn message_page(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Value> {
    debug!("Message page {} for conversation {}", query.page, id);

    let conversation_id = ConversationId::new(id);
    let key = keys::message_page(&conversation_id, query.page);
    let backend = state.backend.clone();
    let page = query.page;

    let value = state
        .store
        .get_or_set(&key, Namespace::Messages.ttl(), || async move {
            backend.message_page(&conversation_id, page).await
        })
        .await?;
    ok(value)
}

/// Reactions on a single message.
async fn message_reactions(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    debug!("Reactions for message {}", id);

    let message_id = MessageId::new(id);
    let key = keys::message_reactions(&message_id);
    let backend = state.backend.clone();

    let value = state
        .store
        .get_or_set(&key, Namespace::Reactions.ttl(), || async move {
            backend.message_reactions(&message_id).await
        })
        .await?;
    ok(value)
}
