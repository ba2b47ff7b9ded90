//! Backend client trait.

use async_trait::async_trait;
use confab_core::{AuthId, ConfabResult, ConversationId, MessageId, RoomId, UserId};
use serde_json::Value;

/// Read-only queries against the authoritative chat backend.
///
/// Every method is an idempotent read returning the backend's JSON payload
/// unmodified; the cache layer stores these values as-is. Implementations
/// must map a missing resource to `ConfabError::NotFound` and an unknown
/// auth id to `ConfabError::Unauthorized`.
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// Resolve an external auth id to the internal user profile.
    ///
    /// The returned object carries the internal user id under `"id"`.
    async fn resolve_identity(&self, auth_id: &AuthId) -> ConfabResult<Value>;

    /// A user's conversation list with last-message previews.
    async fn conversations(&self, user_id: &UserId) -> ConfabResult<Value>;

    /// One page of a conversation's messages. Page 0 is the newest.
    async fn message_page(
        &self,
        conversation_id: &ConversationId,
        page: u32,
    ) -> ConfabResult<Value>;

    /// Reactions on a single message.
    async fn message_reactions(&self, message_id: &MessageId) -> ConfabResult<Value>;

    /// A user's presence snapshot.
    async fn presence(&self, user_id: &UserId) -> ConfabResult<Value>;

    /// One room's details.
    async fn room(&self, room_id: &RoomId) -> ConfabResult<Value>;

    /// The public room directory.
    async fn public_rooms(&self) -> ConfabResult<Value>;

    /// Message search, optionally scoped to one conversation.
    ///
    /// Results are user-independent: the same query and scope return the
    /// same payload regardless of the caller, so cache entries keyed on
    /// query and scope alone can be shared across users.
    async fn search(&self, query: &str, scope: Option<&ConversationId>)
        -> ConfabResult<Value>;

    /// A user's story feed.
    async fn story_feed(&self, user_id: &UserId) -> ConfabResult<Value>;

    /// A user's friend list.
    async fn friend_list(&self, user_id: &UserId) -> ConfabResult<Value>;

    /// A user's pending friend requests.
    async fn friend_requests(&self, user_id: &UserId) -> ConfabResult<Value>;

    /// A user's support tickets.
    async fn support_tickets(&self, user_id: &UserId) -> ConfabResult<Value>;
}
