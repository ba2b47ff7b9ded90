//! Event-driven cache invalidation.
//!
//! Each domain event maps to a fixed set of cache-key deletions. The
//! mapping itself is the pure function [`keys_for`]; the dispatcher only
//! walks that list and deletes. Handlers never read-modify-write any other
//! state, and deletion of an absent key is a no-op, so dispatch is
//! idempotent.

use crate::keys;
use crate::store::CacheStore;
use confab_core::ChatEvent;
use std::sync::Arc;
use tracing::{debug, warn};

/// Returns the cache keys a given event invalidates, in deletion order.
#[must_use]
pub fn keys_for(event: &ChatEvent) -> Vec<String> {
    match event {
        // A new message changes the newest page, every member's unread
        // counter, and every member's conversation-list preview.
        ChatEvent::MessageSent {
            conversation_id,
            sender_id: _,
            member_ids,
        } => {
            let mut out = vec![keys::message_page(conversation_id, 0)];
            out.extend(
                member_ids
                    .iter()
                    .map(|m| keys::unread_count(m, conversation_id)),
            );
            out.extend(member_ids.iter().map(keys::conversation_list));
            out
        }

        ChatEvent::MessageRead {
            user_id,
            conversation_id,
        } => vec![keys::unread_count(user_id, conversation_id)],

        ChatEvent::MessageReaction {
            message_id,
            conversation_id,
        } => vec![
            keys::message_reactions(message_id),
            keys::message_page(conversation_id, 0),
        ],

        ChatEvent::FriendRequestSent {
            from_user_id,
            to_user_id,
        } => vec![
            keys::friend_requests(from_user_id),
            keys::friend_requests(to_user_id),
        ],

        ChatEvent::FriendRequestAccepted { user_id, friend_id } => vec![
            keys::friend_list(user_id),
            keys::friend_list(friend_id),
            keys::friend_requests(user_id),
            keys::friend_requests(friend_id),
        ],

        ChatEvent::ConversationMemberChange {
            conversation_id,
            member_ids,
        } => {
            let mut out: Vec<String> = member_ids.iter().map(keys::conversation_list).collect();
            out.push(keys::message_page(conversation_id, 0));
            out
        }

        ChatEvent::PresenceHeartbeat { user_id } => vec![keys::presence(user_id)],

        ChatEvent::StoryCreated {
            author_id,
            friend_ids,
        } => {
            let mut out: Vec<String> = friend_ids.iter().map(keys::story_feed).collect();
            out.push(keys::story_feed(author_id));
            out
        }

        ChatEvent::RoomUserJoin { room_id, is_public }
        | ChatEvent::RoomUserLeave { room_id, is_public } => {
            let mut out = vec![keys::room_details(room_id)];
            if *is_public {
                out.push(keys::public_rooms());
            }
            out
        }

        ChatEvent::ProfileUpdated { user_id, auth_id } => {
            vec![keys::identity(auth_id), keys::presence(user_id)]
        }

        ChatEvent::SupportTicketUpdated { user_id } => vec![keys::support_tickets(user_id)],
    }
}

/// Fans domain events out to cache-key deletions.
pub struct InvalidationDispatcher {
    store: Arc<dyn CacheStore>,
}

impl InvalidationDispatcher {
    /// Creates a dispatcher over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Deletes every key the event invalidates.
    ///
    /// Deletion errors are logged and swallowed: invalidation runs on the
    /// caller's critical path (e.g. a message-send mutation) and must never
    /// fail it. Keys left behind by a failed delete expire via their
    /// namespace TTL. Returns the number of keys actually deleted.
    pub async fn dispatch(&self, event: &ChatEvent) -> usize {
        let keys = keys_for(event);
        let mut deleted = 0;

        for key in &keys {
            match self.store.delete(key).await {
                Ok(true) => deleted += 1,
                Ok(false) => {}
                Err(e) => {
                    warn!(
                        event = event.type_name(),
                        key,
                        error = %e,
                        "cache invalidation failed, entry will expire via TTL"
                    );
                }
            }
        }

        debug!(
            event = event.type_name(),
            keys = keys.len(),
            deleted,
            "dispatched invalidation event"
        );
        deleted
    }
}
