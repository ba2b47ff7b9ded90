//! Cache key generators for consistent key naming.
//!
//! Every key is a pure function of its inputs: identical parameters always
//! produce the identical string, and distinct domain concepts live under
//! distinct [`Namespace`] prefixes so they can never collide.

use crate::ttl::Namespace;
use confab_core::{AuthId, ConversationId, MessageId, RoomId, UserId};

/// Prefix for all cache keys to namespace them.
const CACHE_PREFIX: &str = "confab:cache";

fn key(ns: Namespace, rest: &str) -> String {
    format!("{}:{}:{}", CACHE_PREFIX, ns.as_str(), rest)
}

/// Key for a user's conversation list.
#[must_use]
pub fn conversation_list(user_id: &UserId) -> String {
    key(Namespace::Conversations, user_id.as_str())
}

/// Key for one page of a conversation's messages. Page 0 is the newest.
#[must_use]
pub fn message_page(conversation_id: &ConversationId, page: u32) -> String {
    key(
        Namespace::Messages,
        &format!("{}:page:{}", conversation_id, page),
    )
}

/// Key for the reactions on a single message.
#[must_use]
pub fn message_reactions(message_id: &MessageId) -> String {
    key(Namespace::Reactions, message_id.as_str())
}

/// Key for a user's unread counter in one conversation.
#[must_use]
pub fn unread_count(user_id: &UserId, conversation_id: &ConversationId) -> String {
    key(
        Namespace::Unread,
        &format!("{}:{}", user_id, conversation_id),
    )
}

/// Key for a user's presence snapshot.
#[must_use]
pub fn presence(user_id: &UserId) -> String {
    key(Namespace::Presence, user_id.as_str())
}

/// Key for one room's details.
#[must_use]
pub fn room_details(room_id: &RoomId) -> String {
    key(Namespace::Rooms, &format!("id:{}", room_id))
}

/// Key for the public room directory.
#[must_use]
pub fn public_rooms() -> String {
    format!("{}:{}", CACHE_PREFIX, Namespace::PublicRooms.as_str())
}

/// Key for a user's friend list.
#[must_use]
pub fn friend_list(user_id: &UserId) -> String {
    key(Namespace::Friends, user_id.as_str())
}

/// Key for a user's pending friend requests.
#[must_use]
pub fn friend_requests(user_id: &UserId) -> String {
    key(Namespace::FriendRequests, user_id.as_str())
}

/// Key for a user's story feed.
#[must_use]
pub fn story_feed(user_id: &UserId) -> String {
    key(Namespace::Stories, &format!("feed:{}", user_id))
}

/// Key for a user's support tickets.
#[must_use]
pub fn support_tickets(user_id: &UserId) -> String {
    key(Namespace::Support, user_id.as_str())
}

/// Key for a search, optionally scoped to one conversation.
///
/// The query is normalized (trimmed, lowercased, internal whitespace
/// collapsed) so that trivially different spellings of the same search hit
/// the same entry. The scope segment precedes the query text so a global
/// query can never collide with a scoped one.
#[must_use]
pub fn search(query: &str, scope: Option<&ConversationId>) -> String {
    let normalized = normalize_query(query);
    match scope {
        Some(conversation_id) => key(
            Namespace::Search,
            &format!("conv:{}:q:{}", conversation_id, normalized),
        ),
        None => key(Namespace::Search, &format!("global:q:{}", normalized)),
    }
}

/// Key for the identity lookup of an external auth id.
#[must_use]
pub fn identity(auth_id: &AuthId) -> String {
    key(Namespace::Identity, auth_id.as_str())
}

fn normalize_query(query: &str) -> String {
    query
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_page_determinism() {
        let c1 = ConversationId::new("c1");
        let c2 = ConversationId::new("c2");
        assert_eq!(message_page(&c1, 0), message_page(&c1, 0));
        assert_ne!(message_page(&c1, 0), message_page(&c1, 1));
        assert_ne!(message_page(&c1, 0), message_page(&c2, 0));
    }

    #[test]
    fn test_key_shapes() {
        let user = UserId::new("u1");
        let conv = ConversationId::new("c1");
        assert_eq!(
            conversation_list(&user),
            "confab:cache:conversations:u1"
        );
        assert_eq!(message_page(&conv, 0), "confab:cache:messages:c1:page:0");
        assert_eq!(unread_count(&user, &conv), "confab:cache:unread:u1:c1");
        assert_eq!(presence(&user), "confab:cache:presence:u1");
    }

    #[test]
    fn test_room_details_never_collides_with_public_directory() {
        let room = RoomId::new("public");
        assert_ne!(room_details(&room), public_rooms());
        assert_eq!(public_rooms(), "confab:cache:rooms:public");
    }

    #[test]
    fn test_search_normalization() {
        assert_eq!(
            search("  Hello   World ", None),
            search("hello world", None)
        );
    }

    #[test]
    fn test_search_scope_separates_keys() {
        let conv = ConversationId::new("c1");
        assert_ne!(search("hello", None), search("hello", Some(&conv)));
        // A global query that happens to contain scope-like text must not
        // collide with a genuinely scoped query.
        assert_ne!(search("conv:c1:q:hello", None), search("hello", Some(&conv)));
    }

    #[test]
    fn test_distinct_concepts_use_distinct_prefixes() {
        let user = UserId::new("x");
        assert_ne!(friend_list(&user), friend_requests(&user));
        assert_ne!(friend_list(&user), story_feed(&user));
        assert_ne!(support_tickets(&user), presence(&user));
    }
}
