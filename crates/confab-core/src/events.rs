//! Domain events that drive cache invalidation.
//!
//! The set of events is closed: the invalidation dispatcher matches
//! exhaustively over `ChatEvent`, so adding a variant forces every handler
//! to be updated. Events are ephemeral: constructed by the webhook (or a
//! mutation path), consumed once, never persisted.

use crate::{AuthId, ConversationId, MessageId, RoomId, UserId};
use serde::{Deserialize, Serialize};

/// A domain event received from the backend, tagged on the wire by its
/// `type` field (e.g. `{"type": "message.sent", ...}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ChatEvent {
    /// A message was posted to a conversation.
    #[serde(rename = "message.sent")]
    MessageSent {
        conversation_id: ConversationId,
        sender_id: UserId,
        member_ids: Vec<UserId>,
    },

    /// A user read a conversation up to the latest message.
    #[serde(rename = "message.read")]
    MessageRead {
        user_id: UserId,
        conversation_id: ConversationId,
    },

    /// A reaction was added to or removed from a message.
    #[serde(rename = "message.reaction")]
    MessageReaction {
        message_id: MessageId,
        conversation_id: ConversationId,
    },

    /// A friend request was created.
    #[serde(rename = "friend.request.sent")]
    FriendRequestSent {
        from_user_id: UserId,
        to_user_id: UserId,
    },

    /// A friend request was accepted.
    #[serde(rename = "friend.request.accepted")]
    FriendRequestAccepted { user_id: UserId, friend_id: UserId },

    /// Members were added to or removed from a conversation.
    #[serde(rename = "conversation.member.change")]
    ConversationMemberChange {
        conversation_id: ConversationId,
        member_ids: Vec<UserId>,
    },

    /// A user's presence heartbeat arrived.
    #[serde(rename = "presence.heartbeat")]
    PresenceHeartbeat { user_id: UserId },

    /// A user published a story.
    #[serde(rename = "story.created")]
    StoryCreated {
        author_id: UserId,
        friend_ids: Vec<UserId>,
    },

    /// A user joined a room.
    #[serde(rename = "room.user.join")]
    RoomUserJoin { room_id: RoomId, is_public: bool },

    /// A user left a room.
    #[serde(rename = "room.user.leave")]
    RoomUserLeave { room_id: RoomId, is_public: bool },

    /// A user's profile changed at the identity provider.
    #[serde(rename = "profile.updated")]
    ProfileUpdated { user_id: UserId, auth_id: AuthId },

    /// A support ticket was created or updated.
    #[serde(rename = "support.ticket.updated")]
    SupportTicketUpdated { user_id: UserId },
}

impl ChatEvent {
    /// Returns the wire name of the event type.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::MessageSent { .. } => "message.sent",
            Self::MessageRead { .. } => "message.read",
            Self::MessageReaction { .. } => "message.reaction",
            Self::FriendRequestSent { .. } => "friend.request.sent",
            Self::FriendRequestAccepted { .. } => "friend.request.accepted",
            Self::ConversationMemberChange { .. } => "conversation.member.change",
            Self::PresenceHeartbeat { .. } => "presence.heartbeat",
            Self::StoryCreated { .. } => "story.created",
            Self::RoomUserJoin { .. } => "room.user.join",
            Self::RoomUserLeave { .. } => "room.user.leave",
            Self::ProfileUpdated { .. } => "profile.updated",
            Self::SupportTicketUpdated { .. } => "support.ticket.updated",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_message_sent() {
        let event: ChatEvent = serde_json::from_value(json!({
            "type": "message.sent",
            "conversation_id": "c1",
            "sender_id": "u1",
            "member_ids": ["u1", "u2"],
        }))
        .unwrap();

        assert_eq!(event.type_name(), "message.sent");
        match event {
            ChatEvent::MessageSent {
                conversation_id,
                sender_id,
                member_ids,
            } => {
                assert_eq!(conversation_id.as_str(), "c1");
                assert_eq!(sender_id.as_str(), "u1");
                assert_eq!(member_ids.len(), 2);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let result = serde_json::from_value::<ChatEvent>(json!({
            "type": "unknown.event",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_includes_type_tag() {
        let event = ChatEvent::PresenceHeartbeat {
            user_id: UserId::new("u9"),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "presence.heartbeat");
        assert_eq!(value["user_id"], "u9");
    }
}
