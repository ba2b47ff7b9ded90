//! Per-namespace TTL policy table.

use std::time::Duration;

/// Cache-key namespaces, one per domain concept.
///
/// Every key produced by the [`crate::keys`] registry starts with exactly
/// one of these namespaces, and all keys in a namespace share the same TTL.
/// The exhaustive `match` in [`Namespace::ttl`] is the policy table: a new
/// namespace cannot be added without assigning it a TTL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Per-user conversation lists.
    Conversations,
    /// Message pages within a conversation.
    Messages,
    /// Reactions on a single message.
    Reactions,
    /// Per-user per-conversation unread counters.
    Unread,
    /// Per-user presence snapshots.
    Presence,
    /// Room details.
    Rooms,
    /// The public room directory.
    PublicRooms,
    /// Per-user friend lists.
    Friends,
    /// Per-user pending friend requests.
    FriendRequests,
    /// Per-user story feeds.
    Stories,
    /// Per-user support tickets.
    Support,
    /// Search results.
    Search,
    /// Identity lookups keyed by external auth id.
    Identity,
}

impl Namespace {
    /// Returns the key segment for this namespace.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Conversations => "conversations",
            Self::Messages => "messages",
            Self::Reactions => "reactions",
            Self::Unread => "unread",
            Self::Presence => "presence",
            Self::Rooms => "rooms",
            Self::PublicRooms => "rooms:public",
            Self::Friends => "friends",
            Self::FriendRequests => "friend-requests",
            Self::Stories => "stories",
            Self::Support => "support",
            Self::Search => "search",
            Self::Identity => "identity",
        }
    }

    /// Returns the time-to-live applied to every key in this namespace.
    ///
    /// Presence is near-real-time; message pages and counters turn over
    /// quickly; lists that only change through invalidation events can sit
    /// for a week and still stay fresh.
    #[must_use]
    pub const fn ttl(self) -> Duration {
        match self {
            Self::Presence => Duration::from_secs(45),
            Self::Messages | Self::Reactions => Duration::from_secs(180),
            Self::Unread => Duration::from_secs(300),
            Self::PublicRooms => Duration::from_secs(600),
            Self::Rooms | Self::Stories | Self::Support | Self::Identity => {
                Duration::from_secs(3600)
            }
            Self::Conversations | Self::Friends | Self::FriendRequests | Self::Search => {
                Duration::from_secs(7 * 24 * 3600)
            }
        }
    }
}
