//! Typed ID wrappers for domain entities.
//!
//! All identifiers are opaque strings minted by the external backend or the
//! identity provider; the wrappers only prevent mixing them up in cache-key
//! construction.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Creates a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the ID as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

string_id!(
    /// A strongly-typed wrapper for user IDs.
    UserId
);
string_id!(
    /// A strongly-typed wrapper for conversation IDs.
    ConversationId
);
string_id!(
    /// A strongly-typed wrapper for room IDs.
    RoomId
);
string_id!(
    /// A strongly-typed wrapper for message IDs.
    MessageId
);
string_id!(
    /// A strongly-typed wrapper for story IDs.
    StoryId
);
string_id!(
    /// The caller's ID at the external identity provider.
    AuthId
);
