//! Platform snowflake identifiers.
//!
//! Thin `u64` newtypes so a channel id can never be passed where a role id
//! is expected. They serialize transparently as integers.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

macro_rules! snowflake {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            #[must_use]
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<u64>()
                    .map(Self)
                    .map_err(|_| Error::invalid_id($kind, s))
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }
    };
}

snowflake!(
    /// A guild (server) id.
    GuildId,
    "guild"
);
snowflake!(
    /// A text channel id.
    ChannelId,
    "channel"
);
snowflake!(
    /// A user id. Guild members share the id of their user.
    UserId,
    "user"
);
snowflake!(
    /// A message id.
    MessageId,
    "message"
);
snowflake!(
    /// A custom guild emoji id.
    EmojiId,
    "emoji"
);
snowflake!(RoleId, "role");
