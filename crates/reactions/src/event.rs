use std::fmt;

use minilla_common::{ChannelId, EmojiId, GuildId, MessageId, UserId};

/// The emoji on a reaction event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionEmoji {
    /// Custom emoji name, or the Unicode emoji itself.
    pub name: String,
    /// Set for custom guild emoji only.
    pub id: Option<EmojiId>,
    pub animated: bool,
}

impl ReactionEmoji {
    pub fn unicode(emoji: impl Into<String>) -> Self {
        Self {
            name: emoji.into(),
            id: None,
            animated: false,
        }
    }

    pub fn custom(id: EmojiId, name: impl Into<String>, animated: bool) -> Self {
        Self {
            name: name.into(),
            id: Some(id),
            animated,
        }
    }
}

impl fmt::Display for ReactionEmoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) if self.animated => write!(f, "<a:{}:{id}>", self.name),
            Some(id) => write!(f, "<:{}:{id}>", self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// A reaction added to or removed from a guild message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionEvent {
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
    pub message_id: MessageId,
    pub user_id: UserId,
    pub emoji: ReactionEmoji,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_mention_syntax() {
        assert_eq!(ReactionEmoji::unicode("👍").to_string(), "👍");
        assert_eq!(
            ReactionEmoji::custom(EmojiId::new(5), "blob", false).to_string(),
            "<:blob:5>"
        );
        assert_eq!(
            ReactionEmoji::custom(EmojiId::new(5), "party", true).to_string(),
            "<a:party:5>"
        );
    }
}
