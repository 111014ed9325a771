//! Conversions between serenity models and minilla types.

use serenity::all::{EmojiId, Message, Reaction, ReactionType};

use {
    minilla_commands::InboundMessage,
    minilla_common::ids,
    minilla_reactions::{ReactionEmoji, ReactionEvent},
};

use crate::{Error, Result};

/// Build a serenity id, rejecting zero (serenity's constructors panic on it).
pub fn snowflake<T>(raw: u64, make: fn(u64) -> T) -> Option<T> {
    (raw != 0).then(|| make(raw))
}

/// Like [`snowflake`], as an error for action targets read from storage.
pub fn require_snowflake<T>(kind: &'static str, raw: u64, make: fn(u64) -> T) -> Result<T> {
    snowflake(raw, make).ok_or(Error::ZeroId { kind })
}

pub fn reaction_emoji(emoji: &ReactionType) -> Option<ReactionEmoji> {
    match emoji {
        ReactionType::Custom { animated, id, name } => Some(ReactionEmoji::custom(
            ids::EmojiId::new(id.get()),
            name.clone()?,
            *animated,
        )),
        ReactionType::Unicode(s) => Some(ReactionEmoji::unicode(s.clone())),
        _ => None,
    }
}

pub fn reaction_type(emoji: &ReactionEmoji) -> ReactionType {
    match emoji.id.and_then(|id| snowflake(id.get(), EmojiId::new)) {
        Some(id) => ReactionType::Custom {
            animated: emoji.animated,
            id,
            name: Some(emoji.name.clone()),
        },
        None => ReactionType::Unicode(emoji.name.clone()),
    }
}

/// `None` for reactions outside a guild, without a known user, or on a
/// deleted custom emoji.
pub fn reaction_event(reaction: &Reaction) -> Option<ReactionEvent> {
    Some(ReactionEvent {
        guild_id: ids::GuildId::new(reaction.guild_id?.get()),
        channel_id: ids::ChannelId::new(reaction.channel_id.get()),
        message_id: ids::MessageId::new(reaction.message_id.get()),
        user_id: ids::UserId::new(reaction.user_id?.get()),
        emoji: reaction_emoji(&reaction.emoji)?,
    })
}

pub fn inbound_message(msg: &Message) -> InboundMessage {
    InboundMessage {
        id: ids::MessageId::new(msg.id.get()),
        channel_id: ids::ChannelId::new(msg.channel_id.get()),
        author_id: ids::UserId::new(msg.author.id.get()),
        author_name: msg.author.name.clone(),
        content: msg.content.clone(),
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use serenity::all::ChannelId;

    use super::*;

    #[test]
    fn zero_ids_are_rejected() {
        assert_eq!(snowflake(0, ChannelId::new), None);
        assert_eq!(snowflake(5, ChannelId::new), Some(ChannelId::new(5)));
        assert!(matches!(
            require_snowflake("role", 0, ChannelId::new),
            Err(Error::ZeroId { kind: "role" })
        ));
    }

    #[test]
    fn unicode_reaction_keeps_the_emoji_as_name() {
        let emoji = reaction_emoji(&ReactionType::Unicode("👍".into())).unwrap();
        assert_eq!(emoji, ReactionEmoji::unicode("👍"));
        assert_eq!(reaction_type(&emoji), ReactionType::Unicode("👍".into()));
    }

    #[test]
    fn custom_reaction_uses_the_emoji_name() {
        let raw = ReactionType::Custom {
            animated: true,
            id: EmojiId::new(77),
            name: Some("party".into()),
        };
        let emoji = reaction_emoji(&raw).unwrap();
        assert_eq!(emoji.name, "party");
        assert_eq!(emoji.id, Some(ids::EmojiId::new(77)));
        assert!(emoji.animated);
        assert_eq!(reaction_type(&emoji), raw);
    }

    #[test]
    fn deleted_custom_emoji_has_no_name() {
        let raw = ReactionType::Custom {
            animated: false,
            id: EmojiId::new(77),
            name: None,
        };
        assert_eq!(reaction_emoji(&raw), None);
    }
}
