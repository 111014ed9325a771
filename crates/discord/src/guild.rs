use std::sync::Arc;

use {
    async_trait::async_trait,
    serenity::all::{Cache, ChannelId, EmojiId, GuildId, Http, UserId},
    tracing::warn,
};

use {
    minilla_commands::{ChannelInfo, GuildEmoji, GuildScope, MemberInfo},
    minilla_common::ids,
};

use crate::convert::snowflake;

/// Resolves ids in one guild from the gateway cache, falling back to HTTP.
///
/// HTTP failures, including unknown ids, resolve to `None`.
pub struct CacheGuildScope {
    guild_id: GuildId,
    cache: Arc<Cache>,
    http: Arc<Http>,
}

impl CacheGuildScope {
    pub fn new(guild_id: GuildId, cache: Arc<Cache>, http: Arc<Http>) -> Self {
        Self {
            guild_id,
            cache,
            http,
        }
    }
}

#[async_trait]
impl GuildScope for CacheGuildScope {
    fn guild_id(&self) -> ids::GuildId {
        ids::GuildId::new(self.guild_id.get())
    }

    async fn channel(&self, id: ids::ChannelId) -> Option<ChannelInfo> {
        let channel_id = snowflake(id.get(), ChannelId::new)?;
        let cached = self
            .cache
            .guild(self.guild_id)
            .and_then(|g| g.channels.get(&channel_id).map(|c| c.name.clone()));

        let name = match cached {
            Some(name) => name,
            None => match self.http.get_channel(channel_id).await {
                Ok(channel) => channel
                    .guild()
                    .filter(|c| c.guild_id == self.guild_id)
                    .map(|c| c.name)?,
                Err(e) => {
                    warn!(guild_id = %self.guild_id, %channel_id, error = %e, "channel lookup failed");
                    return None;
                },
            },
        };
        Some(ChannelInfo { id, name })
    }

    async fn member(&self, id: ids::UserId) -> Option<MemberInfo> {
        let user_id = snowflake(id.get(), UserId::new)?;
        let cached = self.cache.guild(self.guild_id).and_then(|g| {
            g.members
                .get(&user_id)
                .map(|m| m.display_name().to_string())
        });

        let display_name = match cached {
            Some(name) => name,
            None => match self.http.get_member(self.guild_id, user_id).await {
                Ok(member) => member.display_name().to_string(),
                Err(e) => {
                    warn!(guild_id = %self.guild_id, %user_id, error = %e, "member lookup failed");
                    return None;
                },
            },
        };
        Some(MemberInfo { id, display_name })
    }

    async fn emoji(&self, id: ids::EmojiId) -> Option<GuildEmoji> {
        let emoji_id = snowflake(id.get(), EmojiId::new)?;
        let cached = self.cache.guild(self.guild_id).and_then(|g| {
            g.emojis
                .get(&emoji_id)
                .map(|e| (e.name.clone(), e.animated))
        });

        let (name, animated) = match cached {
            Some(found) => found,
            None => match self.http.get_emoji(self.guild_id, emoji_id).await {
                Ok(e) => (e.name, e.animated),
                Err(e) => {
                    warn!(guild_id = %self.guild_id, %emoji_id, error = %e, "emoji lookup failed");
                    return None;
                },
            },
        };
        Some(GuildEmoji { id, name, animated })
    }
}
