//! Guild-scoped resolution used by the parameter parser.

use async_trait::async_trait;

use minilla_common::{ChannelId, EmojiId, GuildId, UserId};

/// A channel that exists in the current guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInfo {
    pub id: ChannelId,
    pub name: String,
}

/// A member of the current guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInfo {
    pub id: UserId,
    pub display_name: String,
}

/// A custom emoji uploaded to the current guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildEmoji {
    pub id: EmojiId,
    pub name: String,
    pub animated: bool,
}

/// Resolves ids against one guild.
///
/// Implementations return `None` both for ids that do not exist in the guild
/// and for lookups that failed at the platform; the parser treats either as a
/// failed parse.
#[async_trait]
pub trait GuildScope: Send + Sync {
    fn guild_id(&self) -> GuildId;

    async fn channel(&self, id: ChannelId) -> Option<ChannelInfo>;

    async fn member(&self, id: UserId) -> Option<MemberInfo>;

    async fn emoji(&self, id: EmojiId) -> Option<GuildEmoji>;
}
