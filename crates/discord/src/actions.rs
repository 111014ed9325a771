use std::sync::Arc;

use {
    async_trait::async_trait,
    serenity::all::{
        ChannelId, GuildId, Http, MessageId, PermissionOverwrite, PermissionOverwriteType,
        Permissions, RoleId, UserId,
    },
    tracing::debug,
};

use {
    minilla_common::ids,
    minilla_reactions::{ReactionActions, ReactionEvent},
};

use crate::{
    Error,
    convert::{reaction_type, require_snowflake},
};

const AUDIT_REASON: &str = "minilla reaction watcher";

/// Reaction watcher side effects over serenity's HTTP client.
pub struct SerenityReactionActions {
    http: Arc<Http>,
}

impl SerenityReactionActions {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ReactionActions for SerenityReactionActions {
    /// Adds a member overwrite allowing the user to view and post in the
    /// channel. The channel must belong to `guild_id`.
    async fn grant_channel(
        &self,
        guild_id: ids::GuildId,
        user_id: ids::UserId,
        channel_id: ids::ChannelId,
    ) -> anyhow::Result<()> {
        let guild = require_snowflake("guild", guild_id.get(), GuildId::new)?;
        let user = require_snowflake("user", user_id.get(), UserId::new)?;
        let channel = require_snowflake("channel", channel_id.get(), ChannelId::new)?;

        let target = self.http.get_channel(channel).await.map_err(Error::from)?;
        match target.guild() {
            Some(c) if c.guild_id == guild => {},
            _ => {
                return Err(Error::ChannelNotInGuild {
                    channel_id: channel.get(),
                    guild_id: guild.get(),
                }
                .into());
            },
        }

        let overwrite = PermissionOverwrite {
            allow: Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES,
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Member(user),
        };
        channel
            .create_permission(&*self.http, overwrite)
            .await
            .map_err(Error::from)?;
        debug!(%guild, %channel, %user, "channel access granted");
        Ok(())
    }

    async fn grant_role(
        &self,
        guild_id: ids::GuildId,
        user_id: ids::UserId,
        role_id: ids::RoleId,
    ) -> anyhow::Result<()> {
        let guild = require_snowflake("guild", guild_id.get(), GuildId::new)?;
        let user = require_snowflake("user", user_id.get(), UserId::new)?;
        let role = require_snowflake("role", role_id.get(), RoleId::new)?;

        self.http
            .add_member_role(guild, user, role, Some(AUDIT_REASON))
            .await
            .map_err(Error::from)?;
        debug!(%guild, %user, %role, "role granted");
        Ok(())
    }

    async fn remove_reaction(&self, event: &ReactionEvent) -> anyhow::Result<()> {
        let channel = require_snowflake("channel", event.channel_id.get(), ChannelId::new)?;
        let message = require_snowflake("message", event.message_id.get(), MessageId::new)?;
        let user = require_snowflake("user", event.user_id.get(), UserId::new)?;

        self.http
            .delete_reaction(channel, message, user, &reaction_type(&event.emoji))
            .await
            .map_err(Error::from)?;
        Ok(())
    }
}
