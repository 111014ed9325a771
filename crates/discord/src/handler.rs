//! Discord event handler for serenity.
//!
//! Every message and reaction event is processed in its own isolated task so a
//! failing command or action never affects other events.

use std::{future::Future, sync::Arc};

use {
    serenity::{
        all::{Context, EventHandler, GatewayIntents, GuildId, Message, Reaction, Ready},
        async_trait,
    },
    tracing::{debug, error, info, warn},
};

use {
    minilla_commands::CommandDispatcher,
    minilla_common::spawn_isolated,
    minilla_reactions::ReactionDispatcher,
    minilla_store::ReactionWatcherStore,
};

use crate::{
    actions::SerenityReactionActions,
    convert::{inbound_message, reaction_event},
    guild::CacheGuildScope,
    outbound::SerenityOutbound,
};

/// Handler for Discord gateway events.
pub struct DiscordHandler {
    commands: CommandDispatcher,
    store: Arc<dyn ReactionWatcherStore>,
    ignore_bots: bool,
}

impl DiscordHandler {
    pub fn new(
        commands: CommandDispatcher,
        store: Arc<dyn ReactionWatcherStore>,
        ignore_bots: bool,
    ) -> Self {
        Self {
            commands,
            store,
            ignore_bots,
        }
    }

    /// Required gateway intents for the bot.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MEMBERS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::GUILD_MESSAGE_REACTIONS
            | GatewayIntents::MESSAGE_CONTENT
    }

    fn reactions(&self, ctx: &Context) -> ReactionDispatcher {
        ReactionDispatcher::new(
            Arc::clone(&self.store),
            Arc::new(SerenityReactionActions::new(Arc::clone(&ctx.http))),
        )
    }
}

/// Run one event's work in its own task and wait for it.
async fn isolated<F>(event: &'static str, fut: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Err(e) = spawn_isolated(event, fut).await {
        error!(event, error = %e, "event task did not complete");
    }
}

#[async_trait]
impl EventHandler for DiscordHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(
            bot_name = %ready.user.name,
            guilds = ready.guilds.len(),
            commands = self.commands.registry().len(),
            "discord bot ready"
        );
    }

    async fn cache_ready(&self, _ctx: Context, guilds: Vec<GuildId>) {
        debug!(guild_count = guilds.len(), "discord cache ready");
    }

    async fn message(&self, ctx: Context, msg: Message) {
        let Some(guild_id) = msg.guild_id else {
            return;
        };
        let bot_id = ctx.cache.current_user().id;
        if msg.author.id == bot_id || (msg.author.bot && self.ignore_bots) {
            return;
        }

        let dispatcher = self.commands.clone();
        let inbound = inbound_message(&msg);
        let guild = Arc::new(CacheGuildScope::new(
            guild_id,
            Arc::clone(&ctx.cache),
            Arc::clone(&ctx.http),
        ));
        let outbound = Arc::new(SerenityOutbound::new(Arc::clone(&ctx.http)));

        isolated("message", async move {
            let message_id = inbound.id;
            let outcome = dispatcher.dispatch(inbound, guild, outbound).await;
            debug!(%message_id, ?outcome, "message dispatched");
        })
        .await;
    }

    async fn reaction_add(&self, ctx: Context, add_reaction: Reaction) {
        let bot_id = ctx.cache.current_user().id;
        if add_reaction.user_id == Some(bot_id) {
            return;
        }
        let Some(event) = reaction_event(&add_reaction) else {
            debug!(message_id = %add_reaction.message_id, "ignoring reaction outside a guild");
            return;
        };

        let dispatcher = self.reactions(&ctx);
        isolated("reaction_add", async move {
            match dispatcher.reaction_added(&event).await {
                Ok(outcome) => debug!(message_id = %event.message_id, ?outcome, "reaction handled"),
                Err(e) => warn!(message_id = %event.message_id, error = %e, "reaction dispatch failed"),
            }
        })
        .await;
    }

    async fn reaction_remove(&self, ctx: Context, removed_reaction: Reaction) {
        let bot_id = ctx.cache.current_user().id;
        if removed_reaction.user_id == Some(bot_id) {
            return;
        }
        let Some(event) = reaction_event(&removed_reaction) else {
            return;
        };

        let dispatcher = self.reactions(&ctx);
        isolated("reaction_remove", async move {
            if let Err(e) = dispatcher.reaction_removed(&event).await {
                warn!(message_id = %event.message_id, error = %e, "reaction removal failed");
            }
        })
        .await;
    }
}
