//! Commands registered by the binary.

use std::sync::Arc;

use async_trait::async_trait;

use {
    minilla_commands::{
        CommandDefinition, CommandHandler, CommandRegistry, DispatchContext, ParamType,
        ParsedParams, handler_fn,
    },
    minilla_common::MessageId,
    minilla_store::{ActionKind, ReactionWatcherAction, ReactionWatcherRecord},
};

/// Register every built-in command under `prefix`.
pub fn register(registry: &mut CommandRegistry, prefix: &str) -> minilla_commands::Result<()> {
    let kw = |name: &str| format!("{prefix}{name}");

    registry.register(
        CommandDefinition::new(
            kw("ping"),
            handler_fn(|ctx, _params| async move { ctx.reply("pong").await }),
        )
        .describe("Check that the bot is responding"),
    )?;

    registry.register(
        CommandDefinition::new(kw("whois"), handler_fn(whois))
            .parameter("user", ParamType::UserRef)
            .describe("Show a member's display name"),
    )?;

    for toggle in [false, true] {
        for kind in [ActionKind::Role, ActionKind::Channel] {
            let mut def = CommandDefinition::new(kw("watch"), Arc::new(WatchHandler { kind, toggle }));
            if toggle {
                def = def.option("toggle");
            }
            def = def
                .option(kind.as_str())
                .parameter("message", ParamType::Integer)
                .parameter("emoji", ParamType::EmojiRef);
            def = match kind {
                ActionKind::Role => def.parameter("role", ParamType::Integer),
                ActionKind::Channel => def.parameter("channel", ParamType::ChannelRef),
            };
            let what = match kind {
                ActionKind::Role => "grant a role",
                ActionKind::Channel => "open a channel",
            };
            let description = if toggle {
                format!("React to {what}; the reaction is removed again")
            } else {
                format!("React to {what}")
            };
            registry.register(def.describe(description))?;
        }
    }

    registry.register(
        CommandDefinition::new(kw("unwatch"), handler_fn(unwatch))
            .parameter("message", ParamType::Integer)
            .parameter("emoji", ParamType::EmojiRef)
            .describe("Stop watching an emoji on a message"),
    )?;

    let mut lines: Vec<String> = registry
        .iter()
        .map(|c| match c.description() {
            Some(d) => format!("`{}` {d}", c.usage()),
            None => format!("`{}`", c.usage()),
        })
        .collect();
    lines.push(format!("`{}` Show this list", kw("help")));
    let help = Arc::new(lines.join("\n"));
    registry.register(
        CommandDefinition::new(
            kw("help"),
            handler_fn(move |ctx, _params| {
                let help = Arc::clone(&help);
                async move { ctx.reply(&help).await }
            }),
        )
        .describe("Show this list"),
    )?;

    Ok(())
}

async fn whois(ctx: DispatchContext, params: ParsedParams) -> anyhow::Result<()> {
    let member = params.member("user")?;
    ctx.reply(&format!("{} ({})", member.display_name, member.id))
        .await
}

/// Discord ids are positive; the integer parser accepts any `i64`.
fn snowflake(value: i64) -> Option<u64> {
    u64::try_from(value).ok().filter(|&v| v != 0)
}

struct WatchHandler {
    kind: ActionKind,
    toggle: bool,
}

#[async_trait]
impl CommandHandler for WatchHandler {
    async fn execute(&self, ctx: DispatchContext, params: ParsedParams) -> anyhow::Result<()> {
        let Some(message_id) = snowflake(params.integer("message")?) else {
            return ctx.reply("message id must be a positive integer").await;
        };
        let emoji = params.emoji("emoji")?.name().to_string();
        let (target_id, target) = match self.kind {
            ActionKind::Role => {
                let Some(role_id) = snowflake(params.integer("role")?) else {
                    return ctx.reply("role id must be a positive integer").await;
                };
                (role_id, format!("role {role_id}"))
            },
            ActionKind::Channel => {
                let channel = params.channel("channel")?;
                (channel.id.get(), format!("#{}", channel.name))
            },
        };

        let record = ReactionWatcherRecord::new(
            MessageId::new(message_id),
            emoji.clone(),
            Some(ReactionWatcherAction {
                kind: self.kind,
                target_id,
                toggle: self.toggle,
            }),
        );
        ctx.storage().upsert(record).await?;

        let suffix = if self.toggle {
            " (toggle)"
        } else {
            ""
        };
        ctx.reply(&format!(
            "Watching {emoji} on message {message_id}: {target}{suffix}"
        ))
        .await
    }
}

async fn unwatch(ctx: DispatchContext, params: ParsedParams) -> anyhow::Result<()> {
    let Some(message_id) = snowflake(params.integer("message")?) else {
        return ctx.reply("message id must be a positive integer").await;
    };
    let emoji = params.emoji("emoji")?.name().to_string();
    let removed = ctx
        .storage()
        .delete(MessageId::new(message_id), &emoji)
        .await?;
    let reply = if removed {
        format!("Stopped watching {emoji} on message {message_id}")
    } else {
        format!("No watcher for {emoji} on message {message_id}")
    };
    ctx.reply(&reply).await
}
