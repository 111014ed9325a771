use std::sync::Arc;

use {
    anyhow::Context as _,
    secrecy::ExposeSecret,
    serenity::Client,
    tracing::{info, warn},
};

use {
    minilla_commands::{CommandDispatcher, CommandRegistry, Services},
    minilla_config::MinillaConfig,
    minilla_store::ReactionWatcherStore,
};

use crate::handler::DiscordHandler;

/// Connect to the gateway and process events until ctrl-c or a fatal
/// gateway error.
pub async fn run(
    config: Arc<MinillaConfig>,
    registry: Arc<CommandRegistry>,
    store: Arc<dyn ReactionWatcherStore>,
) -> anyhow::Result<()> {
    let services = Services::new(Arc::clone(&config), Arc::clone(&store));
    let handler = DiscordHandler::new(
        CommandDispatcher::new(registry, services),
        store,
        config.discord.ignore_bots,
    );

    let mut client = Client::builder(config.discord.token.expose_secret(), DiscordHandler::intents())
        .event_handler(handler)
        .await
        .context("failed to build discord client")?;

    let shard_manager = Arc::clone(&client.shard_manager);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("shutdown requested, closing gateway connections");
                shard_manager.shutdown_all().await;
            },
            Err(e) => warn!(error = %e, "failed to listen for ctrl-c"),
        }
    });

    info!("connecting to discord gateway");
    client.start().await.context("discord gateway error")?;
    info!("discord client stopped");
    Ok(())
}
