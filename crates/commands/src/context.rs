use std::sync::Arc;

use async_trait::async_trait;

use {
    minilla_common::{ChannelId, MessageId, UserId},
    minilla_config::MinillaConfig,
    minilla_store::ReactionWatcherStore,
};

use crate::guild::GuildScope;

/// Long-lived handles every command handler may use.
///
/// Built once at startup and cloned into each event; nothing in here is
/// mutated by dispatch.
#[derive(Clone)]
pub struct Services {
    pub config: Arc<MinillaConfig>,
    pub storage: Arc<dyn ReactionWatcherStore>,
}

impl Services {
    pub fn new(config: Arc<MinillaConfig>, storage: Arc<dyn ReactionWatcherStore>) -> Self {
        Self { config, storage }
    }
}

/// The triggering message, reduced to what handlers need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub id: MessageId,
    pub channel_id: ChannelId,
    pub author_id: UserId,
    pub author_name: String,
    pub content: String,
}

/// Send text back to the platform.
#[async_trait]
pub trait MessageOutbound: Send + Sync {
    async fn send_text(&self, channel_id: ChannelId, text: &str) -> anyhow::Result<()>;
}

/// Per-event context handed to a command handler. Never persisted; dropped
/// when the handler returns.
#[derive(Clone)]
pub struct DispatchContext {
    pub services: Services,
    pub message: InboundMessage,
    pub guild: Arc<dyn GuildScope>,
    pub outbound: Arc<dyn MessageOutbound>,
}

impl DispatchContext {
    pub fn config(&self) -> &MinillaConfig {
        &self.services.config
    }

    pub fn storage(&self) -> &dyn ReactionWatcherStore {
        self.services.storage.as_ref()
    }

    /// Reply in the channel the command came from.
    pub async fn reply(&self, text: &str) -> anyhow::Result<()> {
        self.outbound.send_text(self.message.channel_id, text).await
    }
}
