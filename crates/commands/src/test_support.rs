#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;

use {
    minilla_common::{ChannelId, EmojiId, GuildId, MessageId, UserId},
    minilla_config::MinillaConfig,
    minilla_store::InMemoryReactionWatcherStore,
};

use crate::{
    context::{DispatchContext, InboundMessage, MessageOutbound, Services},
    definition::{CommandHandler, handler_fn},
    guild::{ChannelInfo, GuildEmoji, GuildScope, MemberInfo},
};

/// Fixed guild contents with per-kind lookup counters.
#[derive(Default)]
pub struct StaticGuild {
    channels: HashMap<ChannelId, ChannelInfo>,
    members: HashMap<UserId, MemberInfo>,
    emojis: HashMap<EmojiId, GuildEmoji>,
    channel_lookups: AtomicUsize,
    member_lookups: AtomicUsize,
    emoji_lookups: AtomicUsize,
}

impl StaticGuild {
    pub fn with_channel(mut self, id: u64, name: &str) -> Self {
        let id = ChannelId::new(id);
        self.channels.insert(id, ChannelInfo {
            id,
            name: name.into(),
        });
        self
    }

    pub fn with_member(mut self, id: u64, display_name: &str) -> Self {
        let id = UserId::new(id);
        self.members.insert(id, MemberInfo {
            id,
            display_name: display_name.into(),
        });
        self
    }

    pub fn with_emoji(mut self, id: u64, name: &str, animated: bool) -> Self {
        let id = EmojiId::new(id);
        self.emojis.insert(id, GuildEmoji {
            id,
            name: name.into(),
            animated,
        });
        self
    }

    pub fn channel_lookups(&self) -> usize {
        self.channel_lookups.load(Ordering::SeqCst)
    }

    pub fn member_lookups(&self) -> usize {
        self.member_lookups.load(Ordering::SeqCst)
    }

    pub fn emoji_lookups(&self) -> usize {
        self.emoji_lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GuildScope for StaticGuild {
    fn guild_id(&self) -> GuildId {
        GuildId::new(1)
    }

    async fn channel(&self, id: ChannelId) -> Option<ChannelInfo> {
        self.channel_lookups.fetch_add(1, Ordering::SeqCst);
        self.channels.get(&id).cloned()
    }

    async fn member(&self, id: UserId) -> Option<MemberInfo> {
        self.member_lookups.fetch_add(1, Ordering::SeqCst);
        self.members.get(&id).cloned()
    }

    async fn emoji(&self, id: EmojiId) -> Option<GuildEmoji> {
        self.emoji_lookups.fetch_add(1, Ordering::SeqCst);
        self.emojis.get(&id).cloned()
    }
}

/// Captures every outbound reply.
#[derive(Clone, Default)]
pub struct RecordingOutbound {
    sent: Arc<Mutex<Vec<(ChannelId, String)>>>,
}

impl RecordingOutbound {
    pub fn sent(&self) -> Vec<(ChannelId, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|(_, t)| t).collect()
    }
}

#[async_trait]
impl MessageOutbound for RecordingOutbound {
    async fn send_text(&self, channel_id: ChannelId, text: &str) -> anyhow::Result<()> {
        self.sent.lock().unwrap().push((channel_id, text.to_string()));
        Ok(())
    }
}

/// Handler that only counts its invocations.
#[derive(Clone, Default)]
pub struct CountingHandler {
    calls: Arc<AtomicUsize>,
}

impl CountingHandler {
    pub fn handler(&self) -> Arc<dyn CommandHandler> {
        let calls = Arc::clone(&self.calls);
        handler_fn(move |_ctx, _params| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(()) }
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub fn services() -> Services {
    Services::new(
        Arc::new(MinillaConfig::default()),
        Arc::new(InMemoryReactionWatcherStore::new()),
    )
}

pub fn message(author: u64, content: &str) -> InboundMessage {
    InboundMessage {
        id: MessageId::new(1000 + author),
        channel_id: ChannelId::new(500),
        author_id: UserId::new(author),
        author_name: format!("user{author}"),
        content: content.to_string(),
    }
}

pub fn context(guild: StaticGuild, outbound: RecordingOutbound) -> DispatchContext {
    DispatchContext {
        services: services(),
        message: message(7, "!x"),
        guild: Arc::new(guild),
        outbound: Arc::new(outbound),
    }
}
