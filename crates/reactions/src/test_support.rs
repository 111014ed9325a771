#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::{Arc, Mutex};

use {
    async_trait::async_trait,
    minilla_common::{ChannelId, GuildId, MessageId, RoleId, UserId},
    minilla_store::{ActionKind, ReactionWatcherAction, ReactionWatcherRecord},
};

use crate::{
    event::{ReactionEmoji, ReactionEvent},
    runner::ReactionActions,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionCall {
    GrantChannel(u64),
    GrantRole(u64),
    RemoveReaction(MessageId),
}

/// Records every platform call; optionally fails grants.
#[derive(Clone, Default)]
pub struct RecordingActions {
    calls: Arc<Mutex<Vec<ActionCall>>>,
    fail_grants: bool,
}

impl RecordingActions {
    pub fn failing_grants() -> Self {
        Self {
            fail_grants: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<ActionCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn removals(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, ActionCall::RemoveReaction(_)))
            .count()
    }

    fn record(&self, call: ActionCall) -> anyhow::Result<()> {
        let grant = !matches!(call, ActionCall::RemoveReaction(_));
        self.calls.lock().unwrap().push(call);
        if grant && self.fail_grants {
            anyhow::bail!("missing permissions");
        }
        Ok(())
    }
}

#[async_trait]
impl ReactionActions for RecordingActions {
    async fn grant_channel(
        &self,
        _guild_id: GuildId,
        _user_id: UserId,
        channel_id: ChannelId,
    ) -> anyhow::Result<()> {
        self.record(ActionCall::GrantChannel(channel_id.get()))
    }

    async fn grant_role(
        &self,
        _guild_id: GuildId,
        _user_id: UserId,
        role_id: RoleId,
    ) -> anyhow::Result<()> {
        self.record(ActionCall::GrantRole(role_id.get()))
    }

    async fn remove_reaction(&self, event: &ReactionEvent) -> anyhow::Result<()> {
        self.record(ActionCall::RemoveReaction(event.message_id))
    }
}

pub fn event(emoji: &str) -> ReactionEvent {
    ReactionEvent {
        guild_id: GuildId::new(1),
        channel_id: ChannelId::new(2),
        message_id: MessageId::new(100),
        user_id: UserId::new(3),
        emoji: ReactionEmoji::unicode(emoji),
    }
}

pub fn record(kind: ActionKind, target_id: u64, toggle: bool) -> ReactionWatcherRecord {
    ReactionWatcherRecord::new(
        MessageId::new(100),
        "👍",
        Some(ReactionWatcherAction {
            kind,
            target_id,
            toggle,
        }),
    )
}
