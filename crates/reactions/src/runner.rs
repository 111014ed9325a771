//! Executes a watcher's action for one reaction event.
//!
//! One run walks `Idle -> Applying [-> Reverting] -> Idle`. Reverting only
//! happens for toggle watchers and removes the user's reaction so the emoji
//! acts as a button. It runs even when applying failed, so the message never
//! keeps a reaction for a grant that did not happen.

use std::sync::Arc;

use {
    async_trait::async_trait,
    minilla_common::{ChannelId, GuildId, RoleId, UserId},
    minilla_store::{ActionKind, ReactionWatcherAction, ReactionWatcherRecord},
    tracing::{debug, info, trace, warn},
};

use crate::event::ReactionEvent;

/// Platform side effects a watcher can trigger.
#[async_trait]
pub trait ReactionActions: Send + Sync {
    /// Let the user see and post in `channel_id`.
    async fn grant_channel(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        channel_id: ChannelId,
    ) -> anyhow::Result<()>;

    async fn grant_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> anyhow::Result<()>;

    /// Remove the reaction that triggered `event`.
    async fn remove_reaction(&self, event: &ReactionEvent) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    Idle,
    Applying,
    Reverting,
}

impl RunnerState {
    fn next(self, action: &ReactionWatcherAction) -> Self {
        match self {
            Self::Idle => Self::Applying,
            Self::Applying if action.toggle => Self::Reverting,
            Self::Applying | Self::Reverting => Self::Idle,
        }
    }
}

/// What a run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionReport {
    pub kind: ActionKind,
    pub target_id: u64,
    pub grant_error: Option<String>,
    pub reverted: bool,
    pub revert_error: Option<String>,
}

impl ActionReport {
    fn new(action: &ReactionWatcherAction) -> Self {
        Self {
            kind: action.kind,
            target_id: action.target_id,
            grant_error: None,
            reverted: false,
            revert_error: None,
        }
    }

    /// Every step that ran succeeded.
    pub fn is_clean(&self) -> bool {
        self.grant_error.is_none() && self.revert_error.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReactionOutcome {
    /// No watcher, or a watcher without an action.
    Ignored,
    Applied(ActionReport),
}

pub struct ReactionActionRunner {
    actions: Arc<dyn ReactionActions>,
}

impl ReactionActionRunner {
    pub fn new(actions: Arc<dyn ReactionActions>) -> Self {
        Self { actions }
    }

    pub async fn run(
        &self,
        event: &ReactionEvent,
        record: Option<&ReactionWatcherRecord>,
    ) -> ReactionOutcome {
        let Some(action) = record.and_then(|r| r.action) else {
            debug!(
                message_id = %event.message_id,
                emoji = %event.emoji,
                "no watcher action, ignoring reaction"
            );
            return ReactionOutcome::Ignored;
        };

        let mut report = ActionReport::new(&action);
        let mut state = RunnerState::Idle.next(&action);
        while state != RunnerState::Idle {
            trace!(?state, message_id = %event.message_id, "reaction runner step");
            match state {
                RunnerState::Applying => {
                    if let Err(e) = self.apply(event, &action).await {
                        warn!(
                            kind = %action.kind,
                            target_id = action.target_id,
                            user_id = %event.user_id,
                            error = %e,
                            "reaction action failed"
                        );
                        report.grant_error = Some(format!("{e:#}"));
                    }
                },
                RunnerState::Reverting => match self.actions.remove_reaction(event).await {
                    Ok(()) => report.reverted = true,
                    Err(e) => {
                        warn!(
                            message_id = %event.message_id,
                            user_id = %event.user_id,
                            error = %e,
                            "failed to remove toggle reaction"
                        );
                        report.revert_error = Some(format!("{e:#}"));
                    },
                },
                RunnerState::Idle => {},
            }
            state = state.next(&action);
        }

        if report.grant_error.is_none() {
            info!(
                kind = %action.kind,
                target_id = action.target_id,
                user_id = %event.user_id,
                toggle = action.toggle,
                "reaction action applied"
            );
        }
        ReactionOutcome::Applied(report)
    }

    async fn apply(
        &self,
        event: &ReactionEvent,
        action: &ReactionWatcherAction,
    ) -> anyhow::Result<()> {
        match action.kind {
            ActionKind::Channel => {
                self.actions
                    .grant_channel(
                        event.guild_id,
                        event.user_id,
                        ChannelId::new(action.target_id),
                    )
                    .await
            },
            ActionKind::Role => {
                self.actions
                    .grant_role(event.guild_id, event.user_id, RoleId::new(action.target_id))
                    .await
            },
        }
    }
}
