use std::{fmt, str::FromStr};

use {
    async_trait::async_trait,
    serde::{Deserialize, Serialize},
};

use minilla_common::MessageId;

use crate::{Error, Result};

/// What a watcher grants when its emoji is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Access to the channel identified by the action's target.
    Channel,
    /// The role identified by the action's target.
    Role,
}

impl ActionKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Channel => "channel",
            Self::Role => "role",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "channel" => Ok(Self::Channel),
            "role" => Ok(Self::Role),
            other => Err(Error::invalid_record(format!("unknown action kind {other:?}"))),
        }
    }
}

/// The action half of a watcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionWatcherAction {
    pub kind: ActionKind,
    /// Channel or role id, depending on `kind`.
    pub target_id: u64,
    /// Remove the triggering reaction after the action runs, so the emoji
    /// behaves like a button instead of a persistent marker.
    pub toggle: bool,
}

/// A stored watch on one emoji of one message.
///
/// `(message_id, emoji_name)` is unique among active watches. For Unicode
/// emoji the name is the emoji itself; for custom guild emoji it is the
/// emoji's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionWatcherRecord {
    pub message_id: MessageId,
    pub emoji_name: String,
    /// `None` for watches registered without an action; those are no-ops.
    pub action: Option<ReactionWatcherAction>,
    pub created_at: i64,
}

impl ReactionWatcherRecord {
    #[must_use]
    pub fn new(
        message_id: MessageId,
        emoji_name: impl Into<String>,
        action: Option<ReactionWatcherAction>,
    ) -> Self {
        Self {
            message_id,
            emoji_name: emoji_name.into(),
            action,
            created_at: now_secs(),
        }
    }
}

pub(crate) fn now_secs() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

/// Storage for reaction watchers.
///
/// Implementations must tolerate concurrent readers; every event task holds
/// a shared handle.
#[async_trait]
pub trait ReactionWatcherStore: Send + Sync {
    /// Point lookup by the composite key.
    async fn find(&self, message_id: MessageId, emoji_name: &str)
    -> Result<Option<ReactionWatcherRecord>>;

    /// Insert or replace the watcher for the record's key.
    async fn upsert(&self, record: ReactionWatcherRecord) -> Result<()>;

    /// Returns `true` if a watcher was removed.
    async fn delete(&self, message_id: MessageId, emoji_name: &str) -> Result<bool>;

    /// All watchers on a message, ordered by emoji name.
    async fn list_for_message(&self, message_id: MessageId) -> Result<Vec<ReactionWatcherRecord>>;
}
