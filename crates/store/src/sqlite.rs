use {async_trait::async_trait, sqlx::SqlitePool, tracing::debug};

use minilla_common::MessageId;

use crate::{
    Error, Result,
    error::Context,
    watcher::{ActionKind, ReactionWatcherAction, ReactionWatcherRecord, ReactionWatcherStore},
};

/// Internal row type for sqlx mapping.
#[derive(sqlx::FromRow)]
struct WatcherRow {
    message_id: i64,
    emoji_name: String,
    action_kind: Option<String>,
    target_id: Option<i64>,
    toggle: bool,
    created_at: i64,
}

impl TryFrom<WatcherRow> for ReactionWatcherRecord {
    type Error = Error;

    fn try_from(r: WatcherRow) -> Result<Self> {
        let action = match (r.action_kind, r.target_id) {
            (None, _) => None,
            (Some(kind), target_id) => {
                let target_id = target_id.with_context(|| {
                    format!(
                        "watcher {}/{} has an action kind but no target",
                        r.message_id, r.emoji_name
                    )
                })?;
                Some(ReactionWatcherAction {
                    kind: kind.parse::<ActionKind>()?,
                    target_id: target_id as u64,
                    toggle: r.toggle,
                })
            },
        };
        Ok(Self {
            message_id: MessageId::new(r.message_id as u64),
            emoji_name: r.emoji_name,
            action,
            created_at: r.created_at,
        })
    }
}

/// SQLite-backed reaction watcher store.
pub struct SqliteReactionWatcherStore {
    pool: SqlitePool,
}

impl SqliteReactionWatcherStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the `reaction_watchers` table if it does not exist yet.
    pub async fn init(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS reaction_watchers (
                message_id  INTEGER NOT NULL,
                emoji_name  TEXT    NOT NULL,
                action_kind TEXT,
                target_id   INTEGER,
                toggle      INTEGER NOT NULL DEFAULT 0,
                created_at  INTEGER NOT NULL,
                PRIMARY KEY (message_id, emoji_name)
            )"#,
        )
        .execute(pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl ReactionWatcherStore for SqliteReactionWatcherStore {
    async fn find(
        &self,
        message_id: MessageId,
        emoji_name: &str,
    ) -> Result<Option<ReactionWatcherRecord>> {
        let row = sqlx::query_as::<_, WatcherRow>(
            "SELECT message_id, emoji_name, action_kind, target_id, toggle, created_at \
             FROM reaction_watchers WHERE message_id = ? AND emoji_name = ?",
        )
        .bind(message_id.get() as i64)
        .bind(emoji_name)
        .fetch_optional(&self.pool)
        .await?;
        row.map(TryInto::try_into).transpose()
    }

    async fn upsert(&self, record: ReactionWatcherRecord) -> Result<()> {
        let (kind, target, toggle) = match record.action {
            Some(a) => (Some(a.kind.as_str()), Some(a.target_id as i64), a.toggle),
            None => (None, None, false),
        };
        sqlx::query(
            r#"INSERT INTO reaction_watchers
                 (message_id, emoji_name, action_kind, target_id, toggle, created_at)
               VALUES (?, ?, ?, ?, ?, ?)
               ON CONFLICT(message_id, emoji_name) DO UPDATE SET
                 action_kind = excluded.action_kind,
                 target_id = excluded.target_id,
                 toggle = excluded.toggle"#,
        )
        .bind(record.message_id.get() as i64)
        .bind(&record.emoji_name)
        .bind(kind)
        .bind(target)
        .bind(toggle)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;
        debug!(
            message_id = %record.message_id,
            emoji = %record.emoji_name,
            "reaction watcher stored"
        );
        Ok(())
    }

    async fn delete(&self, message_id: MessageId, emoji_name: &str) -> Result<bool> {
        let result =
            sqlx::query("DELETE FROM reaction_watchers WHERE message_id = ? AND emoji_name = ?")
                .bind(message_id.get() as i64)
                .bind(emoji_name)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_for_message(&self, message_id: MessageId) -> Result<Vec<ReactionWatcherRecord>> {
        let rows = sqlx::query_as::<_, WatcherRow>(
            "SELECT message_id, emoji_name, action_kind, target_id, toggle, created_at \
             FROM reaction_watchers WHERE message_id = ? ORDER BY emoji_name",
        )
        .bind(message_id.get() as i64)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(TryInto::try_into).collect()
    }
}
