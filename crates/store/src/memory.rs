use std::collections::BTreeMap;

use {async_trait::async_trait, tokio::sync::RwLock};

use minilla_common::MessageId;

use crate::{
    Result,
    watcher::{ReactionWatcherRecord, ReactionWatcherStore},
};

/// Process-local watcher store, used for `--memory-store` runs and tests.
#[derive(Default)]
pub struct InMemoryReactionWatcherStore {
    records: RwLock<BTreeMap<(MessageId, String), ReactionWatcherRecord>>,
}

impl InMemoryReactionWatcherStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with existing records.
    pub fn with_records(records: impl IntoIterator<Item = ReactionWatcherRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|r| ((r.message_id, r.emoji_name.clone()), r))
            .collect();
        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl ReactionWatcherStore for InMemoryReactionWatcherStore {
    async fn find(
        &self,
        message_id: MessageId,
        emoji_name: &str,
    ) -> Result<Option<ReactionWatcherRecord>> {
        let records = self.records.read().await;
        Ok(records.get(&(message_id, emoji_name.to_string())).cloned())
    }

    async fn upsert(&self, mut record: ReactionWatcherRecord) -> Result<()> {
        let mut records = self.records.write().await;
        let key = (record.message_id, record.emoji_name.clone());
        if let Some(existing) = records.get(&key) {
            record.created_at = existing.created_at;
        }
        records.insert(key, record);
        Ok(())
    }

    async fn delete(&self, message_id: MessageId, emoji_name: &str) -> Result<bool> {
        let mut records = self.records.write().await;
        Ok(records
            .remove(&(message_id, emoji_name.to_string()))
            .is_some())
    }

    async fn list_for_message(&self, message_id: MessageId) -> Result<Vec<ReactionWatcherRecord>> {
        let records = self.records.read().await;
        Ok(records
            .range((message_id, String::new())..)
            .take_while(|((id, _), _)| *id == message_id)
            .map(|(_, r)| r.clone())
            .collect())
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::watcher::{ActionKind, ReactionWatcherAction};

    fn channel_watch(message: u64, emoji: &str) -> ReactionWatcherRecord {
        ReactionWatcherRecord::new(
            MessageId::new(message),
            emoji,
            Some(ReactionWatcherAction {
                kind: ActionKind::Channel,
                target_id: 7,
                toggle: false,
            }),
        )
    }

    #[tokio::test]
    async fn seeded_records_are_found() {
        let store = InMemoryReactionWatcherStore::with_records([channel_watch(1, "🎮")]);
        let found = store.find(MessageId::new(1), "🎮").await.unwrap();
        assert_eq!(found.unwrap().action.unwrap().kind, ActionKind::Channel);
        assert!(store.find(MessageId::new(1), "🎲").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_is_scoped_to_message() {
        let store = InMemoryReactionWatcherStore::new();
        store.upsert(channel_watch(1, "b")).await.unwrap();
        store.upsert(channel_watch(1, "a")).await.unwrap();
        store.upsert(channel_watch(2, "a")).await.unwrap();
        store.upsert(channel_watch(0, "z")).await.unwrap();

        let listed = store.list_for_message(MessageId::new(1)).await.unwrap();
        let names: Vec<_> = listed.iter().map(|r| r.emoji_name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn upsert_replaces_action_but_keeps_created_at() {
        let mut first = channel_watch(1, "a");
        first.created_at = 100;
        let store = InMemoryReactionWatcherStore::with_records([first]);

        let mut second = channel_watch(1, "a");
        second.created_at = 200;
        second.action = None;
        store.upsert(second).await.unwrap();

        let found = store.find(MessageId::new(1), "a").await.unwrap().unwrap();
        assert_eq!(found.created_at, 100);
        assert!(found.action.is_none());
    }

    #[tokio::test]
    async fn delete_reports_presence() {
        let store = InMemoryReactionWatcherStore::with_records([channel_watch(1, "a")]);
        assert!(store.delete(MessageId::new(1), "a").await.unwrap());
        assert!(!store.delete(MessageId::new(1), "a").await.unwrap());
    }
}
