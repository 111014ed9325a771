use {
    minilla_common::MessageId,
    minilla_store::{ReactionWatcherRecord, ReactionWatcherStore},
    tracing::debug,
};

use crate::Result;

/// Point query for the watcher on `(message_id, emoji_name)`.
///
/// A miss is `Ok(None)`, not an error.
pub async fn lookup(
    store: &dyn ReactionWatcherStore,
    message_id: MessageId,
    emoji_name: &str,
) -> Result<Option<ReactionWatcherRecord>> {
    let record = store.find(message_id, emoji_name).await?;
    if record.is_none() {
        debug!(%message_id, emoji = emoji_name, "no reaction watcher");
    }
    Ok(record)
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use minilla_store::{ActionKind, InMemoryReactionWatcherStore, ReactionWatcherAction};

    use super::*;

    #[tokio::test]
    async fn hit_and_miss() {
        let store = InMemoryReactionWatcherStore::with_records([ReactionWatcherRecord::new(
            MessageId::new(1),
            "👍",
            Some(ReactionWatcherAction {
                kind: ActionKind::Role,
                target_id: 9,
                toggle: false,
            }),
        )]);

        let hit = lookup(&store, MessageId::new(1), "👍").await.unwrap();
        assert_eq!(hit.unwrap().action.unwrap().target_id, 9);

        assert!(lookup(&store, MessageId::new(1), "👎").await.unwrap().is_none());
        assert!(lookup(&store, MessageId::new(2), "👍").await.unwrap().is_none());
    }
}
