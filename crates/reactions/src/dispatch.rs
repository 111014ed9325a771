use std::sync::Arc;

use {minilla_store::ReactionWatcherStore, tracing::debug};

use crate::{
    Result,
    event::ReactionEvent,
    lookup::lookup,
    runner::{ReactionActionRunner, ReactionActions, ReactionOutcome},
};

/// Routes reaction events to the watcher registered for them.
pub struct ReactionDispatcher {
    store: Arc<dyn ReactionWatcherStore>,
    runner: ReactionActionRunner,
}

impl ReactionDispatcher {
    pub fn new(store: Arc<dyn ReactionWatcherStore>, actions: Arc<dyn ReactionActions>) -> Self {
        Self {
            store,
            runner: ReactionActionRunner::new(actions),
        }
    }

    /// Look up the watcher for the event's message and emoji and run its
    /// action. A storage failure is returned; action failures are reported in
    /// the outcome.
    pub async fn reaction_added(&self, event: &ReactionEvent) -> Result<ReactionOutcome> {
        let record = lookup(self.store.as_ref(), event.message_id, &event.emoji.name).await?;
        Ok(self.runner.run(event, record.as_ref()).await)
    }

    /// Removing a reaction does not undo a watcher's action; there is no
    /// agreed policy for revoking grants yet.
    pub async fn reaction_removed(&self, event: &ReactionEvent) -> Result<ReactionOutcome> {
        debug!(
            message_id = %event.message_id,
            emoji = %event.emoji,
            user_id = %event.user_id,
            "reaction removed"
        );
        Ok(ReactionOutcome::Ignored)
    }
}
