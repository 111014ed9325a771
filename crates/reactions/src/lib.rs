//! Reaction watchers: look up the watch on a `(message, emoji)` pair and run
//! its action for the reacting user.

pub mod dispatch;
pub mod error;
pub mod event;
pub mod lookup;
pub mod runner;

#[cfg(test)]
pub(crate) mod test_support;

pub use {
    dispatch::ReactionDispatcher,
    error::{Error, Result},
    event::{ReactionEmoji, ReactionEvent},
    lookup::lookup,
    runner::{ActionReport, ReactionActionRunner, ReactionActions, ReactionOutcome, RunnerState},
};
