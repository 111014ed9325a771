//! Reaction watcher persistence.
//!
//! A reaction watcher ties a `(message, emoji)` pair to an action. Records are
//! written by the registration commands and read by the reaction dispatcher.

pub mod error;
pub mod memory;
pub mod sqlite;
pub mod watcher;

pub use {
    error::{Error, Result},
    memory::InMemoryReactionWatcherStore,
    sqlite::SqliteReactionWatcherStore,
    watcher::{ActionKind, ReactionWatcherAction, ReactionWatcherRecord, ReactionWatcherStore},
};
