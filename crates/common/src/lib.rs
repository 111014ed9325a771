//! Shared types, error definitions, and utilities used across all minilla crates.

pub mod error;
pub mod ids;
pub mod task;

pub use {
    error::{Error, FromMessage, Result},
    ids::{ChannelId, EmojiId, GuildId, MessageId, RoleId, UserId},
    task::spawn_isolated,
};
