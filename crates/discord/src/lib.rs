//! Discord adapter built on serenity.
//!
//! Translates gateway events into command and reaction dispatches, and
//! implements the guild resolution, reply and reaction-action seams on top of
//! serenity's cache and HTTP client.

pub mod actions;
pub mod client;
pub mod convert;
pub mod error;
pub mod guild;
pub mod handler;
pub mod outbound;

pub use {
    actions::SerenityReactionActions,
    client::run,
    error::{Error, Result},
    guild::CacheGuildScope,
    handler::DiscordHandler,
    outbound::SerenityOutbound,
};
