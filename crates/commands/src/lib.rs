//! Command matching and dispatch.
//!
//! An inbound message is split on whitespace; the first token selects the
//! candidate definitions registered under that keyword, and the matcher walks
//! them in registration order until one accepts both its literal options and
//! its typed parameters. The winning handler then runs behind a failure
//! boundary so a broken command never affects other events.

pub mod context;
pub mod definition;
pub mod dispatch;
pub mod error;
pub mod executor;
pub mod guild;
pub mod matcher;
pub mod mention;
pub mod params;
pub mod registry;

#[cfg(test)]
pub(crate) mod test_support;

pub use {
    context::{DispatchContext, InboundMessage, MessageOutbound, Services},
    definition::{CommandDefinition, CommandHandler, RequiredParameter, handler_fn},
    dispatch::{CommandDispatcher, DispatchOutcome, tokenize},
    error::{Error, Result},
    executor::{ExecutionOutcome, execute},
    guild::{ChannelInfo, GuildEmoji, GuildScope, MemberInfo},
    matcher::{CommandMatcher, MatchOutcome, Rejection},
    params::{EmojiValue, ParamType, ParamValue, ParsedParams, parse_param},
    registry::CommandRegistry,
};
