use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Serenity(#[from] serenity::Error),

    /// Discord ids are never zero.
    #[error("invalid {kind} id 0")]
    ZeroId { kind: &'static str },

    #[error("channel {channel_id} is not in guild {guild_id}")]
    ChannelNotInGuild { channel_id: u64, guild_id: u64 },
}

pub type Result<T> = std::result::Result<T, Error>;
