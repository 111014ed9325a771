use std::sync::Arc;

use {
    async_trait::async_trait,
    serenity::all::{ChannelId, Http},
};

use {
    minilla_commands::MessageOutbound,
    minilla_common::ids,
};

use crate::{Error, convert::require_snowflake};

/// Discord caps message content at 2000 characters.
const MAX_MESSAGE_LEN: usize = 2000;

/// Sends command replies through serenity's HTTP client.
pub struct SerenityOutbound {
    http: Arc<Http>,
}

impl SerenityOutbound {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl MessageOutbound for SerenityOutbound {
    async fn send_text(&self, channel_id: ids::ChannelId, text: &str) -> anyhow::Result<()> {
        let channel = require_snowflake("channel", channel_id.get(), ChannelId::new)?;
        for chunk in chunk_message(text, MAX_MESSAGE_LEN) {
            channel
                .say(&*self.http, chunk)
                .await
                .map_err(Error::from)?;
        }
        Ok(())
    }
}

/// Split `text` into pieces of at most `max` characters, preferring line
/// breaks.
fn chunk_message(text: &str, max: usize) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut rest = text;
    while rest.chars().count() > max {
        let hard = rest
            .char_indices()
            .nth(max)
            .map_or(rest.len(), |(i, _)| i);
        let cut = rest[..hard].rfind('\n').filter(|&i| i > 0).unwrap_or(hard);
        chunks.push(&rest[..cut]);
        rest = rest[cut..].trim_start_matches('\n');
    }
    if !rest.is_empty() {
        chunks.push(rest);
    }
    chunks
}
