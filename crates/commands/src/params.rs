//! Typed command parameters.
//!
//! Each declared parameter has a [`ParamType`]; [`parse_param`] turns one raw
//! token into a [`ParamValue`] of that type or rejects it. Parsed values are
//! collected into [`ParsedParams`], which only accepts names and types the
//! command declared.

use std::{collections::HashMap, fmt};

use {
    serde::{Deserialize, Serialize},
    tracing::trace,
};

use crate::{
    Error, Result,
    definition::RequiredParameter,
    guild::{ChannelInfo, GuildEmoji, GuildScope, MemberInfo},
    mention,
};

/// Declared type of a command parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    /// Any non-empty token.
    String,
    /// A decimal integer literal.
    Integer,
    /// A `<#id>` mention of a channel in the guild.
    ChannelRef,
    /// A `<@id>` mention of a guild member.
    UserRef,
    /// A custom guild emoji mention or a single Unicode emoji.
    EmojiRef,
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::ChannelRef => "channel",
            Self::UserRef => "user",
            Self::EmojiRef => "emoji",
        })
    }
}

/// An emoji parameter, resolved by whichever strategy matched first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmojiValue {
    Custom(GuildEmoji),
    Unicode(String),
}

impl EmojiValue {
    /// The name the platform reports on reaction events for this emoji.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Custom(e) => &e.name,
            Self::Unicode(s) => s,
        }
    }
}

/// A successfully parsed parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    String(String),
    Integer(i64),
    Channel(ChannelInfo),
    User(MemberInfo),
    Emoji(EmojiValue),
}

impl ParamValue {
    #[must_use]
    pub fn param_type(&self) -> ParamType {
        match self {
            Self::String(_) => ParamType::String,
            Self::Integer(_) => ParamType::Integer,
            Self::Channel(_) => ParamType::ChannelRef,
            Self::User(_) => ParamType::UserRef,
            Self::Emoji(_) => ParamType::EmojiRef,
        }
    }
}

/// Decode `raw` as `kind`. `None` means the token is not a valid value of that
/// type in this guild.
pub async fn parse_param(raw: &str, kind: ParamType, guild: &dyn GuildScope) -> Option<ParamValue> {
    let parsed = match kind {
        ParamType::String => (!raw.is_empty()).then(|| ParamValue::String(raw.to_string())),
        ParamType::Integer => raw.parse::<i64>().ok().map(ParamValue::Integer),
        ParamType::ChannelRef => match mention::channel_id(raw) {
            Some(id) => guild.channel(id).await.map(ParamValue::Channel),
            None => None,
        },
        ParamType::UserRef => match mention::user_id(raw) {
            Some(id) => guild.member(id).await.map(ParamValue::User),
            None => None,
        },
        ParamType::EmojiRef => parse_emoji(raw, guild).await.map(ParamValue::Emoji),
    };
    trace!(token = raw, %kind, ok = parsed.is_some(), "parameter parsed");
    parsed
}

/// Custom guild emoji first, then a standalone Unicode emoji.
async fn parse_emoji(raw: &str, guild: &dyn GuildScope) -> Option<EmojiValue> {
    if let Some(custom) = mention::custom_emoji(raw)
        && let Some(emoji) = guild.emoji(custom.id).await
    {
        return Some(EmojiValue::Custom(emoji));
    }
    mention::unicode_emoji(raw).map(|e| EmojiValue::Unicode(e.to_string()))
}

/// Parameters parsed for one matched command, keyed by declared name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedParams {
    values: HashMap<String, ParamValue>,
}

impl ParsedParams {
    /// Start collecting values for the given declaration.
    #[must_use]
    pub fn builder(declared: &[RequiredParameter]) -> ParsedParamsBuilder<'_> {
        ParsedParamsBuilder {
            declared,
            values: HashMap::with_capacity(declared.len()),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn string(&self, name: &str) -> Result<&str> {
        match self.require(name)? {
            ParamValue::String(s) => Ok(s),
            other => Err(mismatch(name, ParamType::String, other)),
        }
    }

    pub fn integer(&self, name: &str) -> Result<i64> {
        match self.require(name)? {
            ParamValue::Integer(n) => Ok(*n),
            other => Err(mismatch(name, ParamType::Integer, other)),
        }
    }

    pub fn channel(&self, name: &str) -> Result<&ChannelInfo> {
        match self.require(name)? {
            ParamValue::Channel(c) => Ok(c),
            other => Err(mismatch(name, ParamType::ChannelRef, other)),
        }
    }

    pub fn member(&self, name: &str) -> Result<&MemberInfo> {
        match self.require(name)? {
            ParamValue::User(m) => Ok(m),
            other => Err(mismatch(name, ParamType::UserRef, other)),
        }
    }

    pub fn emoji(&self, name: &str) -> Result<&EmojiValue> {
        match self.require(name)? {
            ParamValue::Emoji(e) => Ok(e),
            other => Err(mismatch(name, ParamType::EmojiRef, other)),
        }
    }

    fn require(&self, name: &str) -> Result<&ParamValue> {
        self.values.get(name).ok_or_else(|| Error::missing(name))
    }
}

fn mismatch(name: &str, expected: ParamType, actual: &ParamValue) -> Error {
    Error::TypeMismatch {
        name: name.to_string(),
        expected,
        actual: actual.param_type(),
    }
}

/// Incremental, declaration-checked construction of [`ParsedParams`].
pub struct ParsedParamsBuilder<'a> {
    declared: &'a [RequiredParameter],
    values: HashMap<String, ParamValue>,
}

impl ParsedParamsBuilder<'_> {
    /// Add a value. The name must be declared and the value's type must
    /// match the declaration.
    pub fn insert(&mut self, name: &str, value: ParamValue) -> Result<()> {
        let decl = self
            .declared
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| Error::UndeclaredParameter {
                name: name.to_string(),
            })?;
        if decl.kind != value.param_type() {
            return Err(mismatch(name, decl.kind, &value));
        }
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    /// Finish, requiring every declared parameter to be present.
    pub fn build(self) -> Result<ParsedParams> {
        if let Some(missing) = self
            .declared
            .iter()
            .find(|p| !self.values.contains_key(&p.name))
        {
            return Err(Error::missing(&missing.name));
        }
        Ok(ParsedParams {
            values: self.values,
        })
    }
}
