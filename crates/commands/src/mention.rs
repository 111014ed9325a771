//! Mention and emoji token patterns.

use std::sync::LazyLock;

use regex::Regex;

use minilla_common::{ChannelId, EmojiId, UserId};

#[allow(clippy::expect_used)]
static CHANNEL_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<#(\d+)>$").expect("channel mention pattern"));

#[allow(clippy::expect_used)]
static USER_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<@!?(\d+)>$").expect("user mention pattern"));

#[allow(clippy::expect_used)]
static CUSTOM_EMOJI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<(a?):(\w{2,32}):(\d+)>$").expect("custom emoji pattern"));

/// One emoji grapheme: a flag pair, a keycap, or an emoji base with
/// optional skin tone, tag sequence and ZWJ chain.
///
/// The base must render as an emoji on its own (`Emoji_Presentation`), carry
/// a skin tone, or be an emoji character followed by VS16. Text-default
/// symbols such as `©` or a bare `❤` and unassigned code points never match;
/// Discord reports those reactions in their fully-qualified form.
#[allow(clippy::expect_used)]
static UNICODE_EMOJI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?:",
        r"[\x{1F1E6}-\x{1F1FF}]{2}",
        r"|[#*0-9]\x{FE0F}\x{20E3}",
        r"|(?:",
        r"[\p{Emoji_Presentation}--[\x{1F1E6}-\x{1F1FF}]]\x{FE0F}?[\x{1F3FB}-\x{1F3FF}]?",
        r"|\p{Emoji_Modifier_Base}[\x{1F3FB}-\x{1F3FF}]",
        r"|[\p{Emoji}--[#*0-9]]\x{FE0F}",
        r")",
        r"(?:[\x{E0020}-\x{E007E}]+\x{E007F})?",
        r"(?:\x{200D}[\p{Emoji}--[#*0-9]]\x{FE0F}?[\x{1F3FB}-\x{1F3FF}]?)*",
        r")$",
    ))
    .expect("unicode emoji pattern")
});

/// Parsed `<:name:id>` / `<a:name:id>` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomEmojiMention<'a> {
    pub name: &'a str,
    pub id: EmojiId,
    pub animated: bool,
}

/// Extract the id from a `<#id>` channel mention.
pub fn channel_id(token: &str) -> Option<ChannelId> {
    CHANNEL_MENTION
        .captures(token)
        .and_then(|c| c[1].parse().ok())
}

/// Extract the id from a `<@id>` or `<@!id>` user mention.
pub fn user_id(token: &str) -> Option<UserId> {
    USER_MENTION.captures(token).and_then(|c| c[1].parse().ok())
}

pub fn custom_emoji(token: &str) -> Option<CustomEmojiMention<'_>> {
    let caps = CUSTOM_EMOJI.captures(token)?;
    let id = caps[3].parse().ok()?;
    Some(CustomEmojiMention {
        name: caps.get(2)?.as_str(),
        id,
        animated: !caps[1].is_empty(),
    })
}

/// Returns the token if it is exactly one Unicode emoji.
pub fn unicode_emoji(token: &str) -> Option<&str> {
    UNICODE_EMOJI.is_match(token).then_some(token)
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("<#123>", Some(123))]
    #[case("<#81384788765712384>", Some(81_384_788_765_712_384))]
    #[case("#general", None)]
    #[case("<#abc>", None)]
    #[case("x<#123>", None)]
    #[case("<@123>", None)]
    fn channel_mentions(#[case] token: &str, #[case] expected: Option<u64>) {
        assert_eq!(channel_id(token), expected.map(ChannelId::new));
    }

    #[rstest]
    #[case("<@42>", Some(42))]
    #[case("<@!42>", Some(42))]
    #[case("<@&42>", None)]
    #[case("@someone", None)]
    fn user_mentions(#[case] token: &str, #[case] expected: Option<u64>) {
        assert_eq!(user_id(token), expected.map(UserId::new));
    }

    #[test]
    fn custom_emoji_static_and_animated() {
        let e = custom_emoji("<:blobwave:555>").unwrap();
        assert_eq!(e.name, "blobwave");
        assert_eq!(e.id, EmojiId::new(555));
        assert!(!e.animated);

        let e = custom_emoji("<a:party:777>").unwrap();
        assert_eq!(e.name, "party");
        assert!(e.animated);

        assert!(custom_emoji(":blobwave:").is_none());
        assert!(custom_emoji("<:x:1>").is_none());
    }

    #[rstest]
    #[case("👍")]
    #[case("👍🏽")]
    #[case("❤️")]
    #[case("🇯🇵")]
    #[case("1️⃣")]
    #[case("👨‍👩‍👧")]
    #[case("🏴‍☠️")]
    #[case("☝🏻")]
    #[case("™️")]
    #[case("🏴\u{E0067}\u{E0062}\u{E0065}\u{E006E}\u{E0067}\u{E007F}")]
    fn unicode_emoji_accepted(#[case] token: &str) {
        assert_eq!(unicode_emoji(token), Some(token));
    }

    #[rstest]
    #[case("abc")]
    #[case("1")]
    #[case("👍👍")]
    #[case("a👍")]
    #[case("<:blobwave:555>")]
    #[case("")]
    #[case("©")]
    #[case("®")]
    #[case("™")]
    #[case("‼")]
    #[case("↔")]
    #[case("❤")]
    #[case("\u{1FAFF}")]
    #[case("\u{1FAFF}\u{FE0F}")]
    #[case("🇯")]
    #[case("1\u{FE0F}")]
    fn unicode_emoji_rejected(#[case] token: &str) {
        assert_eq!(unicode_emoji(token), None);
    }
}
