/// Config schema types (discord account, database, command routing).
use {
    secrecy::{ExposeSecret, Secret},
    serde::{Deserialize, Serialize},
};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MinillaConfig {
    pub discord: DiscordConfig,
    pub database: DatabaseConfig,
    pub commands: CommandsConfig,
}

/// Discord bot account settings.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    /// Bot token from the Discord developer portal.
    #[serde(serialize_with = "serialize_secret")]
    pub token: Secret<String>,

    /// Drop messages authored by other bots.
    pub ignore_bots: bool,
}

impl std::fmt::Debug for DiscordConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordConfig")
            .field("token", &"[REDACTED]")
            .field("ignore_bots", &self.ignore_bots)
            .finish()
    }
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: Secret::new(String::new()),
            ignore_bots: true,
        }
    }
}

fn serialize_secret<S: serde::Serializer>(
    secret: &Secret<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

/// Reaction watcher storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// sqlx connection URL. `mode=rwc` creates the file on first run.
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://minilla.db?mode=rwc".into(),
            max_connections: 5,
        }
    }
}

/// What the matcher does after a candidate fails its parameter phase.
///
/// Option mismatches always move on to the next candidate. Set `abort` to
/// make a parameter failure end matching for the message instead.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ParseFailurePolicy {
    /// Reject the candidate and keep trying later registrations.
    #[default]
    NextCandidate,
    /// Stop matching for this keyword entirely.
    Abort,
}

/// Command routing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandsConfig {
    /// Prefix prepended to built-in command keywords (e.g. `!ping`).
    pub prefix: String,
    pub on_parse_failure: ParseFailurePolicy,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            prefix: "!".into(),
            on_parse_failure: ParseFailurePolicy::default(),
        }
    }
}
