//! Semantic checks run on a loaded config before the bot starts.

use std::fmt;

use secrecy::ExposeSecret;

use crate::schema::MinillaConfig;

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// A single validation diagnostic.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Dotted path, e.g. "commands.prefix"
    pub path: &'static str,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.path, self.message)
    }
}

/// Result of validating a configuration.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    /// Returns `true` if any diagnostic is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Count diagnostics by severity.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    fn push(&mut self, severity: Severity, path: &'static str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            severity,
            path,
            message: message.into(),
        });
    }
}

/// Check a config for values that would make the bot unusable.
#[must_use]
pub fn validate(config: &MinillaConfig) -> ValidationResult {
    let mut result = ValidationResult::default();

    let token = config.discord.token.expose_secret();
    if token.trim().is_empty() {
        result.push(
            Severity::Error,
            "discord.token",
            "bot token is empty (set it in the config or MINILLA_CLIENT_TOKEN)",
        );
    } else if token.contains("${") {
        result.push(
            Severity::Warning,
            "discord.token",
            "token still contains an unresolved ${...} placeholder",
        );
    }

    let prefix = &config.commands.prefix;
    if prefix.is_empty() {
        result.push(Severity::Error, "commands.prefix", "prefix must not be empty");
    } else if prefix.chars().any(char::is_whitespace) {
        result.push(
            Severity::Error,
            "commands.prefix",
            "prefix must not contain whitespace; keywords are whitespace-delimited",
        );
    }

    if config.database.max_connections == 0 {
        result.push(
            Severity::Error,
            "database.max_connections",
            "max_connections must be at least 1",
        );
    }
    if !config.database.url.starts_with("sqlite:") {
        result.push(
            Severity::Warning,
            "database.url",
            format!(
                "only sqlite urls are supported, got {:?}",
                config.database.url
            ),
        );
    }

    result
}
