//! First-match-wins selection among the candidates for one keyword.

use std::sync::Arc;

use {minilla_config::ParseFailurePolicy, thiserror::Error, tracing::debug};

use crate::{
    definition::CommandDefinition,
    guild::GuildScope,
    params::{ParamType, ParsedParams, parse_param},
};

/// Why a single candidate was not selected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// A literal option was absent or different. `found` is `None` when the
    /// message ran out of tokens.
    #[error("option {position} expected {expected:?}, found {found:?}")]
    OptionMismatch {
        position: usize,
        expected: String,
        found: Option<String>,
    },

    #[error("no token for parameter {name:?}")]
    MissingParameter { name: String },

    #[error("token {token:?} is not a valid {expected} for parameter {name:?}")]
    ParseFailure {
        name: String,
        token: String,
        expected: ParamType,
    },

    /// The parsed values did not fit the declaration.
    #[error("{reason}")]
    Invalid { reason: String },
}

impl Rejection {
    /// Failures that happen after every option matched.
    #[must_use]
    pub fn is_parameter_phase(&self) -> bool {
        !matches!(self, Self::OptionMismatch { .. })
    }
}

/// Result of matching one message against its candidates.
#[derive(Debug)]
pub enum MatchOutcome {
    Matched {
        command: Arc<CommandDefinition>,
        params: ParsedParams,
    },
    /// No candidate accepted the tokens.
    NoMatch,
    /// A candidate failed its parameter phase under [`ParseFailurePolicy::Abort`];
    /// later candidates were not tried.
    Aborted {
        command: Arc<CommandDefinition>,
        rejection: Rejection,
    },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CommandMatcher {
    policy: ParseFailurePolicy,
}

impl CommandMatcher {
    pub fn new(policy: ParseFailurePolicy) -> Self {
        Self { policy }
    }

    /// Walk `candidates` in order and return the first one whose options and
    /// parameters all validate against `args` (the tokens after the keyword).
    pub async fn find_match(
        &self,
        candidates: &[Arc<CommandDefinition>],
        args: &[&str],
        guild: &dyn GuildScope,
    ) -> MatchOutcome {
        for (index, command) in candidates.iter().enumerate() {
            match try_candidate(command, args, guild).await {
                Ok(params) => {
                    debug!(keyword = command.keyword(), candidate = index, "candidate matched");
                    return MatchOutcome::Matched {
                        command: Arc::clone(command),
                        params,
                    };
                },
                Err(rejection) => {
                    debug!(
                        keyword = command.keyword(),
                        candidate = index,
                        reason = %rejection,
                        "candidate rejected"
                    );
                    if rejection.is_parameter_phase() && self.policy == ParseFailurePolicy::Abort {
                        return MatchOutcome::Aborted {
                            command: Arc::clone(command),
                            rejection,
                        };
                    }
                },
            }
        }
        MatchOutcome::NoMatch
    }
}

async fn try_candidate(
    command: &CommandDefinition,
    args: &[&str],
    guild: &dyn GuildScope,
) -> Result<ParsedParams, Rejection> {
    let options = command.required_options();
    for (position, expected) in options.iter().enumerate() {
        let found = args.get(position).copied();
        if found != Some(expected.as_str()) {
            return Err(Rejection::OptionMismatch {
                position,
                expected: expected.clone(),
                found: found.map(str::to_string),
            });
        }
    }

    let declared = command.required_parameters();
    let rest = &args[options.len()..];
    let mut builder = ParsedParams::builder(declared);
    for (i, param) in declared.iter().enumerate() {
        let Some(&token) = rest.get(i) else {
            return Err(Rejection::MissingParameter {
                name: param.name.clone(),
            });
        };
        let Some(value) = parse_param(token, param.kind, guild).await else {
            return Err(Rejection::ParseFailure {
                name: param.name.clone(),
                token: token.to_string(),
                expected: param.kind,
            });
        };
        builder
            .insert(&param.name, value)
            .map_err(|e| Rejection::Invalid {
                reason: e.to_string(),
            })?;
    }
    builder.build().map_err(|e| Rejection::Invalid {
        reason: e.to_string(),
    })
}
