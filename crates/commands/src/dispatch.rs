use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    context::{DispatchContext, InboundMessage, MessageOutbound, Services},
    executor::{ExecutionOutcome, execute},
    guild::GuildScope,
    matcher::{CommandMatcher, MatchOutcome, Rejection},
    registry::CommandRegistry,
};

/// Split message content into its keyword and argument tokens.
///
/// Returns `None` for content with no tokens at all.
pub fn tokenize(content: &str) -> Option<(&str, Vec<&str>)> {
    let mut tokens = content.split_whitespace();
    let keyword = tokens.next()?;
    Some((keyword, tokens.collect()))
}

/// What happened to one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Blank content.
    Empty,
    /// No definitions are registered under the first token.
    UnknownKeyword,
    NoMatch,
    Aborted(Rejection),
    Executed(ExecutionOutcome),
}

/// Routes inbound messages to the first matching command.
///
/// Holds only shared, read-only state, so one dispatcher can serve any
/// number of concurrent events.
#[derive(Clone)]
pub struct CommandDispatcher {
    registry: Arc<CommandRegistry>,
    services: Services,
    matcher: CommandMatcher,
}

impl CommandDispatcher {
    /// The parse-failure policy is read from `services.config`.
    pub fn new(registry: Arc<CommandRegistry>, services: Services) -> Self {
        let matcher = CommandMatcher::new(services.config.commands.on_parse_failure);
        Self {
            registry,
            services,
            matcher,
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub async fn dispatch(
        &self,
        message: InboundMessage,
        guild: Arc<dyn GuildScope>,
        outbound: Arc<dyn MessageOutbound>,
    ) -> DispatchOutcome {
        let Some((keyword, args)) = tokenize(&message.content) else {
            return DispatchOutcome::Empty;
        };

        let candidates = self.registry.candidates(keyword);
        if candidates.is_empty() {
            debug!(
                keyword,
                guild_id = %guild.guild_id(),
                message_id = %message.id,
                "unknown keyword"
            );
            return DispatchOutcome::UnknownKeyword;
        }

        let outcome = self
            .matcher
            .find_match(candidates, &args, guild.as_ref())
            .await;
        let (command, params) = match outcome {
            MatchOutcome::Matched { command, params } => (command, params),
            MatchOutcome::NoMatch => {
                debug!(
                    keyword,
                    guild_id = %guild.guild_id(),
                    message_id = %message.id,
                    "no candidate matched"
                );
                return DispatchOutcome::NoMatch;
            },
            MatchOutcome::Aborted { command, rejection } => {
                warn!(
                    keyword = command.keyword(),
                    guild_id = %guild.guild_id(),
                    message_id = %message.id,
                    reason = %rejection,
                    "dispatch aborted on parameter failure"
                );
                return DispatchOutcome::Aborted(rejection);
            },
        };

        let ctx = DispatchContext {
            services: self.services.clone(),
            message,
            guild,
            outbound,
        };
        DispatchOutcome::Executed(execute(&command, ctx, params).await)
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {
        minilla_config::{MinillaConfig, ParseFailurePolicy},
        minilla_store::InMemoryReactionWatcherStore,
        rstest::rstest,
    };

    use super::*;
    use crate::{
        definition::{CommandDefinition, handler_fn},
        params::ParamType,
        test_support::{CountingHandler, RecordingOutbound, StaticGuild, message, services},
    };

    #[rstest]
    #[case("!ping", Some(("!ping", vec![])))]
    #[case("  !watch   role 1\t2\n", Some(("!watch", vec!["role", "1", "2"])))]
    #[case("", None)]
    #[case("   ", None)]
    fn tokenize_splits_on_whitespace(
        #[case] content: &str,
        #[case] expected: Option<(&str, Vec<&str>)>,
    ) {
        assert_eq!(tokenize(content), expected);
    }

    fn dispatcher(registry: CommandRegistry) -> CommandDispatcher {
        CommandDispatcher::new(Arc::new(registry), services())
    }

    async fn send(d: &CommandDispatcher, author: u64, content: &str) -> DispatchOutcome {
        d.dispatch(
            message(author, content),
            Arc::new(StaticGuild::default()),
            Arc::new(RecordingOutbound::default()),
        )
        .await
    }

    #[tokio::test]
    async fn unknown_keyword_invokes_nothing() {
        let counter = CountingHandler::default();
        let mut reg = CommandRegistry::new();
        reg.register(CommandDefinition::new("!ping", counter.handler()))
            .unwrap();
        let d = dispatcher(reg);

        assert_eq!(send(&d, 1, "!pong").await, DispatchOutcome::UnknownKeyword);
        assert_eq!(send(&d, 1, "hello there").await, DispatchOutcome::UnknownKeyword);
        assert_eq!(send(&d, 1, "   ").await, DispatchOutcome::Empty);
        assert_eq!(counter.calls(), 0);
    }

    #[tokio::test]
    async fn keyword_lookup_ignores_case() {
        let counter = CountingHandler::default();
        let mut reg = CommandRegistry::new();
        reg.register(CommandDefinition::new("!ping", counter.handler()))
            .unwrap();
        let d = dispatcher(reg);

        assert_eq!(
            send(&d, 1, "!PING").await,
            DispatchOutcome::Executed(ExecutionOutcome::Completed)
        );
        assert_eq!(counter.calls(), 1);
    }

    #[tokio::test]
    async fn only_the_first_match_runs() {
        let first = CountingHandler::default();
        let second = CountingHandler::default();
        let mut reg = CommandRegistry::new();
        reg.register(
            CommandDefinition::new("!n", first.handler()).parameter("n", ParamType::Integer),
        )
        .unwrap();
        reg.register(
            CommandDefinition::new("!n", second.handler()).parameter("n", ParamType::Integer),
        )
        .unwrap();
        let d = dispatcher(reg);

        send(&d, 1, "!n 5").await;
        assert_eq!((first.calls(), second.calls()), (1, 0));
    }

    #[tokio::test]
    async fn no_match_is_silent() {
        let counter = CountingHandler::default();
        let mut reg = CommandRegistry::new();
        reg.register(
            CommandDefinition::new("!n", counter.handler()).parameter("n", ParamType::Integer),
        )
        .unwrap();
        let d = dispatcher(reg);

        let outbound = RecordingOutbound::default();
        let out = d
            .dispatch(
                message(1, "!n five"),
                Arc::new(StaticGuild::default()),
                Arc::new(outbound.clone()),
            )
            .await;
        assert_eq!(out, DispatchOutcome::NoMatch);
        assert_eq!(counter.calls(), 0);
        assert!(outbound.sent().is_empty());
    }

    #[tokio::test]
    async fn abort_policy_comes_from_config() {
        let fallback = CountingHandler::default();
        let mut reg = CommandRegistry::new();
        reg.register(
            CommandDefinition::new("!n", CountingHandler::default().handler())
                .parameter("n", ParamType::Integer),
        )
        .unwrap();
        reg.register(
            CommandDefinition::new("!n", fallback.handler()).parameter("s", ParamType::String),
        )
        .unwrap();

        let mut config = MinillaConfig::default();
        config.commands.on_parse_failure = ParseFailurePolicy::Abort;
        let services = Services::new(
            Arc::new(config),
            Arc::new(InMemoryReactionWatcherStore::new()),
        );
        let d = CommandDispatcher::new(Arc::new(reg), services);

        let out = send(&d, 1, "!n five").await;
        assert!(matches!(
            out,
            DispatchOutcome::Aborted(Rejection::ParseFailure { .. })
        ));
        assert_eq!(fallback.calls(), 0);
    }

    #[tokio::test]
    async fn failing_handler_does_not_affect_the_next_event() {
        let mut reg = CommandRegistry::new();
        reg.register(CommandDefinition::new(
            "!fail",
            handler_fn(|_ctx, _params| async { Err(anyhow::anyhow!("nope")) }),
        ))
        .unwrap();
        let ok = CountingHandler::default();
        reg.register(CommandDefinition::new("!ok", ok.handler()))
            .unwrap();
        let d = dispatcher(reg);

        assert!(matches!(
            send(&d, 1, "!fail").await,
            DispatchOutcome::Executed(ExecutionOutcome::Failed { .. })
        ));
        assert!(matches!(
            send(&d, 1, "!ok").await,
            DispatchOutcome::Executed(ExecutionOutcome::Completed)
        ));
        assert_eq!(ok.calls(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_dispatches_are_independent() {
        let mut reg = CommandRegistry::new();
        reg.register(
            CommandDefinition::new(
                "!echo",
                handler_fn(|ctx, params| async move {
                    let word = params.string("word")?.to_string();
                    tokio::task::yield_now().await;
                    ctx.reply(&format!("{}:{word}", ctx.message.author_id)).await
                }),
            )
            .parameter("word", ParamType::String),
        )
        .unwrap();
        let d = dispatcher(reg);

        let mut tasks = Vec::new();
        let mut outbounds = Vec::new();
        for author in 1..=2_u64 {
            let d = d.clone();
            let outbound = RecordingOutbound::default();
            outbounds.push(outbound.clone());
            tasks.push(tokio::spawn(async move {
                d.dispatch(
                    message(author, &format!("!echo from{author}")),
                    Arc::new(StaticGuild::default()),
                    Arc::new(outbound),
                )
                .await
            }));
        }
        for t in tasks {
            assert_eq!(
                t.await.unwrap(),
                DispatchOutcome::Executed(ExecutionOutcome::Completed)
            );
        }
        assert_eq!(outbounds[0].texts(), vec!["1:from1".to_string()]);
        assert_eq!(outbounds[1].texts(), vec!["2:from2".to_string()]);
    }
}
