use std::{fmt, future::Future, sync::Arc};

use async_trait::async_trait;

use crate::{
    context::DispatchContext,
    params::{ParamType, ParsedParams},
};

/// Code run when a command matches.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn execute(&self, ctx: DispatchContext, params: ParsedParams) -> anyhow::Result<()>;
}

struct FnHandler<F>(F);

#[async_trait]
impl<F, Fut> CommandHandler for FnHandler<F>
where
    F: Fn(DispatchContext, ParsedParams) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    async fn execute(&self, ctx: DispatchContext, params: ParsedParams) -> anyhow::Result<()> {
        (self.0)(ctx, params).await
    }
}

/// Wrap an async closure as a [`CommandHandler`].
pub fn handler_fn<F, Fut>(f: F) -> Arc<dyn CommandHandler>
where
    F: Fn(DispatchContext, ParsedParams) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    Arc::new(FnHandler(f))
}

/// A named, typed positional parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredParameter {
    pub name: String,
    pub kind: ParamType,
}

impl RequiredParameter {
    pub fn new(name: impl Into<String>, kind: ParamType) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// One invocable shape of a keyword.
///
/// Several definitions may share a keyword; they are told apart by their
/// literal options and the shape of their parameters.
#[derive(Clone)]
pub struct CommandDefinition {
    keyword: String,
    required_options: Vec<String>,
    required_parameters: Vec<RequiredParameter>,
    description: Option<String>,
    handler: Arc<dyn CommandHandler>,
}

impl CommandDefinition {
    /// The keyword is stored lowercased; lookups are case-insensitive.
    pub fn new(keyword: impl AsRef<str>, handler: Arc<dyn CommandHandler>) -> Self {
        Self {
            keyword: keyword.as_ref().to_lowercase(),
            required_options: Vec::new(),
            required_parameters: Vec::new(),
            description: None,
            handler,
        }
    }

    /// Append a literal token that must follow the keyword (case-sensitive).
    #[must_use]
    pub fn option(mut self, literal: impl Into<String>) -> Self {
        self.required_options.push(literal.into());
        self
    }

    /// Append a typed parameter read after all options.
    #[must_use]
    pub fn parameter(mut self, name: impl Into<String>, kind: ParamType) -> Self {
        self.required_parameters
            .push(RequiredParameter::new(name, kind));
        self
    }

    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn required_options(&self) -> &[String] {
        &self.required_options
    }

    pub fn required_parameters(&self) -> &[RequiredParameter] {
        &self.required_parameters
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn handler(&self) -> &Arc<dyn CommandHandler> {
        &self.handler
    }

    /// Human-readable invocation, e.g. `!watch role <message:integer>`.
    pub fn usage(&self) -> String {
        let mut parts =
            Vec::with_capacity(1 + self.required_options.len() + self.required_parameters.len());
        parts.push(self.keyword.clone());
        parts.extend(self.required_options.iter().cloned());
        parts.extend(
            self.required_parameters
                .iter()
                .map(|p| format!("<{}:{}>", p.name, p.kind)),
        );
        parts.join(" ")
    }
}

impl fmt::Debug for CommandDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDefinition")
            .field("keyword", &self.keyword)
            .field("required_options", &self.required_options)
            .field("required_parameters", &self.required_parameters)
            .finish_non_exhaustive()
    }
}
