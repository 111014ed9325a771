use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use tracing::debug;

use crate::{Error, Result, definition::CommandDefinition};

/// Keyword-indexed command definitions, in registration order.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Vec<Arc<CommandDefinition>>>,
    keywords: Vec<String>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition after any already registered under its keyword.
    ///
    /// Fails if the definition declares the same parameter name twice.
    pub fn register(&mut self, command: CommandDefinition) -> Result<()> {
        let mut seen = HashSet::new();
        for p in command.required_parameters() {
            if !seen.insert(p.name.as_str()) {
                return Err(Error::DuplicateParameter {
                    keyword: command.keyword().to_string(),
                    name: p.name.clone(),
                });
            }
        }

        let keyword = command.keyword().to_string();
        debug!(keyword = %keyword, usage = %command.usage(), "command registered");
        let entry = self.commands.entry(keyword.clone()).or_default();
        if entry.is_empty() {
            self.keywords.push(keyword);
        }
        entry.push(Arc::new(command));
        Ok(())
    }

    /// Candidates for a keyword, matched case-insensitively. Empty when the
    /// keyword is unknown.
    pub fn candidates(&self, keyword: &str) -> &[Arc<CommandDefinition>] {
        self.commands
            .get(&keyword.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Registered keywords, in first-registration order.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    /// Every definition, grouped by keyword in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<CommandDefinition>> {
        self.keywords
            .iter()
            .flat_map(|k| self.commands.get(k).into_iter().flatten())
    }

    pub fn len(&self) -> usize {
        self.commands.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
