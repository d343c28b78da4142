use std::fmt;

use regex::Regex;
use tracing::debug;

use crate::{
    context::ScenarioContext,
    error::{RegistryError, StepError},
    steps::{HttpSteps, StepResult},
};

use super::{register_http_steps, StepArgs, StepHandler, StepRegistry};

struct Entry {
    pattern: Regex,
    handler: StepHandler,
}

/// Registry that matches step text with compiled regular expressions.
///
/// Patterns are tried in registration order and the first match wins.
#[derive(Default)]
pub struct StepTable {
    entries: Vec<Entry>,
}

impl StepTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table holding the HTTP steps.
    pub fn with_http_steps(http: HttpSteps) -> Result<Self, RegistryError> {
        let mut table = Self::new();
        register_http_steps(&mut table, http)?;
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.pattern.as_str())
    }

    /// Runs the step matching `text` against a copy of `context`.
    ///
    /// `context` itself is left as it was, whatever the outcome.
    pub async fn run(&self, context: &ScenarioContext, text: &str) -> StepResult {
        let (handler, args) = self.resolve(text)?;
        debug!(step = text, args = args.len(), "running step");
        handler(context.clone(), args).await
    }

    fn resolve(&self, text: &str) -> Result<(StepHandler, StepArgs), StepError> {
        self.entries
            .iter()
            .find_map(|entry| {
                entry
                    .pattern
                    .captures(text)
                    .map(|captures| (entry.handler.clone(), StepArgs::from_captures(&captures)))
            })
            .ok_or_else(|| StepError::UndefinedStep(text.to_string()))
    }
}

impl StepRegistry for StepTable {
    fn register(&mut self, pattern: &str, handler: StepHandler) -> Result<(), RegistryError> {
        if self.patterns().any(|existing| existing == pattern) {
            return Err(RegistryError::DuplicatePattern(pattern.to_string()));
        }
        let compiled = Regex::new(pattern).map_err(|source| RegistryError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        self.entries.push(Entry {
            pattern: compiled,
            handler,
        });
        Ok(())
    }
}

impl fmt::Debug for StepTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.patterns()).finish()
    }
}
